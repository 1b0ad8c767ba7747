// Monitoring backend repository implementation
use crate::application::sample_source::SampleSource;
use crate::domain::sample::Sample;
use crate::domain::server::ServerInfo;
use crate::infrastructure::config::{EndpointTemplates, expand_template};
use crate::infrastructure::http_client::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;

/// Number of samples the backend is asked to take on a manual refresh.
const COLLECT_COUNT: u32 = 1;

#[derive(Debug, Serialize)]
struct CollectRequest {
    count: u32,
}

#[derive(Debug, Clone)]
pub struct BackendRepository {
    client: HttpClient,
    endpoints: EndpointTemplates,
}

impl BackendRepository {
    pub fn new(client: HttpClient, endpoints: EndpointTemplates) -> Self {
        Self { client, endpoints }
    }

    fn path(&self, template: &str, server_id: &str, limit: Option<usize>) -> String {
        let mut vars = HashMap::new();
        vars.insert("id".to_string(), urlencoding::encode(server_id).into_owned());
        if let Some(limit) = limit {
            vars.insert("limit".to_string(), limit.to_string());
        }
        expand_template(template, &vars)
    }
}

#[async_trait]
impl SampleSource for BackendRepository {
    async fn server_info(&self, server_id: &str) -> Result<Option<ServerInfo>> {
        let path = self.path(&self.endpoints.server, server_id, None);
        match self.client.get_json::<ServerInfo>(&path).await {
            Ok(server) => Ok(server),
            Err(e) if e.is_not_found() => {
                tracing::warn!(server_id, "Server not known to the backend");
                Ok(None)
            }
            Err(e) => Err(e).context("Failed to fetch server info"),
        }
    }

    async fn latest_sample(&self, server_id: &str) -> Result<Option<Sample>> {
        let path = self.path(&self.endpoints.latest, server_id, None);
        match self.client.get_json::<Sample>(&path).await {
            Ok(sample) => Ok(sample),
            // The backend answers 404 until a server has its first sample.
            Err(e) if e.is_not_found() => {
                tracing::debug!(server_id, "No latest sample yet");
                Ok(None)
            }
            Err(e) => Err(e).context("Failed to fetch latest sample"),
        }
    }

    async fn recent_samples(&self, server_id: &str, limit: usize) -> Result<Vec<Sample>> {
        let path = self.path(&self.endpoints.history, server_id, Some(limit));
        let samples = self
            .client
            .get_json::<Vec<Sample>>(&path)
            .await
            .context("Failed to fetch sample history")?
            .unwrap_or_default();

        tracing::debug!(server_id, count = samples.len(), "Fetched sample history");
        Ok(samples)
    }

    async fn collect_sample(&self, server_id: &str) -> Result<()> {
        let path = self.path(&self.endpoints.collect, server_id, None);
        self.client
            .post_json::<_, serde_json::Value>(&path, &CollectRequest { count: COLLECT_COUNT })
            .await
            .context("Failed to trigger sample collection")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::{DEFAULT_TIMEOUT, test_server};
    use axum::Json;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    #[derive(serde::Deserialize)]
    struct Limit {
        limit: usize,
    }

    async fn repository(collected: Arc<Mutex<Vec<Value>>>) -> BackendRepository {
        let router = axum::Router::new()
            .route(
                "/api/servers/:id",
                get(|Path(id): Path<String>| async move {
                    if id == "missing" {
                        return Err(StatusCode::NOT_FOUND);
                    }
                    Ok(Json(json!({
                        "id": 1,
                        "name": format!("server-{}", id),
                        "ip": "10.0.0.5",
                        "type": "db",
                        "cpuCores": 4,
                        "status": "offline",
                        "createdAt": "2024-04-30 09:15:00"
                    })))
                }),
            )
            .route(
                "/api/servers/:id/resources/latest",
                get(|Path(id): Path<String>| async move {
                    if id == "empty" {
                        return Err(StatusCode::NOT_FOUND);
                    }
                    if id == "broken" {
                        return Err(StatusCode::INTERNAL_SERVER_ERROR);
                    }
                    Ok(Json(json!({
                        "id": 9,
                        "serverId": 1,
                        "cpuUsage": 42.5,
                        "memoryUsed": null,
                        "timestamp": "2024-05-01 10:00:30"
                    })))
                }),
            )
            .route(
                "/api/servers/:id/resources",
                get(|Path(id): Path<String>, Query(q): Query<Limit>| async move {
                    let rows: Vec<Value> = (0..q.limit.min(3))
                        .map(|i| json!({ "serverId": id, "cpuUsage": i, "timestamp": format!("2024-05-01 10:00:0{}", i) }))
                        .collect();
                    Json(rows)
                }),
            )
            .route(
                "/api/servers/:id/resources/collect",
                post(move |Json(body): Json<Value>| {
                    let collected = collected.clone();
                    async move {
                        collected.lock().unwrap().push(body);
                        StatusCode::OK
                    }
                }),
            );
        let addr = test_server::spawn(router).await;
        BackendRepository::new(
            HttpClient::new(format!("http://{}", addr), DEFAULT_TIMEOUT),
            EndpointTemplates::default(),
        )
    }

    #[test]
    fn test_path_encodes_server_id() {
        let repo = BackendRepository::new(
            HttpClient::new("http://backend", DEFAULT_TIMEOUT),
            EndpointTemplates::default(),
        );
        assert_eq!(
            repo.path(&repo.endpoints.history, "web 1/a", Some(100)),
            "/api/servers/web%201%2Fa/resources?limit=100"
        );
    }

    #[tokio::test]
    async fn test_server_info_fetch() {
        let repo = repository(Arc::default()).await;
        let server = repo.server_info("3").await.unwrap().unwrap();
        assert_eq!(server.name.as_deref(), Some("server-3"));
        assert_eq!(server.server_type.as_deref(), Some("db"));
        assert_eq!(server.cpu_cores, Some(4));
        assert!(server.total_memory.is_none());
        assert!(!server.is_online());

        assert!(repo.server_info("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_latest_sample_keeps_numeric_fields() {
        let repo = repository(Arc::default()).await;
        let sample = repo.latest_sample("1").await.unwrap().unwrap();
        assert_eq!(sample.field("cpuUsage"), Some(42.5));
        assert_eq!(sample.field("memoryUsed"), None);
        assert_eq!(sample.timestamp.format("%H:%M:%S").to_string(), "10:00:30");
    }

    #[tokio::test]
    async fn test_latest_sample_not_found_is_none() {
        let repo = repository(Arc::default()).await;
        assert!(repo.latest_sample("empty").await.unwrap().is_none());
        let err = repo.latest_sample("broken").await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to fetch latest sample"));
    }

    #[tokio::test]
    async fn test_recent_samples_passes_limit() {
        let repo = repository(Arc::default()).await;
        assert_eq!(repo.recent_samples("1", 2).await.unwrap().len(), 2);
        assert_eq!(repo.recent_samples("1", 100).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_collect_posts_count() {
        let collected = Arc::new(Mutex::new(Vec::new()));
        let repo = repository(collected.clone()).await;
        repo.collect_sample("1").await.unwrap();
        assert_eq!(*collected.lock().unwrap(), vec![json!({ "count": 1 })]);
    }
}
