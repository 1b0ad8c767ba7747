// Dashboard service - Use case for loading a server's view-model
use crate::application::sample_source::SampleSource;
use crate::domain::dashboard::DashboardView;
use crate::domain::sample::sort_by_time;
use anyhow::Context;
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn SampleSource>,
    history_limit: usize,
}

impl DashboardService {
    pub fn new(source: Arc<dyn SampleSource>, history_limit: usize) -> Self {
        Self {
            source,
            history_limit,
        }
    }

    /// Fetches the server record, the latest sample and the recent history
    /// concurrently. An unknown server fails the load.
    pub async fn load(&self, server_id: &str) -> anyhow::Result<DashboardView> {
        let (server, latest, mut history) = tokio::try_join!(
            self.source.server_info(server_id),
            self.source.latest_sample(server_id),
            self.source.recent_samples(server_id, self.history_limit),
        )
        .with_context(|| format!("Failed to load dashboard data for server {}", server_id))?;
        let Some(server) = server else {
            anyhow::bail!("Server {} not found", server_id);
        };

        sort_by_time(&mut history);
        // Gauges still have something to show when only the history endpoint has data.
        let latest = latest.or_else(|| history.last().cloned());

        tracing::debug!(
            server_id,
            samples = history.len(),
            has_latest = latest.is_some(),
            "Loaded dashboard data"
        );

        Ok(DashboardView {
            server_id: server_id.to_string(),
            server: Some(server),
            latest,
            history,
            refreshed_at: Some(Utc::now()),
        })
    }

    /// Manual refresh: asks the backend for a fresh sample, then reloads.
    pub async fn collect_and_load(&self, server_id: &str) -> anyhow::Result<DashboardView> {
        self.source
            .collect_sample(server_id)
            .await
            .with_context(|| format!("Failed to collect a sample for server {}", server_id))?;
        self.load(server_id).await
    }
}
