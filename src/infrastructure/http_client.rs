// JSON-over-HTTP client for the monitoring backend
use reqwest::header::{self, HeaderValue};
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request failed: {status} {body}")]
    Status { status: StatusCode, body: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `Ok(None)` when the response is successful but not JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, FetchError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let request = self
            .client
            .get(&url)
            .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.execute(request).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, FetchError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        self.execute(self.client.post(&url).json(body)).await
    }

    /// Runs the whole exchange, body included, under the client timeout.
    /// Expiry drops the in-flight request.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>, FetchError> {
        tokio::time::timeout(self.timeout, Self::exchange(request))
            .await
            .map_err(|_| FetchError::Timeout(self.timeout))?
    }

    async fn exchange<T: DeserializeOwned>(request: RequestBuilder) -> Result<Option<T>, FetchError> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);
        let bytes = response.bytes().await?;
        if !is_json {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

#[cfg(test)]
pub mod test_server {
    use axum::Router;
    use std::net::SocketAddr;

    /// Serves `router` on an ephemeral loopback port for the lifetime of the test runtime.
    pub async fn spawn(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }
}
