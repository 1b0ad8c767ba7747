// Source trait for server records and resource samples
use crate::domain::sample::Sample;
use crate::domain::server::ServerInfo;
use async_trait::async_trait;

#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Inventory record for a server, `None` when the backend does not know it.
    async fn server_info(&self, server_id: &str) -> anyhow::Result<Option<ServerInfo>>;

    /// Most recent sample for a server, `None` when the backend has nothing yet.
    async fn latest_sample(&self, server_id: &str) -> anyhow::Result<Option<Sample>>;

    /// Up to `limit` recent samples, in whatever order the backend returns them.
    async fn recent_samples(&self, server_id: &str, limit: usize) -> anyhow::Result<Vec<Sample>>;

    /// Ask the backend to take a fresh sample now.
    async fn collect_sample(&self, server_id: &str) -> anyhow::Result<()>;
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    /// In-memory source that records how it is called.
    #[derive(Default)]
    pub struct FakeSource {
        pub server: Mutex<Option<ServerInfo>>,
        pub latest: Mutex<Option<Sample>>,
        pub history: Mutex<Vec<Sample>>,
        pub fail: AtomicBool,
        pub delay: Duration,
        pub loads: AtomicUsize,
        pub collects: AtomicUsize,
        in_flight: AtomicUsize,
        pub max_in_flight: AtomicUsize,
    }

    impl FakeSource {
        pub fn new(history: Vec<Sample>) -> Self {
            let server = ServerInfo {
                name: Some("web-1".to_string()),
                status: Some("online".to_string()),
                ..ServerInfo::default()
            };
            Self {
                server: Mutex::new(Some(server)),
                latest: Mutex::new(history.last().cloned()),
                history: Mutex::new(history),
                ..Self::default()
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn loads(&self) -> usize {
            self.loads.load(Ordering::SeqCst)
        }

        pub fn collects(&self) -> usize {
            self.collects.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SampleSource for FakeSource {
        async fn server_info(&self, _server_id: &str) -> anyhow::Result<Option<ServerInfo>> {
            Ok(self.server.lock().unwrap().clone())
        }

        async fn latest_sample(&self, _server_id: &str) -> anyhow::Result<Option<Sample>> {
            Ok(self.latest.lock().unwrap().clone())
        }

        async fn recent_samples(&self, _server_id: &str, limit: usize) -> anyhow::Result<Vec<Sample>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail.load(Ordering::SeqCst) {
                anyhow::bail!("backend unavailable");
            }
            let history = self.history.lock().unwrap();
            Ok(history.iter().take(limit).cloned().collect())
        }

        async fn collect_sample(&self, _server_id: &str) -> anyhow::Result<()> {
            self.collects.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
}
