// Dashboard view-model
use super::sample::Sample;
use super::server::ServerInfo;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Everything one server dashboard renders from, captured by a single refresh cycle.
///
/// Owned by the page and handed to renderers by reference; renderers never mutate it.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    pub server_id: String,
    /// Inventory record shown above the charts.
    pub server: Option<ServerInfo>,
    /// Most recent sample, feeding the gauges.
    pub latest: Option<Sample>,
    /// Recent samples in ascending time order, feeding the trend charts.
    pub history: Vec<Sample>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl DashboardView {
    pub fn new(server_id: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            ..Self::default()
        }
    }
}

/// One column of the recent-samples table under the charts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryColumn {
    pub key: String,
    pub label: String,
    /// Appended to every formatted value, e.g. `%`.
    #[serde(default)]
    pub unit: String,
}
