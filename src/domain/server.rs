// Server inventory record
use super::sample::deserialize_optional_timestamp;
use chrono::NaiveDateTime;
use serde::Deserialize;

/// A monitored server as the backend describes it. Every field may be
/// missing; the page shows `-` for those.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub name: Option<String>,
    pub ip: Option<String>,
    /// `app`, `db`, `cache`, `message-queue`, ...
    #[serde(rename = "type")]
    pub server_type: Option<String>,
    pub env: Option<String>,
    pub description: Option<String>,
    pub cpu_cores: Option<u32>,
    /// Gigabytes.
    pub total_memory: Option<f64>,
    /// Gigabytes.
    pub total_disk: Option<f64>,
    /// `online`, `offline` or `maintenance`.
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

impl ServerInfo {
    pub fn is_online(&self) -> bool {
        self.status.as_deref() == Some("online")
    }
}
