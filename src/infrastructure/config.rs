// Configuration loading for the backend and dashboards
use crate::application::refresh::RefreshSettings;
use crate::chart::theme::ChartTheme;
use crate::domain::chart::ChartSpec;
use crate::domain::dashboard::HistoryColumn;
use crate::infrastructure::http_client::DEFAULT_TIMEOUT;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Prefix for environment overrides, e.g. `MONITOR__BACKEND__BASE_URL`.
const ENV_PREFIX: &str = "MONITOR";

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub backend: BackendSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default)]
    pub endpoints: EndpointTemplates,
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Backend paths with `${id}` and `${limit}` placeholders.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EndpointTemplates {
    pub server: String,
    pub latest: String,
    pub history: String,
    pub collect: String,
}

impl Default for EndpointTemplates {
    fn default() -> Self {
        Self {
            server: "/api/servers/${id}".to_string(),
            latest: "/api/servers/${id}/resources/latest".to_string(),
            history: "/api/servers/${id}/resources?limit=${limit}".to_string(),
            collect: "/api/servers/${id}/resources/collect".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default = "default_width")]
    pub default_width: f64,
    pub empty_message: Option<String>,
    #[serde(default)]
    pub servers: Vec<String>,
    #[serde(default)]
    pub charts: Vec<ChartSpec>,
    #[serde(default)]
    pub history_columns: Vec<HistoryColumn>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub listen: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RefreshConfig {
    pub interval_secs: u64,
    pub auto_refresh: bool,
    pub collect_on_tick: bool,
    pub resize_debounce_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            auto_refresh: true,
            collect_on_tick: true,
            resize_debounce_ms: 250,
        }
    }
}

impl DashboardConfig {
    pub fn refresh_settings(&self) -> RefreshSettings {
        RefreshSettings {
            interval: Duration::from_secs(self.refresh.interval_secs.max(1)),
            auto_refresh: self.refresh.auto_refresh,
            collect_on_tick: self.refresh.collect_on_tick,
            resize_debounce: Duration::from_millis(self.refresh.resize_debounce_ms),
            ..RefreshSettings::default()
        }
    }

    pub fn theme(&self) -> ChartTheme {
        match &self.empty_message {
            Some(message) => ChartTheme::default().with_empty_message(message.clone()),
            None => ChartTheme::default(),
        }
    }

    /// Surface ids must be unique so every chart has exactly one mount point.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        for chart in &self.charts {
            if !seen.insert(chart.surface()) {
                anyhow::bail!("Duplicate chart surface id: {}", chart.surface());
            }
        }
        if self.servers.is_empty() {
            tracing::warn!("No servers configured, dashboards will be empty");
        }
        Ok(())
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_history_limit() -> usize {
    100
}

fn default_width() -> f64 {
    800.0
}

pub fn load_backend_config() -> anyhow::Result<BackendConfig> {
    load(config::File::with_name("config/backend"))
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let dashboard: DashboardConfig = load(config::File::with_name("config/dashboard"))?;
    dashboard.validate()?;
    Ok(dashboard)
}

fn load<T, S>(file: S) -> anyhow::Result<T>
where
    T: DeserializeOwned,
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Replace `${name}` placeholders in a template string
pub fn expand_template(template: &str, vars: &HashMap<String, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}
