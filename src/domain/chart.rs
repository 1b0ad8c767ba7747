// Chart configuration domain models
use super::sample::Sample;
use serde::Deserialize;
use std::borrow::Cow;
use std::fmt;

/// A `#rrggbb` colour as written into the rendered markup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color(Cow<'static, str>);

impl Color {
    #[cfg(test)]
    pub const BLUE: Color = Color(Cow::Borrowed("#5470c6"));
    pub const GREEN: Color = Color(Cow::Borrowed("#91cc75"));
    pub const YELLOW: Color = Color(Cow::Borrowed("#fac858"));
    pub const RED: Color = Color(Cow::Borrowed("#ee6666"));
    #[cfg(test)]
    pub const CYAN: Color = Color(Cow::Borrowed("#73c0de"));
    #[cfg(test)]
    pub const TEAL: Color = Color(Cow::Borrowed("#3ba272"));
    pub const GRAY: Color = Color(Cow::Borrowed("#e0e0e0"));
    pub const WHITE: Color = Color(Cow::Borrowed("#ffffff"));
    pub const INK: Color = Color(Cow::Borrowed("#333333"));
    pub const LABEL: Color = Color(Cow::Borrowed("#666666"));
    pub const MUTED: Color = Color(Cow::Borrowed("#999999"));

    pub fn parse(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        let valid = matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit());
        valid.then(|| Self(Cow::Owned(hex.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid colour '{}', expected #rrggbb", value))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// A named, coloured field tracked across a chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesConfig {
    pub key: String,
    pub label: String,
    pub color: Color,
}

impl SeriesConfig {
    pub fn new(key: impl Into<String>, label: impl Into<String>, color: Color) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            color,
        }
    }

    /// Reads this series' field from a sample. Missing fields count as zero.
    pub fn value_of(&self, sample: &Sample) -> f64 {
        sample.field(&self.key).unwrap_or(0.0)
    }
}

/// Configuration shared by the line and bar renderers.
///
/// `width` is replaced by the owning surface's width on every render, so the
/// configured value only matters when a renderer is called directly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartConfig {
    pub surface: String,
    #[serde(default = "default_width")]
    pub width: f64,
    pub height: Option<f64>,
    pub padding: Option<Padding>,
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
    pub domain_floor: Option<f64>,
    pub unit: Option<String>,
}

fn default_width() -> f64 {
    800.0
}

impl ChartConfig {
    pub fn new(surface: impl Into<String>, series: Vec<SeriesConfig>) -> Self {
        Self {
            surface: surface.into(),
            width: default_width(),
            height: None,
            padding: None,
            series,
            domain_floor: None,
            unit: None,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum GaugeKind {
    /// 0 to 100 input, e.g. CPU, memory or disk usage.
    Percent,
    /// Bounded quantity such as load average.
    Bounded {
        #[serde(default = "default_gauge_max")]
        max: f64,
    },
}

fn default_gauge_max() -> f64 {
    10.0
}

impl GaugeKind {
    pub fn max_value(&self) -> f64 {
        match self {
            GaugeKind::Percent => 100.0,
            GaugeKind::Bounded { max } => *max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GaugeConfig {
    pub surface: String,
    /// Field read from the latest sample.
    pub key: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(flatten)]
    pub kind: GaugeKind,
    /// Fixed sweep colour. Threshold colouring applies when unset.
    pub color: Option<Color>,
}

impl GaugeConfig {
    pub fn percent(surface: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            key: key.into(),
            caption: None,
            kind: GaugeKind::Percent,
            color: None,
        }
    }

    #[cfg(test)]
    pub fn bounded(surface: impl Into<String>, key: impl Into<String>, max: f64) -> Self {
        Self {
            kind: GaugeKind::Bounded { max },
            ..Self::percent(surface, key)
        }
    }
}

/// One chart on a dashboard, as listed in `config/dashboard.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSpec {
    Line(ChartConfig),
    Bar(ChartConfig),
    Gauge(GaugeConfig),
}

impl ChartSpec {
    pub fn surface(&self) -> &str {
        match self {
            ChartSpec::Line(config) | ChartSpec::Bar(config) => &config.surface,
            ChartSpec::Gauge(config) => &config.surface,
        }
    }
}
