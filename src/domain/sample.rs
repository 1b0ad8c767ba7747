// Sample domain model
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Timestamp format used by the monitoring backend (`@JsonFormat` on its models).
const BACKEND_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One timestamped observation of named numeric metrics.
///
/// Only numeric fields are kept; `null` and non-numeric fields are dropped
/// on ingestion so a series reading them falls back to zero.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawSample")]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    fields: BTreeMap<String, f64>,
}

#[derive(Deserialize)]
struct RawSample {
    #[serde(deserialize_with = "deserialize_timestamp")]
    timestamp: NaiveDateTime,
    #[serde(flatten)]
    fields: BTreeMap<String, serde_json::Value>,
}

impl From<RawSample> for Sample {
    fn from(raw: RawSample) -> Self {
        let fields = raw
            .fields
            .into_iter()
            .filter_map(|(key, value)| value.as_f64().map(|v| (key, v)))
            .collect();
        Self {
            timestamp: raw.timestamp,
            fields,
        }
    }
}

impl Sample {
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            fields: BTreeMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_field(mut self, key: impl Into<String>, value: f64) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn field(&self, key: &str) -> Option<f64> {
        self.fields.get(key).copied().filter(|v| v.is_finite())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Millis(i64),
}

impl RawTimestamp {
    fn resolve<E: serde::de::Error>(self) -> Result<NaiveDateTime, E> {
        match self {
            RawTimestamp::Text(text) => {
                parse_timestamp(&text).ok_or_else(|| E::custom(format!("unrecognised timestamp: {}", text)))
            }
            RawTimestamp::Millis(ms) => DateTime::from_timestamp_millis(ms)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| E::custom(format!("timestamp out of range: {}", ms))),
        }
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    RawTimestamp::deserialize(deserializer)?.resolve()
}

/// Same formats as sample timestamps, with `null` or absence read as `None`.
pub fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawTimestamp>::deserialize(deserializer)?
        .map(RawTimestamp::resolve)
        .transpose()
}

/// Accepts the backend format first, then RFC 3339.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, BACKEND_TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

/// Sorts samples ascending by timestamp. Renderers expect this order and never sort.
pub fn sort_by_time(samples: &mut [Sample]) {
    samples.sort_by_key(|s| s.timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_record() {
        let json = r#"{
            "id": 7,
            "serverId": 1,
            "cpuUsage": 42.5,
            "memoryUsage": null,
            "note": "ignored",
            "timestamp": "2024-05-01 10:30:15"
        }"#;
        let sample: Sample = serde_json::from_str(json).unwrap();

        assert_eq!(sample.timestamp.format("%H:%M:%S").to_string(), "10:30:15");
        assert_eq!(sample.field("cpuUsage"), Some(42.5));
        assert_eq!(sample.field("memoryUsage"), None);
        assert_eq!(sample.field("note"), None);
        assert_eq!(sample.field("serverId"), Some(1.0));
    }

    #[test]
    fn test_deserialize_alternate_timestamps() {
        let rfc: Sample =
            serde_json::from_str(r#"{"timestamp": "2024-05-01T10:30:15Z", "cpuUsage": 1}"#).unwrap();
        assert_eq!(rfc.timestamp.format("%H:%M:%S").to_string(), "10:30:15");

        let millis: Sample =
            serde_json::from_str(r#"{"timestamp": 1714559415000, "cpuUsage": 1}"#).unwrap();
        assert_eq!(millis.timestamp, rfc.timestamp);
    }

    #[test]
    fn test_rejects_garbage_timestamp() {
        let result = serde_json::from_str::<Sample>(r#"{"timestamp": "yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_sort_by_time() {
        let t = |s: &str| parse_timestamp(s).unwrap();
        let mut samples = vec![
            Sample::new(t("2024-05-01 10:00:02")),
            Sample::new(t("2024-05-01 10:00:00")),
            Sample::new(t("2024-05-01 10:00:01")),
        ];
        sort_by_time(&mut samples);
        let order: Vec<_> = samples
            .iter()
            .map(|s| s.timestamp.format("%S").to_string())
            .collect();
        assert_eq!(order, vec!["00", "01", "02"]);
    }
}
