use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Position report published by trackers on the pings topic.
#[derive(Debug, Deserialize)]
pub struct GpsPingMessage {
    pub uuid: Option<String>,
    #[serde(default, deserialize_with = "parse_i64_option")]
    pub vehicle_id: Option<i64>,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl GpsPingMessage {
    pub fn correlation_id(&self) -> Option<Uuid> {
        self.uuid.as_deref().and_then(|s| Uuid::parse_str(s).ok())
    }

    pub fn timestamp_str(&self) -> Option<&str> {
        self.timestamp
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOr<T> {
    String(String),
    Value(T),
}

pub(crate) fn parse_f64_option<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<StringOr<f64>> = Option::deserialize(deserializer)?;
    match v {
        Some(StringOr::Value(f)) => Ok(Some(f)),
        Some(StringOr::String(s)) => {
            if s.trim().is_empty() {
                Ok(None)
            } else {
                s.trim().parse::<f64>().map(Some).map_err(serde::de::Error::custom)
            }
        }
        None => Ok(None),
    }
}

pub(crate) fn parse_i64_option<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<StringOr<i64>> = Option::deserialize(deserializer)?;
    match v {
        Some(StringOr::Value(n)) => Ok(Some(n)),
        Some(StringOr::String(s)) => {
            if s.trim().is_empty() {
                Ok(None)
            } else {
                s.trim().parse::<i64>().map(Some).map_err(serde::de::Error::custom)
            }
        }
        None => Ok(None),
    }
}
