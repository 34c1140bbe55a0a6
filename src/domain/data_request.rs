// Incoming write request body
use super::data_point::{DataPoint, PointError};
use serde_json::{Map, Value, json};

pub const DEFAULT_MEASUREMENT: &str = "sensor_data";
pub const SENSOR_TAG: &str = "sensor_id";

/// Body of a create/update request. Every part is optional and falls back
/// to a default when missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataRequest {
    pub measurement: Option<String>,
    pub tags: Option<Map<String, Value>>,
    pub fields: Option<Map<String, Value>>,
}

impl DataRequest {
    /// Parse a raw request body. Empty bodies, malformed JSON and anything
    /// that is not a JSON object are treated as `{}`.
    pub fn from_body(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::default();
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Self::from_object(map),
            Ok(_) => {
                tracing::debug!("Request body is not a JSON object, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::debug!("Ignoring malformed request body: {}", e);
                Self::default()
            }
        }
    }

    fn from_object(mut map: Map<String, Value>) -> Self {
        let measurement = match map.remove("measurement") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };
        let tags = match map.remove("tags") {
            Some(Value::Object(tags)) => Some(tags),
            _ => None,
        };
        let fields = match map.remove("fields") {
            Some(Value::Object(fields)) => Some(fields),
            _ => None,
        };

        Self {
            measurement,
            tags,
            fields,
        }
    }

    /// Build the point to write, tagging it with `default_sensor_id` when the
    /// request carries no tags at all.
    pub fn into_point(self, default_sensor_id: &str) -> Result<DataPoint, PointError> {
        let measurement = self
            .measurement
            .unwrap_or_else(|| DEFAULT_MEASUREMENT.to_string());
        let tags = self.tags.unwrap_or_else(|| {
            let mut tags = Map::new();
            tags.insert(SENSOR_TAG.to_string(), json!(default_sensor_id));
            tags
        });
        let fields = self.fields.unwrap_or_else(|| {
            let mut fields = Map::new();
            fields.insert("value".to_string(), json!(0));
            fields
        });

        DataPoint::new(&measurement, &tags, &fields)
    }
}
