// Data point domain model and line protocol encoding
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PointError {
    #[error("measurement name must not be empty")]
    EmptyMeasurement,
    #[error("a data point needs at least one field")]
    NoFields,
    #[error("field '{0}' must be a number, boolean or string")]
    UnsupportedField(String),
    #[error("tag '{0}' must be a number, boolean or string")]
    UnsupportedTag(String),
    #[error("line break in {0}")]
    LineBreak(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(Number),
    Boolean(bool),
    Text(String),
}

impl FieldValue {
    fn from_json(key: &str, value: &Value) -> Result<Self, PointError> {
        match value {
            Value::Number(n) => Ok(FieldValue::Number(n.clone())),
            Value::Bool(b) => Ok(FieldValue::Boolean(*b)),
            Value::String(s) => Ok(FieldValue::Text(s.clone())),
            _ => Err(PointError::UnsupportedField(key.to_string())),
        }
    }

    fn write_to(&self, out: &mut String) {
        match self {
            // Unsuffixed numbers are stored as floats
            FieldValue::Number(n) => out.push_str(&n.to_string()),
            FieldValue::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            FieldValue::Text(s) => {
                out.push('"');
                for c in s.chars() {
                    if c == '"' || c == '\\' {
                        out.push('\\');
                    }
                    out.push(c);
                }
                out.push('"');
            }
        }
    }
}

/// A single measurement ready to be written without a timestamp; the
/// database assigns one on arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub measurement: String,
    pub tags: BTreeMap<String, String>,
    pub fields: BTreeMap<String, FieldValue>,
}

impl DataPoint {
    pub fn new(
        measurement: &str,
        tags: &Map<String, Value>,
        fields: &Map<String, Value>,
    ) -> Result<Self, PointError> {
        if measurement.is_empty() {
            return Err(PointError::EmptyMeasurement);
        }
        reject_line_break("measurement", measurement)?;

        let mut tag_set = BTreeMap::new();
        for (key, value) in tags {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return Err(PointError::UnsupportedTag(key.clone())),
            };
            reject_line_break("tag key", key)?;
            reject_line_break(&format!("tag '{}'", key), &value)?;
            // Empty tag values are not representable in line protocol
            if !value.is_empty() {
                tag_set.insert(key.clone(), value);
            }
        }

        let field_set = fields
            .iter()
            .map(|(key, value)| {
                reject_line_break("field key", key)?;
                FieldValue::from_json(key, value).map(|v| (key.clone(), v))
            })
            .collect::<Result<BTreeMap<_, _>, PointError>>()?;

        if field_set.is_empty() {
            return Err(PointError::NoFields);
        }

        Ok(Self {
            measurement: measurement.to_string(),
            tags: tag_set,
            fields: field_set,
        })
    }

    /// Encode as `measurement[,tag=value...] field=value[,field=value...]`
    pub fn to_line_protocol(&self) -> String {
        let mut line = String::new();
        escape_into(&mut line, &self.measurement, &[',', ' ']);

        for (key, value) in &self.tags {
            line.push(',');
            escape_into(&mut line, key, &[',', '=', ' ']);
            line.push('=');
            escape_into(&mut line, value, &[',', '=', ' ']);
        }

        line.push(' ');
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            escape_into(&mut line, key, &[',', '=', ' ']);
            line.push('=');
            value.write_to(&mut line);
        }

        line
    }
}

/// Line protocol has no escape for line breaks outside string field values
fn reject_line_break(what: &str, raw: &str) -> Result<(), PointError> {
    if raw.contains(['\n', '\r']) {
        return Err(PointError::LineBreak(what.to_string()));
    }
    Ok(())
}

fn escape_into(out: &mut String, raw: &str, special: &[char]) {
    for c in raw.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
}
