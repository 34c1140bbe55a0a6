// Delete request sent to the time-series store
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;

/// Matches points of one measurement carrying a given tag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePredicate {
    pub measurement: String,
    pub tag_key: String,
    pub tag_value: String,
}

impl DeletePredicate {
    pub fn new(measurement: &str, tag_key: &str, tag_value: &str) -> Self {
        Self {
            measurement: measurement.to_string(),
            tag_key: tag_key.to_string(),
            tag_value: tag_value.to_string(),
        }
    }
}

impl fmt::Display for DeletePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "_measurement=\"{}\" AND {}=\"{}\"",
            quote_escape(&self.measurement),
            self.tag_key,
            quote_escape(&self.tag_value)
        )
    }
}

fn quote_escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteRequest {
    pub start: String,
    pub stop: String,
    pub predicate: String,
}

impl DeleteRequest {
    pub fn new(predicate: &DeletePredicate, start: DateTime<Utc>, stop: DateTime<Utc>) -> Self {
        Self {
            start: start.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            stop: stop.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            predicate: predicate.to_string(),
        }
    }

    /// Everything from the Unix epoch up to `now`.
    pub fn all_time(predicate: &DeletePredicate, now: DateTime<Utc>) -> Self {
        Self::new(predicate, DateTime::<Utc>::UNIX_EPOCH, now)
    }
}
