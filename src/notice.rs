//! Purpose: Define a stable, structured schema for non-fatal stderr notices.
//! Exports: `Notice`, `notice_json`.
//! Role: Shared contract helper for CLI diagnostics such as absorbed date failures.
//! Invariants: Notices are non-fatal and never alter stdout payloads.
//! Invariants: JSON schema is stable once published; fields are additive-only.
use crate::core::codec::AbsorbedFailure;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: String,
    pub time: String,
    pub cmd: String,
    pub record: String,
    pub message: String,
    pub details: Map<String, Value>,
}

impl Notice {
    /// Describes an optional date-time field that decoded to its zero value.
    pub fn from_absorbed(failure: &AbsorbedFailure, cmd: &str, time: String) -> Self {
        let mut details = Map::new();
        details.insert("field".to_string(), json!(failure.field));
        details.insert("raw".to_string(), json!(failure.raw));
        details.insert("reason".to_string(), json!(failure.reason));
        Self {
            kind: "date_fallback".to_string(),
            time,
            cmd: cmd.to_string(),
            record: failure.record.to_string(),
            message: format!(
                "unparseable date-time in `{}` replaced with the zero value",
                failure.field
            ),
            details,
        }
    }
}

pub fn notice_json(notice: &Notice) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(notice.kind));
    inner.insert("time".to_string(), json!(notice.time));
    inner.insert("cmd".to_string(), json!(notice.cmd));
    inner.insert("record".to_string(), json!(notice.record));
    inner.insert("message".to_string(), json!(notice.message));
    inner.insert("details".to_string(), Value::Object(notice.details.clone()));

    let mut outer = Map::new();
    outer.insert("notice".to_string(), Value::Object(inner));
    Value::Object(outer)
}
