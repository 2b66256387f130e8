//! Wire shapes for the backend CRUD surface, plus the pure half of the
//! data client: normalizing list responses and classifying failures.

use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::warn;

use crate::category::Category;
use crate::logbuf::LogEntry;
use crate::task::{Priority, ProgressRecord, Status, Task};

/// Outcome of normalizing a list-shaped read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    WellFormed,
    /// The payload was missing, not a sequence, or contained elements
    /// that failed to decode. The caller gets whatever survived and is
    /// expected to log a warning; the user never sees a type error.
    Malformed,
}

/// `GET /tasks` returns `{ "tasks": [...] }`.
pub fn tasks_from_response(value: Value) -> (Vec<Task>, ListShape) {
    list_from_response(value, "tasks")
}

/// `GET /categories` returns `{ "categories": [...] }`.
pub fn categories_from_response(value: Value) -> (Vec<Category>, ListShape) {
    list_from_response(value, "categories")
}

fn list_from_response<T: DeserializeOwned>(mut value: Value, key: &str) -> (Vec<T>, ListShape) {
    let Some(items) = value.get_mut(key).map(Value::take) else {
        warn!(key, "list response missing payload key");
        return (vec![], ListShape::Malformed);
    };
    let Value::Array(items) = items else {
        warn!(key, "list payload is not a sequence");
        return (vec![], ListShape::Malformed);
    };

    let total = items.len();
    let parsed: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    let shape = if parsed.len() == total {
        ListShape::WellFormed
    } else {
        warn!(key, dropped = total - parsed.len(), "dropped malformed list elements");
        ListShape::Malformed
    };
    (parsed, shape)
}

/// Failure taxonomy for one request/response round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No usable response at all.
    Transport(String),
    /// The backend answered with a failure status, possibly carrying a
    /// structured message.
    Status { code: u16, message: Option<String> },
}

impl ApiError {
    /// The one application error the UI words specially: a duplicate
    /// category name.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Status { code: 409, .. })
    }

    /// Server-supplied message when there is one, otherwise the raw
    /// transport or status description.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(detail) => detail.clone(),
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Status { code, .. } => format!("request failed with status {code}"),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(detail) => write!(f, "transport error: {detail}"),
            ApiError::Status { code, message } => match message {
                Some(message) => write!(f, "backend error {code}: {message}"),
                None => write!(f, "backend error {code}"),
            },
        }
    }
}

impl std::error::Error for ApiError {}

/// Writable task fields, sent whole on both create and update.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TaskPayload {
    pub title: String,
    pub category_id: Option<String>,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub status: Status,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub progress_records: Vec<ProgressRecord>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryPayload {
    pub name: String,
    pub color: String,
}

/// Envelope for the fire-and-forget `POST /logs` upload.
#[derive(Debug, Clone, Serialize)]
pub struct LogUpload {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub log: LogEntry,
}

impl LogUpload {
    pub fn new(log: LogEntry) -> Self {
        Self {
            kind: "frontend",
            log,
        }
    }
}

/// Extracts a structured failure message from an error response body,
/// when the backend sent one.
pub fn error_message_from_body(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        ApiError, ListShape, LogUpload, categories_from_response, error_message_from_body,
        tasks_from_response,
    };
    use crate::logbuf::{LogEntry, LogLevel};

    #[test]
    fn non_sequence_task_payload_degrades_to_empty() {
        let (tasks, shape) = tasks_from_response(json!({ "tasks": "not-an-array" }));
        assert!(tasks.is_empty());
        assert_eq!(shape, ListShape::Malformed);
    }

    #[test]
    fn missing_payload_key_degrades_to_empty() {
        let (categories, shape) = categories_from_response(json!({ "data": [] }));
        assert!(categories.is_empty());
        assert_eq!(shape, ListShape::Malformed);
    }

    #[test]
    fn well_formed_lists_pass_through() {
        let (tasks, shape) = tasks_from_response(json!({
            "tasks": [{
                "id": "t1",
                "title": "Write report",
                "priority": "high",
                "status": "todo",
                "updated_at": "2026-08-26T08:00:00Z"
            }]
        }));
        assert_eq!(shape, ListShape::WellFormed);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Write report");
    }

    #[test]
    fn malformed_elements_are_dropped_not_fatal() {
        let (categories, shape) = categories_from_response(json!({
            "categories": [
                { "id": "c1", "name": "Work", "color": "#123456" },
                { "name": 42 },
            ]
        }));
        assert_eq!(categories.len(), 1);
        assert_eq!(shape, ListShape::Malformed);
    }

    #[test]
    fn conflict_detection_is_status_409_only() {
        let conflict = ApiError::Status {
            code: 409,
            message: None,
        };
        let other = ApiError::Status {
            code: 500,
            message: Some("boom".to_string()),
        };
        assert!(conflict.is_conflict());
        assert!(!other.is_conflict());
        assert!(!ApiError::Transport("offline".to_string()).is_conflict());
        assert_eq!(other.user_message(), "boom");
    }

    #[test]
    fn error_message_extraction_skips_blank_messages() {
        assert_eq!(
            error_message_from_body(&json!({ "message": "name taken" })),
            Some("name taken".to_string())
        );
        assert_eq!(error_message_from_body(&json!({ "message": "  " })), None);
        assert_eq!(error_message_from_body(&json!({})), None);
    }

    #[test]
    fn log_upload_is_tagged_as_frontend() {
        let upload = LogUpload::new(LogEntry::new(LogLevel::Error, "boom", None));
        let value = serde_json::to_value(&upload).expect("serialize");
        assert_eq!(value["type"], "frontend");
        assert_eq!(value["log"]["level"], "error");
    }
}
