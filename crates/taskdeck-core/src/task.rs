use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl<'de> Deserialize<'de> for Priority {
    // The backend only emits high/medium/low, but a task with an
    // unrecognized priority must still load and rank as medium rather
    // than knocking the whole task out of the list.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressRecord {
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,

    pub title: String,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category_id: Option<String>,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub status: Status,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub progress_records: Vec<ProgressRecord>,

    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category_id: None,
            priority: Priority::default(),
            due_date: None,
            status: Status::default(),
            description: None,
            tags: vec![],
            progress_records: vec![],
            updated_at: now,
        }
    }
}

// The original backend encodes "no category" as an empty string in some
// records and null in others; both collapse to None here.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::{Priority, Status, Task};

    #[test]
    fn lenient_wire_fields_deserialize() {
        let raw = serde_json::json!({
            "id": "t1",
            "title": "Ship release",
            "category_id": "",
            "priority": "urgent",
            "status": "in_progress",
            "updated_at": "2026-08-01T09:30:00Z"
        });

        let task: Task = serde_json::from_value(raw).expect("task should deserialize");
        assert_eq!(task.category_id, None);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, Status::InProgress);
        assert!(task.due_date.is_none());
        assert!(task.tags.is_empty());
        assert!(task.progress_records.is_empty());
    }

    #[test]
    fn status_uses_snake_case_wire_names() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).expect("serialize"),
            "\"in_progress\""
        );
    }
}
