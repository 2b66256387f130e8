use chrono::NaiveDate;
use serde_json::json;
use taskdeck_core::api::{ListShape, tasks_from_response};
use taskdeck_core::filter::{FilterState, SortKey, StatusFilter, select_visible_tasks};
use taskdeck_core::task::Priority;

// A freshly created high-priority task comes back through a reload and
// must surface at the head of the todo view under priority sort, ahead
// of every pre-existing medium and low task.
#[test]
fn created_task_leads_the_todo_view_under_priority_sort() {
    let today = NaiveDate::from_ymd_opt(2026, 8, 26).expect("valid date");

    // The reload after a successful create replaces the whole in-memory
    // list with what the backend returns.
    let (reloaded, shape) = tasks_from_response(json!({
        "tasks": [
            { "id": "t1", "title": "Refill coffee", "priority": "medium",
              "status": "todo", "updated_at": "2026-08-26T09:00:00Z" },
            { "id": "t2", "title": "Water plants", "priority": "low",
              "status": "todo", "updated_at": "2026-08-26T09:00:00Z" },
            { "id": "t3", "title": "File expenses", "priority": "medium",
              "status": "completed", "updated_at": "2026-08-26T09:00:00Z" },
            { "id": "t4", "title": "Write report", "priority": "high",
              "status": "todo", "updated_at": "2026-08-26T10:00:00Z" },
        ]
    }));
    assert_eq!(shape, ListShape::WellFormed);
    assert_eq!(reloaded.len(), 4);

    let state = FilterState {
        status: StatusFilter::Todo,
        sort: SortKey::Priority,
        ..FilterState::default()
    };
    let visible = select_visible_tasks(&reloaded, &state, today);

    let titles: Vec<&str> = visible.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Write report", "Refill coffee", "Water plants"]);
    assert_eq!(visible[0].priority, Priority::High);
}
