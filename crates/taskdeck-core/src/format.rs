//! Pure display lookups shared by the list, calendar, and stats views.

use chrono::NaiveDate;

use crate::task::{Priority, Status};

pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Todo => "\u{25cb}",       // ○
        Status::InProgress => "\u{25d0}", // ◐
        Status::Completed => "\u{25cf}",  // ●
    }
}

pub fn status_label(status: Status) -> &'static str {
    match status {
        Status::Todo => "To Do",
        Status::InProgress => "In Progress",
        Status::Completed => "Completed",
    }
}

pub fn priority_icon(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "\u{1f534}",   // red circle
        Priority::Medium => "\u{1f7e1}", // yellow circle
        Priority::Low => "\u{1f7e2}",    // green circle
    }
}

pub fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "High",
        Priority::Medium => "Medium",
        Priority::Low => "Low",
    }
}

/// Display string for a due date; empty when the task has none.
pub fn due_label(due: Option<NaiveDate>) -> String {
    due.map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// CSS class for a list row's due badge relative to the current day.
pub fn due_class(due: Option<NaiveDate>, status: Status, today: NaiveDate) -> &'static str {
    if status == Status::Completed {
        return "";
    }
    match due {
        Some(date) if date < today => "overdue",
        Some(date) if date == today => "due-today",
        _ => "",
    }
}

/// Escapes markup metacharacters for contexts that assemble display
/// strings by hand rather than through the renderer.
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{due_class, due_label, escape_text, priority_label, status_icon, status_label};
    use crate::task::{Priority, Status};

    #[test]
    fn lookups_cover_every_variant() {
        assert_eq!(status_label(Status::InProgress), "In Progress");
        assert_eq!(priority_label(Priority::High), "High");
        assert!(!status_icon(Status::Completed).is_empty());
    }

    #[test]
    fn due_label_is_empty_without_a_date() {
        assert_eq!(due_label(None), "");
        assert_eq!(
            due_label(NaiveDate::from_ymd_opt(2026, 8, 26)),
            "2026-08-26"
        );
    }

    #[test]
    fn due_class_ignores_completed_tasks() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 26).expect("valid date");
        assert_eq!(due_class(today.pred_opt(), Status::Todo, today), "overdue");
        assert_eq!(due_class(Some(today), Status::Todo, today), "due-today");
        assert_eq!(due_class(today.pred_opt(), Status::Completed, today), "");
        assert_eq!(due_class(None, Status::Todo, today), "");
    }

    #[test]
    fn escape_text_neutralizes_markup() {
        assert_eq!(
            escape_text(r#"<b onload="x">&'"#),
            "&lt;b onload=&quot;x&quot;&gt;&amp;&#39;"
        );
        assert_eq!(escape_text("plain text"), "plain text");
    }
}
