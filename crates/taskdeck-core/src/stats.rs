use chrono::NaiveDate;
use serde::Serialize;

use crate::task::{Priority, Status, Task};

/// Aggregate counts for the stats view, recomputed from the in-memory
/// list whenever that view is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub overdue: usize,
    pub due_today: usize,
}

impl TaskStats {
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        let mut stats = TaskStats {
            total: tasks.len(),
            ..TaskStats::default()
        };

        for task in tasks {
            match task.status {
                Status::Todo => stats.todo += 1,
                Status::InProgress => stats.in_progress += 1,
                Status::Completed => stats.completed += 1,
            }

            match task.priority {
                Priority::High => stats.high += 1,
                Priority::Medium => stats.medium += 1,
                Priority::Low => stats.low += 1,
            }

            if let Some(due) = task.due_date
                && task.status != Status::Completed
            {
                if due < today {
                    stats.overdue += 1;
                } else if due == today {
                    stats.due_today += 1;
                }
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::TaskStats;
    use crate::task::{Priority, Status, Task};

    #[test]
    fn counts_follow_status_priority_and_due_buckets() {
        let now = Utc
            .with_ymd_and_hms(2026, 8, 26, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let today = NaiveDate::from_ymd_opt(2026, 8, 26).expect("valid date");

        let mut overdue = Task::new("a", "a", now);
        overdue.due_date = today.pred_opt();
        overdue.priority = Priority::High;

        let mut due_today = Task::new("b", "b", now);
        due_today.due_date = Some(today);
        due_today.status = Status::InProgress;

        let mut finished = Task::new("c", "c", now);
        finished.status = Status::Completed;
        finished.priority = Priority::Low;
        // A completed task past its due date is not "overdue".
        finished.due_date = today.pred_opt();

        let stats = TaskStats::compute(&[overdue, due_today, finished], today);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.todo, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.high, 1);
        assert_eq!(stats.medium, 1);
        assert_eq!(stats.low, 1);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.due_today, 1);
    }
}
