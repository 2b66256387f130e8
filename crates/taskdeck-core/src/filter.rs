use chrono::NaiveDate;
use tracing::trace;

use crate::task::{Priority, Status, Task};

/// Status tier shown in the sidebar. `Overdue` and `DueSoon` are
/// derived tiers: they look at the due date relative to the current
/// calendar day instead of the stored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Todo,
    InProgress,
    Completed,
    Overdue,
    DueSoon,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    UpdatedDesc,
    UpdatedAsc,
    DueAsc,
    DueDesc,
    Priority,
}

/// Current filter selections. Owned by the view controller; this module
/// only ever reads it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub status: StatusFilter,
    pub category: CategoryFilter,
    pub search: String,
    pub sort: SortKey,
}

/// Computes the ordered subset of tasks to display. Total over any
/// well-formed input: absent due dates, descriptions, and tags are
/// treated as non-matches, never as errors. Sorting is stable, so equal
/// keys keep their input order.
pub fn select_visible_tasks(tasks: &[Task], state: &FilterState, today: NaiveDate) -> Vec<Task> {
    let needle = state.search.trim().to_lowercase();

    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| matches_status(task, state.status, today))
        .filter(|task| matches_category(task, &state.category))
        .filter(|task| needle.is_empty() || matches_search(task, &needle))
        .cloned()
        .collect();

    sort_tasks(&mut visible, state.sort);

    trace!(
        input = tasks.len(),
        visible = visible.len(),
        status = ?state.status,
        sort = ?state.sort,
        "computed visible task set"
    );

    visible
}

pub fn matches_status(task: &Task, filter: StatusFilter, today: NaiveDate) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Todo => task.status == Status::Todo,
        StatusFilter::InProgress => task.status == Status::InProgress,
        StatusFilter::Completed => task.status == Status::Completed,
        StatusFilter::Overdue => {
            task.status != Status::Completed
                && task.due_date.map(|due| due < today).unwrap_or(false)
        }
        StatusFilter::DueSoon => {
            task.status != Status::Completed
                && task.due_date.map(|due| due == today).unwrap_or(false)
        }
    }
}

fn matches_category(task: &Task, filter: &CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        // Tasks without a category never match a concrete selection.
        CategoryFilter::Category(id) => task.category_id.as_deref() == Some(id.as_str()),
    }
}

fn matches_search(task: &Task, needle: &str) -> bool {
    if task.title.to_lowercase().contains(needle) {
        return true;
    }
    if task
        .description
        .as_deref()
        .map(|text| text.to_lowercase().contains(needle))
        .unwrap_or(false)
    {
        return true;
    }
    task.tags
        .iter()
        .any(|tag| tag.to_lowercase().contains(needle))
}

fn sort_tasks(tasks: &mut [Task], key: SortKey) {
    match key {
        SortKey::UpdatedDesc => tasks.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortKey::UpdatedAsc => tasks.sort_by(|a, b| a.updated_at.cmp(&b.updated_at)),
        // Undated tasks sink to the end of an ascending due list.
        SortKey::DueAsc => tasks.sort_by_key(|task| (task.due_date.is_none(), task.due_date)),
        // Descending flips both rules: undated tasks float to the front.
        SortKey::DueDesc => tasks.sort_by(|a, b| match (a.due_date, b.due_date) {
            (None, None) => std::cmp::Ordering::Equal,
            (None, Some(_)) => std::cmp::Ordering::Less,
            (Some(_), None) => std::cmp::Ordering::Greater,
            (Some(a), Some(b)) => b.cmp(&a),
        }),
        SortKey::Priority => tasks.sort_by_key(|task| priority_rank(task.priority)),
    }
}

pub fn priority_rank(priority: Priority) -> u8 {
    match priority {
        Priority::High => 0,
        Priority::Medium => 1,
        Priority::Low => 2,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    use super::{
        CategoryFilter, FilterState, SortKey, StatusFilter, matches_status, select_visible_tasks,
    };
    use crate::task::{Priority, Status, Task};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 26).expect("valid date")
    }

    fn task(id: &str) -> Task {
        let now = Utc
            .with_ymd_and_hms(2026, 8, 26, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        Task::new(id, format!("task {id}"), now)
    }

    #[test]
    fn all_filter_returns_input_unchanged_in_order() {
        let mut a = task("a");
        a.status = Status::Completed;
        let b = task("b");
        let mut c = task("c");
        c.status = Status::InProgress;
        let input = vec![a, b, c];

        let state = FilterState {
            sort: SortKey::UpdatedDesc,
            ..FilterState::default()
        };
        let visible = select_visible_tasks(&input, &state, today());

        // Identical timestamps, so the stable sort must preserve order.
        let ids: Vec<&str> = visible.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn overdue_and_due_soon_tiers_are_disjoint() {
        let mut yesterday = task("yesterday");
        yesterday.due_date = today().pred_opt();

        let mut due_today = task("today");
        due_today.due_date = Some(today());

        let mut done = task("done");
        done.due_date = today().pred_opt();
        done.status = Status::Completed;

        assert!(matches_status(&yesterday, StatusFilter::Overdue, today()));
        assert!(!matches_status(&yesterday, StatusFilter::DueSoon, today()));

        assert!(matches_status(&due_today, StatusFilter::DueSoon, today()));
        assert!(!matches_status(&due_today, StatusFilter::Overdue, today()));

        // Completed tasks never show in either derived tier.
        assert!(!matches_status(&done, StatusFilter::Overdue, today()));
        assert!(!matches_status(&done, StatusFilter::DueSoon, today()));
    }

    #[test]
    fn undated_tasks_never_match_derived_tiers() {
        let undated = task("undated");
        assert!(!matches_status(&undated, StatusFilter::Overdue, today()));
        assert!(!matches_status(&undated, StatusFilter::DueSoon, today()));
    }

    #[test]
    fn category_filter_excludes_uncategorized_tasks() {
        let mut work = task("work");
        work.category_id = Some("c-work".to_string());
        let loose = task("loose");

        let state = FilterState {
            category: CategoryFilter::Category("c-work".to_string()),
            ..FilterState::default()
        };
        let visible = select_visible_tasks(&[work, loose], &state, today());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "work");
    }

    #[test]
    fn search_matches_tags_when_title_and_description_do_not() {
        let mut tagged = task("tagged");
        tagged.title = "Quarterly review".to_string();
        tagged.tags = vec!["finance".to_string()];
        let other = task("other");

        let state = FilterState {
            search: "  FINAN  ".to_string(),
            ..FilterState::default()
        };
        let visible = select_visible_tasks(&[tagged, other], &state, today());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "tagged");
    }

    #[test]
    fn due_date_asc_sorts_undated_tasks_last() {
        let mut undated = task("undated");
        undated.due_date = None;
        let mut late = task("late");
        late.due_date = NaiveDate::from_ymd_opt(2026, 9, 10);
        let mut early = task("early");
        early.due_date = NaiveDate::from_ymd_opt(2026, 8, 1);

        let state = FilterState {
            sort: SortKey::DueAsc,
            ..FilterState::default()
        };
        let visible = select_visible_tasks(&[undated, late, early], &state, today());
        let ids: Vec<&str> = visible.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late", "undated"]);
    }

    #[test]
    fn due_date_desc_sorts_undated_tasks_first() {
        let mut late = task("late");
        late.due_date = NaiveDate::from_ymd_opt(2026, 9, 10);
        let mut early = task("early");
        early.due_date = NaiveDate::from_ymd_opt(2026, 8, 1);
        let undated = task("undated");

        let state = FilterState {
            sort: SortKey::DueDesc,
            ..FilterState::default()
        };
        let visible = select_visible_tasks(&[late, early, undated], &state, today());
        let ids: Vec<&str> = visible.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["undated", "late", "early"]);
    }

    #[test]
    fn priority_sort_groups_high_medium_low() {
        let priorities = [
            Priority::Low,
            Priority::High,
            Priority::Medium,
            Priority::High,
            Priority::Low,
            Priority::Medium,
        ];
        let tasks: Vec<Task> = priorities
            .iter()
            .enumerate()
            .map(|(index, priority)| {
                let mut t = task(&format!("t{index}"));
                t.priority = *priority;
                t
            })
            .collect();

        let state = FilterState {
            sort: SortKey::Priority,
            ..FilterState::default()
        };
        let visible = select_visible_tasks(&tasks, &state, today());
        let order: Vec<Priority> = visible.iter().map(|t| t.priority).collect();
        assert_eq!(
            order,
            vec![
                Priority::High,
                Priority::High,
                Priority::Medium,
                Priority::Medium,
                Priority::Low,
                Priority::Low,
            ]
        );
    }

    #[test]
    fn updated_at_sorts_both_directions() {
        let mut older = task("older");
        older.updated_at -= Duration::hours(2);
        let newer = task("newer");

        let desc = FilterState {
            sort: SortKey::UpdatedDesc,
            ..FilterState::default()
        };
        let visible = select_visible_tasks(&[older.clone(), newer.clone()], &desc, today());
        assert_eq!(visible[0].id, "newer");

        let asc = FilterState {
            sort: SortKey::UpdatedAsc,
            ..FilterState::default()
        };
        let visible = select_visible_tasks(&[newer, older], &asc, today());
        assert_eq!(visible[0].id, "older");
    }
}
