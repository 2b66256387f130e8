use taskdeck_core::stats::TaskStats;
use yew::{Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct StatsPanelProps {
    pub stats: TaskStats,
}

#[function_component(StatsPanel)]
pub fn stats_panel(props: &StatsPanelProps) -> Html {
    let stats = &props.stats;
    let card = |label: &str, value: usize, class: &str| {
        html! {
            <div class={format!("stat-card {class}")}>
                <div class="value">{ value }</div>
                <div class="label">{ label.to_string() }</div>
            </div>
        }
    };
    let completion = if stats.total == 0 {
        0
    } else {
        stats.completed * 100 / stats.total
    };

    html! {
        <div class="stats-panel">
            <div class="stat-group">
                <div class="group-title">{ "Status" }</div>
                <div class="stat-cards">
                    { card("Total", stats.total, "total") }
                    { card("To Do", stats.todo, "todo") }
                    { card("In Progress", stats.in_progress, "in-progress") }
                    { card("Completed", stats.completed, "completed") }
                </div>
            </div>
            <div class="stat-group">
                <div class="group-title">{ "Priority" }</div>
                <div class="stat-cards">
                    { card("High", stats.high, "high") }
                    { card("Medium", stats.medium, "medium") }
                    { card("Low", stats.low, "low") }
                </div>
            </div>
            <div class="stat-group">
                <div class="group-title">{ "Schedule" }</div>
                <div class="stat-cards">
                    { card("Overdue", stats.overdue, "overdue") }
                    { card("Due Today", stats.due_today, "due-today") }
                </div>
            </div>
            <div class="stat-group">
                <div class="group-title">{ "Completion" }</div>
                <div class="completion-bar">
                    <div
                        class="completion-fill"
                        style={format!("width: {completion}%")}
                    />
                </div>
                <div class="completion-label">{ format!("{completion}%") }</div>
            </div>
        </div>
    }
}
