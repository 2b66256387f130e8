use yew::{Callback, Html, Properties, TargetCast, classes, function_component, html};

use taskdeck_core::category::Category;

/// How many tasks fall into each status tier, shown as badges next to
/// the tier labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TierCounts {
    pub all: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
    pub due_soon: usize,
}

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub active_view: String,
    pub on_view: Callback<String>,
    pub status_filter: String,
    pub on_status: Callback<String>,
    pub counts: TierCounts,
    pub categories: Vec<Category>,
    /// Selected category id, or "all".
    pub category_filter: String,
    pub on_category: Callback<String>,
    pub new_category_name: String,
    pub on_new_category_input: Callback<String>,
    pub on_create_category: Callback<()>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let view_item = |key: &'static str, label: &'static str| {
        let active = props.active_view == key;
        let on_view = props.on_view.clone();
        html! {
            <div
                class={classes!("item", active.then_some("active"))}
                onclick={move |_| on_view.emit(key.to_string())}
            >
                { label }
            </div>
        }
    };

    let tier_item = |key: &'static str, label: &'static str, count: usize| {
        let active = props.status_filter == key;
        let on_status = props.on_status.clone();
        html! {
            <div
                class={classes!("item", active.then_some("active"))}
                onclick={move |_| on_status.emit(key.to_string())}
            >
                <span>{ label }</span>
                <span class="count">{ count }</span>
            </div>
        }
    };

    let category_item = |id: String, label: Html, active: bool| {
        let on_category = props.on_category.clone();
        html! {
            <div
                class={classes!("item", active.then_some("active"))}
                onclick={move |_| on_category.emit(id.clone())}
            >
                { label }
            </div>
        }
    };

    let on_name_input = {
        let on_input = props.on_new_category_input.clone();
        Callback::from(move |event: web_sys::InputEvent| {
            let input: web_sys::HtmlInputElement = event.target_unchecked_into();
            on_input.emit(input.value());
        })
    };
    let on_submit = {
        let on_create = props.on_create_category.clone();
        Callback::from(move |event: web_sys::SubmitEvent| {
            event.prevent_default();
            on_create.emit(());
        })
    };

    html! {
        <div class="panel sidebar">
            <div class="header">{ "Views" }</div>
            { view_item("tasks", "Tasks") }
            { view_item("calendar", "Calendar") }
            { view_item("stats", "Stats") }

            <div class="header">{ "Filters" }</div>
            { tier_item("all", "All", props.counts.all) }
            { tier_item("todo", "To Do", props.counts.todo) }
            { tier_item("in_progress", "In Progress", props.counts.in_progress) }
            { tier_item("completed", "Completed", props.counts.completed) }
            { tier_item("overdue", "Overdue", props.counts.overdue) }
            { tier_item("due_soon", "Due Today", props.counts.due_soon) }

            <div class="header">{ "Categories" }</div>
            {
                category_item(
                    "all".to_string(),
                    html! { <span>{ "All categories" }</span> },
                    props.category_filter == "all",
                )
            }
            {
                for props.categories.iter().map(|category| {
                    let label = html! {
                        <>
                            <span
                                class="swatch"
                                style={format!("background:{}", category.color)}
                            />
                            <span>{ category.name.clone() }</span>
                        </>
                    };
                    category_item(
                        category.id.clone(),
                        label,
                        props.category_filter == category.id,
                    )
                })
            }

            <form class="new-category" onsubmit={on_submit}>
                <input
                    placeholder="New category"
                    value={props.new_category_name.clone()}
                    oninput={on_name_input}
                />
                <button type="submit">{ "+" }</button>
            </form>
        </div>
    }
}
