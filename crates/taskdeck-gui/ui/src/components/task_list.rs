use std::collections::BTreeMap;

use chrono::NaiveDate;
use taskdeck_core::category::Category;
use taskdeck_core::task::Task;
use yew::{Callback, Html, Properties, function_component, html};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
    pub tasks: Vec<Task>,
    pub categories: BTreeMap<String, Category>,
    pub today: NaiveDate,
    pub on_open: Callback<String>,
    pub on_delete: Callback<String>,
}

#[function_component(TaskList)]
pub fn task_list(props: &TaskListProps) -> Html {
    html! {
        <div class="panel list">
            <div class="header">{ "Tasks" }</div>
            if props.tasks.is_empty() {
                <div class="empty">{ "Nothing here. Adjust the filters or add a task." }</div>
            }
            {
                for props.tasks.iter().cloned().map(|task| {
                    let category = task
                        .category_id
                        .as_ref()
                        .and_then(|id| props.categories.get(id))
                        .cloned();
                    html! {
                        <TaskListRow
                            {task}
                            {category}
                            today={props.today}
                            on_open={props.on_open.clone()}
                            on_delete={props.on_delete.clone()}
                        />
                    }
                })
            }
        </div>
    }
}
