use chrono::NaiveDate;
use taskdeck_core::category::Category;
use taskdeck_core::format::{
    due_class, due_label, priority_icon, priority_label, status_icon, status_label,
};
use taskdeck_core::task::{Status, Task};
use yew::{Callback, Html, MouseEvent, Properties, classes, function_component, html};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
    pub task: Task,
    pub category: Option<Category>,
    pub today: NaiveDate,
    pub on_open: Callback<String>,
    pub on_delete: Callback<String>,
}

#[function_component(TaskListRow)]
pub fn task_list_row(props: &TaskListRowProps) -> Html {
    let task = &props.task;

    let on_open = {
        let on_open = props.on_open.clone();
        let id = task.id.clone();
        Callback::from(move |_: MouseEvent| on_open.emit(id.clone()))
    };
    let on_delete = {
        let on_delete = props.on_delete.clone();
        let id = task.id.clone();
        Callback::from(move |event: MouseEvent| {
            // The row's own click opens the editor; keep delete from
            // bubbling into it.
            event.stop_propagation();
            on_delete.emit(id.clone());
        })
    };

    let due = due_label(task.due_date);
    let due_style = due_class(task.due_date, task.status, props.today);

    html! {
        <div
            class={classes!("row", (task.status == Status::Completed).then_some("done"))}
            onclick={on_open}
        >
            <span class="status" title={status_label(task.status)}>
                { status_icon(task.status) }
            </span>
            <span class="priority" title={priority_label(task.priority)}>
                { priority_icon(task.priority) }
            </span>
            <span class="title">{ task.title.clone() }</span>
            {
                props.category.as_ref().map(|category| html! {
                    <span
                        class="badge category"
                        style={format!("border-color:{}", category.color)}
                    >
                        { category.name.clone() }
                    </span>
                }).unwrap_or_default()
            }
            {
                for task.tags.iter().map(|tag| html! {
                    <span class="badge tag">{ tag.clone() }</span>
                })
            }
            if !due.is_empty() {
                <span class={classes!("due", due_style)}>{ due }</span>
            }
            <button class="row-delete" type="button" onclick={on_delete} title="Delete task">
                { "✕" }
            </button>
        </div>
    }
}
