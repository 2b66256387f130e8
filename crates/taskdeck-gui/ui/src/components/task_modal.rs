use chrono::Utc;
use taskdeck_core::category::Category;
use taskdeck_core::task::{Priority, ProgressRecord, Status, Task};
use yew::{Callback, Html, Properties, TargetCast, function_component, html};

/// Draft being edited in the modal. Mirrors the form exactly: saving
/// reads this draft (including the progress records as currently
/// shown) back into one whole-task payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState {
    pub mode: ModalMode,
    pub title: String,
    pub description: String,
    /// Category id, empty string for "no category".
    pub category_id: String,
    pub priority: Priority,
    pub status: Status,
    /// Due date text in `YYYY-MM-DD`, empty for none.
    pub due_date: String,
    /// Comma-separated tag input.
    pub tags: String,
    pub progress_records: Vec<ProgressRecord>,
    pub progress_draft: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit(String),
}

impl ModalState {
    pub fn create() -> Self {
        Self {
            mode: ModalMode::Create,
            title: String::new(),
            description: String::new(),
            category_id: String::new(),
            priority: Priority::default(),
            status: Status::default(),
            due_date: String::new(),
            tags: String::new(),
            progress_records: vec![],
            progress_draft: String::new(),
            error: None,
        }
    }

    /// Materializes the draft from a task's current in-memory
    /// snapshot, progress records in stored order.
    pub fn edit(task: &Task) -> Self {
        Self {
            mode: ModalMode::Edit(task.id.clone()),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            category_id: task.category_id.clone().unwrap_or_default(),
            priority: task.priority,
            status: task.status,
            due_date: task
                .due_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            tags: task.tags.join(", "),
            progress_records: task.progress_records.clone(),
            progress_draft: String::new(),
            error: None,
        }
    }

    /// Moves the pending progress text into the record list, stamped
    /// with the client clock.
    pub fn add_progress(&mut self) {
        let text = self.progress_draft.trim();
        if text.is_empty() {
            return;
        }
        self.progress_records.push(ProgressRecord {
            text: text.to_string(),
            created_at: Utc::now(),
        });
        self.progress_draft.clear();
    }
}

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
    pub state: ModalState,
    pub categories: Vec<Category>,
    pub busy: bool,
    pub on_change: Callback<ModalState>,
    pub on_save: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(TaskModal)]
pub fn task_modal(props: &TaskModalProps) -> Html {
    let state = props.state.clone();
    let heading = match state.mode {
        ModalMode::Create => "New Task",
        ModalMode::Edit(_) => "Task Details",
    };

    let input_field = |apply: fn(&mut ModalState, String)| {
        let state = state.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |event: web_sys::InputEvent| {
            let value = event
                .target_unchecked_into::<web_sys::HtmlInputElement>()
                .value();
            let mut next = state.clone();
            apply(&mut next, value);
            on_change.emit(next);
        })
    };
    let select_field = |apply: fn(&mut ModalState, String)| {
        let state = state.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |event: web_sys::Event| {
            let value = event
                .target_unchecked_into::<web_sys::HtmlSelectElement>()
                .value();
            let mut next = state.clone();
            apply(&mut next, value);
            on_change.emit(next);
        })
    };
    let on_description = {
        let state = state.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |event: web_sys::InputEvent| {
            let value = event
                .target_unchecked_into::<web_sys::HtmlTextAreaElement>()
                .value();
            let mut next = state.clone();
            next.description = value;
            on_change.emit(next);
        })
    };
    let on_add_progress = {
        let state = state.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |event: web_sys::SubmitEvent| {
            event.prevent_default();
            let mut next = state.clone();
            next.add_progress();
            on_change.emit(next);
        })
    };
    let on_save = {
        let on_save = props.on_save.clone();
        Callback::from(move |_: web_sys::MouseEvent| on_save.emit(()))
    };
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: web_sys::MouseEvent| on_cancel.emit(()))
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal">
                <div class="header">{ heading }</div>

                <label>{ "Title" }</label>
                <input
                    value={state.title.clone()}
                    oninput={input_field(|draft, value| draft.title = value)}
                />

                <label>{ "Description" }</label>
                <textarea value={state.description.clone()} oninput={on_description} />

                <div class="field-row">
                    <div>
                        <label>{ "Category" }</label>
                        <select onchange={select_field(|draft, value| draft.category_id = value)}>
                            <option value="" selected={state.category_id.is_empty()}>
                                { "No category" }
                            </option>
                            {
                                for props.categories.iter().map(|category| html! {
                                    <option
                                        value={category.id.clone()}
                                        selected={state.category_id == category.id}
                                    >
                                        { category.name.clone() }
                                    </option>
                                })
                            }
                        </select>
                    </div>
                    <div>
                        <label>{ "Priority" }</label>
                        <select onchange={select_field(|draft, value| {
                            draft.priority = match value.as_str() {
                                "high" => Priority::High,
                                "low" => Priority::Low,
                                _ => Priority::Medium,
                            };
                        })}>
                            <option value="high" selected={state.priority == Priority::High}>{ "High" }</option>
                            <option value="medium" selected={state.priority == Priority::Medium}>{ "Medium" }</option>
                            <option value="low" selected={state.priority == Priority::Low}>{ "Low" }</option>
                        </select>
                    </div>
                    <div>
                        <label>{ "Status" }</label>
                        <select onchange={select_field(|draft, value| {
                            draft.status = match value.as_str() {
                                "in_progress" => Status::InProgress,
                                "completed" => Status::Completed,
                                _ => Status::Todo,
                            };
                        })}>
                            <option value="todo" selected={state.status == Status::Todo}>{ "To Do" }</option>
                            <option value="in_progress" selected={state.status == Status::InProgress}>{ "In Progress" }</option>
                            <option value="completed" selected={state.status == Status::Completed}>{ "Completed" }</option>
                        </select>
                    </div>
                    <div>
                        <label>{ "Due date" }</label>
                        <input
                            type="date"
                            value={state.due_date.clone()}
                            oninput={input_field(|draft, value| draft.due_date = value)}
                        />
                    </div>
                </div>

                <label>{ "Tags (comma-separated)" }</label>
                <input
                    value={state.tags.clone()}
                    oninput={input_field(|draft, value| draft.tags = value)}
                />

                <label>{ "Progress" }</label>
                <div class="progress-records">
                    {
                        for state.progress_records.iter().map(|record| html! {
                            <div class="progress-record">
                                <span class="when">
                                    { record.created_at.format("%Y-%m-%d %H:%M").to_string() }
                                </span>
                                <span>{ record.text.clone() }</span>
                            </div>
                        })
                    }
                </div>
                <form class="progress-add" onsubmit={on_add_progress}>
                    <input
                        placeholder="Add a progress note"
                        value={state.progress_draft.clone()}
                        oninput={input_field(|draft, value| draft.progress_draft = value)}
                    />
                    <button type="submit">{ "Add" }</button>
                </form>

                {
                    state.error.as_ref().map(|error| html! {
                        <div class="form-error">{ error.clone() }</div>
                    }).unwrap_or_default()
                }

                <div class="modal-actions">
                    <button type="button" disabled={props.busy} onclick={on_save}>
                        { "Save" }
                    </button>
                    <button type="button" class="secondary" onclick={on_cancel}>
                        { "Cancel" }
                    </button>
                </div>
            </div>
        </div>
    }
}
