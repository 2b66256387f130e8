//! View controller: owns the loaded task and category lists, the
//! filter selections, the modal and toast state, and every call into
//! the data client. Components below this are render-only.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::{NaiveDate, Utc};
use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use taskdeck_core::api::{ApiError, TaskPayload};
use taskdeck_core::category::{Category, random_color};
use taskdeck_core::config;
use taskdeck_core::filter::{
    CategoryFilter, FilterState, SortKey, StatusFilter, matches_status, select_visible_tasks,
};
use taskdeck_core::logbuf::LogDetail;
use taskdeck_core::stats::TaskStats;
use taskdeck_core::task::Task;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;
use yew::{
    Callback, Html, TargetCast, UseStateHandle, function_component, html, use_effect_with,
    use_memo, use_state,
};

use crate::api::ApiClient;
use crate::components::{
    CalendarMonth, LogViewer, ModalMode, ModalState, Sidebar, StatsPanel, TaskList, TaskModal,
    TierCounts, Toast, ToastMessage, WindowChrome,
};
use crate::logger::UiLogger;

const TOAST_DISMISS_MS: u32 = 4000;

fn status_filter_from_key(key: &str) -> StatusFilter {
    match key {
        "todo" => StatusFilter::Todo,
        "in_progress" => StatusFilter::InProgress,
        "completed" => StatusFilter::Completed,
        "overdue" => StatusFilter::Overdue,
        "due_soon" => StatusFilter::DueSoon,
        _ => StatusFilter::All,
    }
}

fn sort_key_from_key(key: &str) -> SortKey {
    match key {
        "updated_asc" => SortKey::UpdatedAsc,
        "due_asc" => SortKey::DueAsc,
        "due_desc" => SortKey::DueDesc,
        "priority" => SortKey::Priority,
        _ => SortKey::UpdatedDesc,
    }
}

fn category_filter_from_key(key: &str) -> CategoryFilter {
    if key == "all" {
        CategoryFilter::All
    } else {
        CategoryFilter::Category(key.to_string())
    }
}

/// Refetches both lists concurrently and applies them together. If
/// either fetch fails neither list changes, so the screen never shows
/// tasks pointing at categories from another load.
async fn reload_all(
    api: &ApiClient,
    tasks: &UseStateHandle<Rc<Vec<Task>>>,
    categories: &UseStateHandle<Rc<Vec<Category>>>,
) -> Result<(), ApiError> {
    let (loaded_tasks, loaded_categories) =
        futures::join!(api.list_tasks(), api.list_categories());
    let loaded_tasks = loaded_tasks?;
    let loaded_categories = loaded_categories?;
    tasks.set(Rc::new(loaded_tasks));
    categories.set(Rc::new(loaded_categories));
    Ok(())
}

#[function_component(App)]
pub fn app() -> Html {
    let services = use_memo((), |_| {
        let config = config::embedded();
        let base_url = config.backend.base_url().to_string();
        let logger = UiLogger::new(&base_url);
        let api = ApiClient::new(&base_url, logger.clone());
        (api, logger)
    });
    let (api, logger) = (*services).clone();

    let active_view = use_state(|| "tasks".to_string());
    let status_filter = use_state(|| "all".to_string());
    let category_filter = use_state(|| "all".to_string());
    let search = use_state(String::new);
    let sort_key = use_state(|| "updated_desc".to_string());

    let tasks = use_state(|| Rc::new(Vec::<Task>::new()));
    let categories = use_state(|| Rc::new(Vec::<Category>::new()));
    let loading = use_state(|| false);

    let modal = use_state(|| Option::<ModalState>::None);
    let new_category_name = use_state(String::new);

    let toast = use_state(|| Option::<ToastMessage>::None);
    // Shared counter so a timed dismissal can tell whether a newer
    // toast replaced the one it was armed for.
    let toast_seq = use_memo((), |_| Cell::new(0u32));

    let log_open = use_state(|| false);
    // Bumped after buffer mutations so the viewer re-renders.
    let log_tick = use_state(|| 0u32);

    let today: NaiveDate = Utc::now().date_naive();

    let show_toast = {
        let toast = toast.clone();
        let toast_seq = toast_seq.clone();
        Callback::from(move |message: ToastMessage| {
            let seq = toast_seq.get() + 1;
            toast_seq.set(seq);
            toast.set(Some(message));
            let toast = toast.clone();
            let toast_seq = toast_seq.clone();
            spawn_local(async move {
                TimeoutFuture::new(TOAST_DISMISS_MS).await;
                // A newer toast supersedes this dismissal.
                if toast_seq.get() == seq {
                    toast.set(None);
                }
            });
        })
    };

    let report_failure = {
        let logger = logger.clone();
        let show_toast = show_toast.clone();
        Callback::from(move |(context, error): (String, ApiError)| {
            logger.error(
                format!("{context}: {}", error.user_message()),
                Some(LogDetail {
                    message: error.to_string(),
                    trace: None,
                }),
            );
            show_toast.emit(ToastMessage::error(format!(
                "{context}: {}",
                error.user_message()
            )));
        })
    };

    // Initial load.
    {
        let api = api.clone();
        let tasks = tasks.clone();
        let categories = categories.clone();
        let loading = loading.clone();
        let report_failure = report_failure.clone();
        use_effect_with((), move |_| {
            loading.set(true);
            spawn_local(async move {
                if let Err(error) = reload_all(&api, &tasks, &categories).await {
                    report_failure.emit(("failed to load data".to_string(), error));
                }
                loading.set(false);
            });
        });
    }

    // Ctrl+Shift+L toggles the log viewer. Re-registered on each
    // toggle so the handler always sees the current open state.
    {
        let log_open = log_open.clone();
        let open = *log_open;
        use_effect_with(open, move |_| {
            let listener = web_sys::window()
                .and_then(|window| window.document())
                .map(|document| {
                    EventListener::new(&document, "keydown", move |event| {
                        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                            return;
                        };
                        if event.ctrl_key() && event.shift_key() && event.key() == "L" {
                            event.prevent_default();
                            log_open.set(!open);
                        }
                    })
                });
            move || drop(listener)
        });
    }

    let on_view = {
        let active_view = active_view.clone();
        Callback::from(move |view: String| {
            // Re-selecting the current view is a no-op.
            if *active_view != view {
                active_view.set(view);
            }
        })
    };
    let on_status = {
        let status_filter = status_filter.clone();
        Callback::from(move |key: String| status_filter.set(key))
    };
    let on_category = {
        let category_filter = category_filter.clone();
        Callback::from(move |key: String| category_filter.set(key))
    };
    let on_search = {
        let search = search.clone();
        Callback::from(move |event: web_sys::InputEvent| {
            let value = event
                .target_unchecked_into::<web_sys::HtmlInputElement>()
                .value();
            search.set(value);
        })
    };
    let on_sort = {
        let sort_key = sort_key.clone();
        Callback::from(move |event: web_sys::Event| {
            let value = event
                .target_unchecked_into::<web_sys::HtmlSelectElement>()
                .value();
            sort_key.set(value);
        })
    };

    let open_create_modal = {
        let modal = modal.clone();
        Callback::from(move |_: web_sys::MouseEvent| modal.set(Some(ModalState::create())))
    };
    let open_edit_modal = {
        let modal = modal.clone();
        let tasks = tasks.clone();
        Callback::from(move |id: String| {
            if let Some(task) = tasks.iter().find(|task| task.id == id) {
                modal.set(Some(ModalState::edit(task)));
            }
        })
    };
    let on_modal_change = {
        let modal = modal.clone();
        Callback::from(move |state: ModalState| modal.set(Some(state)))
    };
    let on_modal_cancel = {
        let modal = modal.clone();
        Callback::from(move |_| modal.set(None))
    };

    let on_modal_save = {
        let modal = modal.clone();
        let api = api.clone();
        let tasks = tasks.clone();
        let categories = categories.clone();
        let loading = loading.clone();
        let show_toast = show_toast.clone();
        let report_failure = report_failure.clone();
        Callback::from(move |_| {
            let Some(draft) = (*modal).clone() else {
                return;
            };
            let title = draft.title.trim().to_string();
            if title.is_empty() {
                let mut draft = draft;
                draft.error = Some("Title is required.".to_string());
                modal.set(Some(draft));
                return;
            }
            let due_date = match draft.due_date.trim() {
                "" => None,
                raw => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                    Ok(date) => Some(date),
                    Err(_) => {
                        let mut draft = draft;
                        draft.error = Some("Due date must be YYYY-MM-DD.".to_string());
                        modal.set(Some(draft));
                        return;
                    }
                },
            };
            let description = match draft.description.trim() {
                "" => None,
                text => Some(text.to_string()),
            };
            let tags: Vec<String> = draft
                .tags
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect();
            let payload = TaskPayload {
                title,
                category_id: match draft.category_id.as_str() {
                    "" => None,
                    id => Some(id.to_string()),
                },
                priority: draft.priority,
                due_date,
                status: draft.status,
                description,
                tags,
                progress_records: draft.progress_records.clone(),
            };

            let api = api.clone();
            let modal = modal.clone();
            let tasks = tasks.clone();
            let categories = categories.clone();
            let loading = loading.clone();
            let show_toast = show_toast.clone();
            let report_failure = report_failure.clone();
            let mode = draft.mode.clone();
            loading.set(true);
            spawn_local(async move {
                let (result, success_message) = match &mode {
                    ModalMode::Create => (api.create_task(&payload).await, "Task created."),
                    ModalMode::Edit(id) => (api.update_task(id, &payload).await, "Task updated."),
                };
                match result {
                    Ok(()) => {
                        modal.set(None);
                        if let Err(error) = reload_all(&api, &tasks, &categories).await {
                            report_failure.emit(("failed to reload data".to_string(), error));
                        } else {
                            show_toast.emit(ToastMessage::success(success_message));
                        }
                    }
                    Err(error) => {
                        report_failure.emit(("failed to save task".to_string(), error));
                    }
                }
                loading.set(false);
            });
        })
    };

    let on_delete_task = {
        let api = api.clone();
        let tasks = tasks.clone();
        let categories = categories.clone();
        let loading = loading.clone();
        let show_toast = show_toast.clone();
        let report_failure = report_failure.clone();
        Callback::from(move |id: String| {
            let api = api.clone();
            let tasks = tasks.clone();
            let categories = categories.clone();
            let loading = loading.clone();
            let show_toast = show_toast.clone();
            let report_failure = report_failure.clone();
            loading.set(true);
            spawn_local(async move {
                match api.delete_task(&id).await {
                    Ok(()) => {
                        if let Err(error) = reload_all(&api, &tasks, &categories).await {
                            report_failure.emit(("failed to reload data".to_string(), error));
                        } else {
                            show_toast.emit(ToastMessage::success("Task deleted."));
                        }
                    }
                    Err(error) => {
                        report_failure.emit(("failed to delete task".to_string(), error));
                    }
                }
                loading.set(false);
            });
        })
    };

    let on_new_category_input = {
        let new_category_name = new_category_name.clone();
        Callback::from(move |value: String| new_category_name.set(value))
    };
    let on_create_category = {
        let api = api.clone();
        let tasks = tasks.clone();
        let categories = categories.clone();
        let loading = loading.clone();
        let new_category_name = new_category_name.clone();
        let show_toast = show_toast.clone();
        let report_failure = report_failure.clone();
        Callback::from(move |_| {
            let name = new_category_name.trim().to_string();
            if name.is_empty() {
                return;
            }
            let api = api.clone();
            let tasks = tasks.clone();
            let categories = categories.clone();
            let loading = loading.clone();
            let new_category_name = new_category_name.clone();
            let show_toast = show_toast.clone();
            let report_failure = report_failure.clone();
            loading.set(true);
            spawn_local(async move {
                match api.create_category(&name, &random_color()).await {
                    Ok(()) => {
                        new_category_name.set(String::new());
                        if let Err(error) = reload_all(&api, &tasks, &categories).await {
                            report_failure.emit(("failed to reload data".to_string(), error));
                        } else {
                            show_toast.emit(ToastMessage::success("Category created."));
                        }
                    }
                    Err(error) if error.is_conflict() => {
                        show_toast.emit(ToastMessage::error(
                            "A category with this name already exists.",
                        ));
                    }
                    Err(error) => {
                        report_failure.emit(("failed to create category".to_string(), error));
                    }
                }
                loading.set(false);
            });
        })
    };

    let on_dismiss_toast = {
        let toast = toast.clone();
        Callback::from(move |_| toast.set(None))
    };
    let on_clear_logs = {
        let logger = logger.clone();
        let log_tick = log_tick.clone();
        Callback::from(move |_| {
            logger.clear();
            log_tick.set(*log_tick + 1);
        })
    };
    let on_close_logs = {
        let log_open = log_open.clone();
        Callback::from(move |_| log_open.set(false))
    };

    let filter_state = FilterState {
        status: status_filter_from_key(&status_filter),
        category: category_filter_from_key(&category_filter),
        search: (*search).clone(),
        sort: sort_key_from_key(&sort_key),
    };
    let visible = select_visible_tasks(&tasks, &filter_state, today);

    let counts = {
        let mut counts = TierCounts {
            all: tasks.len(),
            ..TierCounts::default()
        };
        for task in tasks.iter() {
            if matches_status(task, StatusFilter::Todo, today) {
                counts.todo += 1;
            }
            if matches_status(task, StatusFilter::InProgress, today) {
                counts.in_progress += 1;
            }
            if matches_status(task, StatusFilter::Completed, today) {
                counts.completed += 1;
            }
            if matches_status(task, StatusFilter::Overdue, today) {
                counts.overdue += 1;
            }
            if matches_status(task, StatusFilter::DueSoon, today) {
                counts.due_soon += 1;
            }
        }
        counts
    };

    let category_index: BTreeMap<String, Category> = categories
        .iter()
        .map(|category| (category.id.clone(), category.clone()))
        .collect();

    let view = match active_view.as_str() {
        "calendar" => html! {
            <CalendarMonth
                tasks={visible.clone()}
                categories={category_index.clone()}
                {today}
                on_open={open_edit_modal.clone()}
            />
        },
        "stats" => html! {
            <StatsPanel stats={TaskStats::compute(&tasks, today)} />
        },
        _ => html! {
            <TaskList
                tasks={visible.clone()}
                categories={category_index.clone()}
                {today}
                on_open={open_edit_modal.clone()}
                on_delete={on_delete_task.clone()}
            />
        },
    };

    html! {
        <div class="app">
            <WindowChrome title="Taskdeck" />
            <div class="body">
                <Sidebar
                    active_view={(*active_view).clone()}
                    {on_view}
                    status_filter={(*status_filter).clone()}
                    {on_status}
                    {counts}
                    categories={(**categories).clone()}
                    category_filter={(*category_filter).clone()}
                    {on_category}
                    new_category_name={(*new_category_name).clone()}
                    {on_new_category_input}
                    {on_create_category}
                />
                <div class="main">
                    <div class="toolbar">
                        <input
                            class="search"
                            placeholder="Search tasks"
                            value={(*search).clone()}
                            oninput={on_search}
                        />
                        <select onchange={on_sort}>
                            <option value="updated_desc" selected={*sort_key == "updated_desc"}>
                                { "Recently updated" }
                            </option>
                            <option value="updated_asc" selected={*sort_key == "updated_asc"}>
                                { "Least recently updated" }
                            </option>
                            <option value="due_asc" selected={*sort_key == "due_asc"}>
                                { "Due date (earliest)" }
                            </option>
                            <option value="due_desc" selected={*sort_key == "due_desc"}>
                                { "Due date (latest)" }
                            </option>
                            <option value="priority" selected={*sort_key == "priority"}>
                                { "Priority" }
                            </option>
                        </select>
                        <button type="button" onclick={open_create_modal}>
                            { "New Task" }
                        </button>
                        {
                            if *loading {
                                html! { <span class="loading">{ "Loading…" }</span> }
                            } else {
                                html! {}
                            }
                        }
                    </div>
                    { view }
                </div>
            </div>
            {
                modal.as_ref().map(|state| html! {
                    <TaskModal
                        state={state.clone()}
                        categories={(**categories).clone()}
                        busy={*loading}
                        on_change={on_modal_change.clone()}
                        on_save={on_modal_save.clone()}
                        on_cancel={on_modal_cancel.clone()}
                    />
                }).unwrap_or_default()
            }
            {
                if *log_open {
                    html! {
                        <LogViewer
                            entries={logger.snapshot()}
                            on_clear={on_clear_logs}
                            on_close={on_close_logs}
                        />
                    }
                } else {
                    html! {}
                }
            }
            {
                toast.as_ref().map(|message| html! {
                    <Toast toast={message.clone()} on_dismiss={on_dismiss_toast.clone()} />
                }).unwrap_or_default()
            }
        </div>
    }
}
