use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate, Weekday};
use taskdeck_core::category::Category;
use taskdeck_core::task::{Status, Task};
use yew::{Callback, Html, Properties, function_component, html, use_state};

#[derive(Properties, PartialEq)]
pub struct CalendarMonthProps {
    pub tasks: Vec<Task>,
    pub categories: BTreeMap<String, Category>,
    pub today: NaiveDate,
    pub on_open: Callback<String>,
}

/// Month grid keyed on due date. Tasks without one never appear here;
/// the list view still shows them.
#[function_component(CalendarMonth)]
pub fn calendar_month(props: &CalendarMonthProps) -> Html {
    let focus = use_state(|| first_of_month(props.today));

    let go_prev = {
        let focus = focus.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            focus.set(*focus - Months::new(1));
        })
    };
    let go_next = {
        let focus = focus.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            focus.set(*focus + Months::new(1));
        })
    };
    let go_today = {
        let focus = focus.clone();
        let today = props.today;
        Callback::from(move |_: web_sys::MouseEvent| {
            focus.set(first_of_month(today));
        })
    };

    let mut by_day: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
    for task in &props.tasks {
        if let Some(due) = task.due_date {
            by_day.entry(due).or_default().push(task);
        }
    }

    let month_start = *focus;
    let month_end = month_start + Months::new(1);
    // Grid starts on the Monday at or before the first of the month.
    let grid_start = month_start
        - chrono::Days::new(month_start.weekday().num_days_from_monday() as u64);
    let weeks: Vec<Vec<NaiveDate>> = (0..6)
        .map(|week| {
            (0..7)
                .map(|day| grid_start + chrono::Days::new(week * 7 + day))
                .collect()
        })
        .collect();

    let day_cell = |date: NaiveDate| {
        let in_month = date >= month_start && date < month_end;
        let mut class = String::from("day");
        if !in_month {
            class.push_str(" outside");
        }
        if date == props.today {
            class.push_str(" today");
        }
        let tasks = by_day.get(&date).map(Vec::as_slice).unwrap_or_default();
        html! {
            <div class={class}>
                <div class="day-number">{ date.day() }</div>
                {
                    for tasks.iter().map(|task| {
                        let color = task
                            .category_id
                            .as_ref()
                            .and_then(|id| props.categories.get(id))
                            .map(|category| category.color.clone())
                            .unwrap_or_else(|| "#9e9e9e".to_string());
                        let mut entry_class = String::from("calendar-task");
                        if task.status == Status::Completed {
                            entry_class.push_str(" completed");
                        }
                        let on_open = {
                            let on_open = props.on_open.clone();
                            let id = task.id.clone();
                            Callback::from(move |_: web_sys::MouseEvent| {
                                on_open.emit(id.clone());
                            })
                        };
                        html! {
                            <div
                                class={entry_class}
                                style={format!("border-left-color: {color}")}
                                onclick={on_open}
                            >
                                { task.title.clone() }
                            </div>
                        }
                    })
                }
            </div>
        }
    };

    html! {
        <div class="calendar">
            <div class="calendar-nav">
                <button type="button" onclick={go_prev}>{ "‹" }</button>
                <span class="month-label">
                    { month_start.format("%B %Y").to_string() }
                </span>
                <button type="button" onclick={go_next}>{ "›" }</button>
                <button type="button" class="secondary" onclick={go_today}>
                    { "Today" }
                </button>
            </div>
            <div class="calendar-grid">
                {
                    for [
                        Weekday::Mon,
                        Weekday::Tue,
                        Weekday::Wed,
                        Weekday::Thu,
                        Weekday::Fri,
                        Weekday::Sat,
                        Weekday::Sun,
                    ]
                    .iter()
                    .map(|day| html! { <div class="weekday">{ day.to_string() }</div> })
                }
                {
                    for weeks.iter().flatten().map(|date| day_cell(*date))
                }
            </div>
        </div>
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
