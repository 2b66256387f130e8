use taskdeck_core::logbuf::{LogEntry, LogLevel};
use yew::{Callback, Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct LogViewerProps {
    /// Entries in capture order; rendered newest first.
    pub entries: Vec<LogEntry>,
    pub on_clear: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(LogViewer)]
pub fn log_viewer(props: &LogViewerProps) -> Html {
    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: web_sys::MouseEvent| on_clear.emit(()))
    };
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: web_sys::MouseEvent| on_close.emit(()))
    };
    let level_class = |level: LogLevel| match level {
        LogLevel::Info => "log-entry info",
        LogLevel::Warn => "log-entry warn",
        LogLevel::Error => "log-entry error",
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal log-viewer">
                <div class="header">
                    <span>{ format!("Logs ({})", props.entries.len()) }</span>
                    <button type="button" class="secondary" onclick={on_clear}>
                        { "Clear" }
                    </button>
                    <button type="button" class="secondary" onclick={on_close}>
                        { "Close" }
                    </button>
                </div>
                <div class="log-entries">
                    {
                        if props.entries.is_empty() {
                            html! { <div class="empty">{ "No log entries." }</div> }
                        } else {
                            props.entries.iter().rev().map(|entry| html! {
                                <div class={level_class(entry.level)}>
                                    <span class="when">
                                        { entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string() }
                                    </span>
                                    <span class="level">{ entry.level.as_str() }</span>
                                    <span class="message">{ entry.message.clone() }</span>
                                    {
                                        entry.detail.as_ref().map(|detail| html! {
                                            <div class="detail">{ detail.message.clone() }</div>
                                        }).unwrap_or_default()
                                    }
                                </div>
                            }).collect::<Html>()
                        }
                    }
                </div>
            </div>
        </div>
    }
}
