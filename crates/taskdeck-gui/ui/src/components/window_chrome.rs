use wasm_bindgen_futures::spawn_local;
use yew::{Callback, Html, MouseEvent, Properties, function_component, html};

use crate::api::invoke_shell;

#[derive(Properties, PartialEq)]
pub struct WindowChromeProps {
    pub title: String,
}

/// Custom titlebar; the window itself is undecorated and these buttons
/// drive the host shell's window commands.
#[function_component(WindowChrome)]
pub fn window_chrome(props: &WindowChromeProps) -> Html {
    let shell_button = |command: &'static str, class: &'static str, label: &'static str, title: &'static str| {
        let onclick = Callback::from(move |_: MouseEvent| {
            spawn_local(async move {
                if let Err(error) = invoke_shell(command).await {
                    tracing::error!(command, %error, "window command failed");
                }
            });
        });
        html! {
            <button {class} type="button" {onclick} {title}>{ label }</button>
        }
    };

    html! {
        <div class="window-chrome" data-tauri-drag-region="true">
            <div class="window-brand" data-tauri-drag-region="true">
                { props.title.clone() }
            </div>
            <div class="window-controls" data-tauri-drag-region="false">
                { shell_button("window_minimize", "window-btn", "_", "Minimize") }
                { shell_button("window_toggle_maximize", "window-btn", "[ ]", "Maximize/Restore") }
                { shell_button("window_close", "window-btn danger", "X", "Close") }
            </div>
        </div>
    }
}
