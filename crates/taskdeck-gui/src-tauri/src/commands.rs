use tauri::State;

use crate::backend::BackendProcess;

#[tauri::command]
pub async fn window_minimize(window: tauri::Window) -> Result<(), String> {
    window.minimize().map_err(|err| err.to_string())
}

#[tauri::command]
pub async fn window_toggle_maximize(window: tauri::Window) -> Result<(), String> {
    let is_maximized = window.is_maximized().map_err(|err| err.to_string())?;
    if is_maximized {
        window.unmaximize().map_err(|err| err.to_string())
    } else {
        window.maximize().map_err(|err| err.to_string())
    }
}

#[tauri::command]
pub async fn window_close(window: tauri::Window) -> Result<(), String> {
    window.close().map_err(|err| err.to_string())
}

/// Whether the shell-owned backend child is still alive. Always false
/// when autostart is off and the backend runs externally.
#[tauri::command]
pub async fn backend_status(state: State<'_, BackendProcess>) -> Result<bool, String> {
    Ok(state.is_running())
}
