//! Local-storage persistence for the renderer's log ring buffer. The
//! buffer is the only session artifact that survives a restart; view
//! and filter selections are deliberately process-local.

use taskdeck_core::logbuf::{LogBuffer, LogEntry};

pub const LOG_STORAGE_KEY: &str = "taskdeck.logs";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

pub fn load_log_buffer() -> LogBuffer {
    let stored = local_storage().and_then(|storage| storage.get_item(LOG_STORAGE_KEY).ok().flatten());

    if let Some(raw) = stored {
        match serde_json::from_str::<Vec<LogEntry>>(&raw) {
            Ok(entries) => return LogBuffer::from_entries(entries),
            Err(error) => {
                tracing::error!(%error, "failed parsing persisted log buffer; starting empty");
            }
        }
    }

    LogBuffer::new()
}

pub fn save_log_buffer(buffer: &LogBuffer) {
    if let Some(storage) = local_storage()
        && let Ok(json) = serde_json::to_string(&buffer.snapshot())
    {
        let _ = storage.set_item(LOG_STORAGE_KEY, &json);
    }
}

pub fn clear_log_buffer() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(LOG_STORAGE_KEY);
    }
}
