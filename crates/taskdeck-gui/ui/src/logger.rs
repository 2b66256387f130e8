//! User-facing logger behind the in-app log viewer: a capped ring
//! buffer persisted to local storage, with best-effort forwarding of
//! error entries to the backend.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::net::http::Request;
use taskdeck_core::api::LogUpload;
use taskdeck_core::logbuf::{LogBuffer, LogDetail, LogEntry, LogLevel};
use wasm_bindgen_futures::spawn_local;

use crate::storage;

/// Cloneable logging capability handed to the data client and the view
/// controller. All clones share one buffer.
#[derive(Clone)]
pub struct UiLogger {
    buffer: Rc<RefCell<LogBuffer>>,
    base_url: String,
}

impl PartialEq for UiLogger {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.buffer, &other.buffer)
    }
}

impl UiLogger {
    pub fn new(base_url: &str) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(storage::load_log_buffer())),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(LogEntry::new(LogLevel::Info, message, None));
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.push(LogEntry::new(LogLevel::Warn, message, None));
    }

    pub fn error(&self, message: impl Into<String>, detail: Option<LogDetail>) {
        let entry = LogEntry::new(LogLevel::Error, message, detail);
        self.forward(entry.clone());
        self.push(entry);
    }

    fn push(&self, entry: LogEntry) {
        let mut buffer = self.buffer.borrow_mut();
        buffer.push(entry);
        storage::save_log_buffer(&buffer);
    }

    /// Fire-and-forget upload of an error entry. Failures here are
    /// reported to the console only: they must never re-enter the
    /// buffer (that would recurse) and never reach the user.
    fn forward(&self, entry: LogEntry) {
        let url = format!("{}/logs", self.base_url);
        spawn_local(async move {
            let request = match Request::post(&url).json(&LogUpload::new(entry)) {
                Ok(request) => request,
                Err(error) => {
                    console::warn!(format!("failed to encode log upload: {error}"));
                    return;
                }
            };
            if let Err(error) = request.send().await {
                console::warn!(format!("failed to forward log entry: {error}"));
            }
        });
    }

    /// Entries oldest-first, for the log viewer.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.buffer.borrow().snapshot()
    }

    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
        storage::clear_log_buffer();
    }
}
