mod calendar_month;
mod log_viewer;
mod sidebar;
mod stats_panel;
mod task_list;
mod task_list_row;
mod task_modal;
mod toast;
mod window_chrome;

pub use calendar_month::CalendarMonth;
pub use log_viewer::LogViewer;
pub use sidebar::{Sidebar, TierCounts};
pub use stats_panel::StatsPanel;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
pub use task_modal::{ModalMode, ModalState, TaskModal};
pub use toast::{Toast, ToastKind, ToastMessage};
pub use window_chrome::WindowChrome;
