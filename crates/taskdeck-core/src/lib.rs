pub mod api;
pub mod category;
pub mod config;
pub mod filter;
pub mod format;
pub mod logbuf;
pub mod stats;
pub mod task;
