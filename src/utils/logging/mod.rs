//! Logging and progress reporting

pub mod log;
pub mod progress;

pub use log::{init_logging, log_issue_summary, log_operation_complete, log_operation_start};
pub use progress::create_main_progress_bar;
