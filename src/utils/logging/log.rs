//! Logging setup and the shared message shapes for ingestion runs

use std::path::Path;
use std::time::Duration;

/// Initialise `env_logger`, defaulting to `info` when `RUST_LOG` is unset
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Log the start of an operation on a file or folder
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - File or folder being worked on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{operation} {}", path.display());
}

/// Log how many records an operation produced and how long it took
///
/// # Arguments
/// * `operation` - Description of the finished operation
/// * `path` - File or folder that was worked on
/// * `records` - Number of records produced
/// * `elapsed` - Wall time of the operation
pub fn log_operation_complete(operation: &str, path: &Path, records: usize, elapsed: Duration) {
    log::info!(
        "{operation} {records} record(s) from {} in {elapsed:?}",
        path.display()
    );
}

/// Warn once per folder when problems were recorded instead of raised
///
/// # Arguments
/// * `path` - Folder the issues were recorded for
/// * `issues` - Number of recorded issues; zero logs nothing
pub fn log_issue_summary(path: &Path, issues: usize) {
    if issues > 0 {
        log::warn!("{issues} issue(s) recorded for {}", path.display());
    }
}
