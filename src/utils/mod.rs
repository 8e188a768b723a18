//! Shared utilities: export readers, path discovery and logging

pub mod io;
pub mod logging;
