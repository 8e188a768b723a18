//! Path utilities for file and directory operations
//!
//! This module provides utilities for enumerating subject folders, instrument
//! sub-folders and data files.

pub mod general;

// Re-export commonly used functions for convenience
pub use general::{
    find_matching_subfolder, list_files_matching, list_files_with_extension,
    list_subdirs_matching, normalize_label,
};
