//! Utility functions for error handling
//!
//! Path checks that fail with the offending path attached, so callers can
//! surface `(path, reason)` pairs without re-deriving context.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, StudyError};

/// Check if a directory exists and is readable, with rich error information
///
/// # Arguments
/// * `path` - Directory to check
/// * `purpose` - What the directory is needed for, quoted in the error
///
/// # Returns
/// * `Result<()>` - `StudyError::Io` naming `path` when the check fails
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(StudyError::io(
            path,
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory not found, needed for: {purpose}"),
            ),
        ));
    }

    if !path.is_dir() {
        return Err(StudyError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Path is not a directory, expected one for: {purpose}"),
            ),
        ));
    }

    match fs::read_dir(path) {
        Ok(_) => Ok(()),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::PermissionDenied => {
                    "Permission denied - check directory permissions".to_string()
                }
                _ => format!("Failed to access directory for: {purpose}"),
            };
            Err(StudyError::io(path, io::Error::new(e.kind(), context)))
        }
    }
}

/// Check that a path names a regular file
///
/// # Arguments
/// * `path` - File to check
/// * `purpose` - What the file is needed for, quoted in the error
///
/// # Returns
/// * `Result<()>` - `StudyError::Io` naming `path` when it is missing or not a file
pub fn validate_file(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(StudyError::io(
            path,
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found, needed for: {purpose}"),
            ),
        ));
    }

    if !path.is_file() {
        return Err(StudyError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Path is not a file, expected one for: {purpose}"),
            ),
        ));
    }

    Ok(())
}
