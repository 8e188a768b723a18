//! General path utilities for study export trees
//!
//! Listings are sorted so that ingestion order is deterministic across
//! platforms.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::util::validate_directory;
use crate::error::{Result, StudyError};

/// Lower-case a label and strip all whitespace, for folder matching
#[must_use]
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Immediate subdirectories of `path` whose name satisfies `predicate`
pub fn list_subdirs_matching<F>(path: &Path, predicate: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&str) -> bool,
{
    list_entries(path, "listing subdirectories", |entry| {
        entry.is_dir() && file_name(entry).is_some_and(&predicate)
    })
}

/// Files directly under `path` whose name satisfies `predicate`
pub fn list_files_matching<F>(path: &Path, predicate: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&str) -> bool,
{
    list_entries(path, "listing files", |entry| {
        entry.is_file() && file_name(entry).is_some_and(&predicate)
    })
}

/// Files directly under `path` with the given extension, case-insensitive
pub fn list_files_with_extension(path: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    list_entries(path, "listing data files", |entry| {
        entry.is_file()
            && entry
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
    })
}

/// Subfolder whose normalized name contains the normalized label
///
/// When several folders match, the first in sorted order is used and the
/// others are logged.
pub fn find_matching_subfolder(path: &Path, label: &str) -> Result<PathBuf> {
    let target = normalize_label(label);
    let mut matches =
        list_subdirs_matching(path, |name| normalize_label(name).contains(&target))?;

    if matches.len() > 1 {
        log::warn!(
            "{} folders under {} match '{label}'; using {}",
            matches.len(),
            path.display(),
            matches[0].display()
        );
    }

    if matches.is_empty() {
        return Err(StudyError::SubfolderNotFound {
            path: path.to_path_buf(),
            label: label.to_string(),
        });
    }

    Ok(matches.swap_remove(0))
}

fn list_entries<F>(path: &Path, purpose: &str, keep: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    validate_directory(path, purpose)?;

    let mut entries = Vec::new();
    for entry in fs::read_dir(path).map_err(|e| StudyError::io(path, e))? {
        let entry = entry.map_err(|e| StudyError::io(path, e))?;
        let entry_path = entry.path();
        if keep(&entry_path) {
            entries.push(entry_path);
        }
    }

    entries.sort();
    Ok(entries)
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}
