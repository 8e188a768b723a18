//! Error handling for study ingestion and curve analysis.

pub mod util;

use serde::Serialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while reconciling instrument exports into study records
#[derive(Debug, thiserror::Error)]
pub enum StudyError {
    /// File or folder name does not match any supported identifier shape
    #[error("Malformed identifier in {}: {reason}", path.display())]
    MalformedIdentifier { path: PathBuf, reason: String },

    /// No instrument sub-folder matches the requested modality
    #[error("No sub-folder matching '{label}' under {}", path.display())]
    SubfolderNotFound { path: PathBuf, label: String },

    /// Intensity curve is flat, so it cannot be normalized
    #[error("Degenerate curve in {}: {reason}", path.display())]
    DegenerateCurve { path: PathBuf, reason: String },

    /// Raw location code falls outside the canonical slots 1-4
    #[error(
        "Unresolved location in {}: raw code {raw_code} for subject {subject_id}",
        path.display()
    )]
    UnresolvedLocation {
        path: PathBuf,
        subject_id: String,
        raw_code: i64,
    },

    /// Scan id recorded both before and after exposure
    #[error(
        "Scan {scan_id} listed both before and after exposure in {}",
        path.display()
    )]
    ScanLedgerContradiction { path: PathBuf, scan_id: i64 },

    /// Ledger row carries a scan number but no location code
    #[error(
        "Scan {scan_id} in sheet '{sheet}' of {} has no location code",
        path.display()
    )]
    IncompleteLedgerRow {
        path: PathBuf,
        sheet: String,
        scan_id: i64,
    },

    /// No visit folder matches the subject id
    #[error("No visit folder for subject {subject_id} under {}", path.display())]
    SubjectNotFound { path: PathBuf, subject_id: String },

    /// A curve analysis stage was requested before its prerequisite ran
    #[error("Stage '{stage}' requires '{requires}' first for {}", path.display())]
    StageNotReady {
        path: PathBuf,
        stage: &'static str,
        requires: &'static str,
    },

    /// Curve samples are unusable (empty, mismatched lengths, zero depth)
    #[error("Invalid curve in {}: {reason}", path.display())]
    InvalidCurve { path: PathBuf, reason: String },

    /// Instrument export content could not be interpreted
    #[error("Invalid data in {}: {reason}", path.display())]
    InvalidData { path: PathBuf, reason: String },

    /// IO error with the path that triggered it
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Delimited text could not be parsed
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Spreadsheet could not be opened or a sheet is missing
    #[error("Spreadsheet error in {}: {reason}", path.display())]
    Spreadsheet { path: PathBuf, reason: String },

    /// Configuration file could not be read
    #[error("Configuration error in {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl StudyError {
    /// Path of the file or folder the error concerns
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::MalformedIdentifier { path, .. }
            | Self::SubfolderNotFound { path, .. }
            | Self::DegenerateCurve { path, .. }
            | Self::UnresolvedLocation { path, .. }
            | Self::ScanLedgerContradiction { path, .. }
            | Self::IncompleteLedgerRow { path, .. }
            | Self::SubjectNotFound { path, .. }
            | Self::StageNotReady { path, .. }
            | Self::InvalidCurve { path, .. }
            | Self::InvalidData { path, .. }
            | Self::Io { path, .. }
            | Self::Csv { path, .. }
            | Self::Spreadsheet { path, .. }
            | Self::Config { path, .. } => path,
        }
    }

    /// Classification used in the per-file issue channel
    #[must_use]
    pub fn kind(&self) -> IssueKind {
        match self {
            Self::MalformedIdentifier { .. } => IssueKind::MalformedIdentifier,
            Self::SubfolderNotFound { .. } => IssueKind::SubfolderNotFound,
            Self::DegenerateCurve { .. } => IssueKind::DegenerateCurve,
            Self::UnresolvedLocation { .. } => IssueKind::UnresolvedLocation,
            Self::ScanLedgerContradiction { .. } => IssueKind::ScanLedgerContradiction,
            Self::IncompleteLedgerRow { .. } => IssueKind::IncompleteLedgerRow,
            Self::Spreadsheet { .. } => IssueKind::UnreadableSpreadsheet,
            _ => IssueKind::UnreadableFile,
        }
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn invalid_data(path: &Path, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Category of a recorded per-file problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IssueKind {
    MalformedIdentifier,
    SubfolderNotFound,
    DegenerateCurve,
    UnresolvedLocation,
    ScanLedgerContradiction,
    IncompleteLedgerRow,
    UnreadableSpreadsheet,
    UnreadableFile,
}

/// A problem with one file that did not abort the surrounding visit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileIssue {
    pub path: PathBuf,
    pub kind: IssueKind,
    pub reason: String,
}

impl FileIssue {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, kind: IssueKind, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            reason: reason.into(),
        }
    }

    /// Record for an error, logging it on the way
    #[must_use]
    pub fn from_error(error: &StudyError) -> Self {
        let issue = Self::new(error.path(), error.kind(), error.to_string());
        log::warn!("{issue}");
        issue
    }
}

impl fmt::Display for FileIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at {}: {}", self.kind, self.path.display(), self.reason)
    }
}

/// Result type for study operations
pub type Result<T> = std::result::Result<T, StudyError>;
