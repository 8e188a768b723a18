//! Scan ledger for one visit
//!
//! The exposure spreadsheet records which scan numbers were taken before and
//! which after the exposure intervention. A measurement's exposure state is a
//! pure lookup of its scan id in those two lists.

use itertools::Itertools;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::StudyConfig;
use crate::error::{FileIssue, Result, StudyError};
use crate::utils::io::TableSource;

/// Sub-session a ledger entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    Pre,
    Post,
}

/// Exposure state of a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExposureState {
    /// Scan id listed before exposure
    Pre,
    /// Scan id listed after exposure
    Post,
    /// Scan id in neither list, e.g. a calibration scan
    Unknown,
}

impl ExposureState {
    /// `Some(true)` when post-exposure, `None` when unknown
    #[must_use]
    pub fn exposed(&self) -> Option<bool> {
        match self {
            Self::Pre => Some(false),
            Self::Post => Some(true),
            Self::Unknown => None,
        }
    }
}

/// One row of the exposure spreadsheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub scan_id: i64,
    /// `None` when the row left the location cell empty
    pub location_code: Option<i64>,
    pub phase: Phase,
}

/// Read-only table of the scans recorded for one visit
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanLedger {
    source: Option<PathBuf>,
    before: Vec<LedgerEntry>,
    after: Vec<LedgerEntry>,
    #[serde(skip)]
    before_ids: FxHashSet<i64>,
    #[serde(skip)]
    after_ids: FxHashSet<i64>,
    contradictions: Vec<i64>,
    incomplete_rows: Vec<FileIssue>,
}

impl ScanLedger {
    /// Build a ledger from `(scan_id, location_code)` pairs
    ///
    /// Scan ids present in both lists are contradictions: each is logged and
    /// recorded, and classifies as before exposure.
    #[must_use]
    pub fn new(before: &[(i64, i64)], after: &[(i64, i64)]) -> Self {
        let entries = |pairs: &[(i64, i64)], phase| {
            pairs
                .iter()
                .map(|&(scan_id, location_code)| LedgerEntry {
                    scan_id,
                    location_code: Some(location_code),
                    phase,
                })
                .collect::<Vec<_>>()
        };
        Self::from_entries(entries(before, Phase::Pre), entries(after, Phase::Post))
    }

    fn from_entries(before: Vec<LedgerEntry>, after: Vec<LedgerEntry>) -> Self {
        let before_ids: FxHashSet<i64> = before.iter().map(|e| e.scan_id).collect();
        let after_ids: FxHashSet<i64> = after.iter().map(|e| e.scan_id).collect();
        let contradictions = before_ids
            .intersection(&after_ids)
            .copied()
            .sorted()
            .collect::<Vec<_>>();

        for scan_id in &contradictions {
            log::warn!(
                "Scan {scan_id} is listed both before and after exposure; classifying as before"
            );
        }

        Self {
            source: None,
            before,
            after,
            before_ids,
            after_ids,
            contradictions,
            incomplete_rows: Vec::new(),
        }
    }

    /// An empty ledger, every scan classifies as unknown
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read the before/after sheets of an exposure spreadsheet
    ///
    /// Every row with a scan number joins its sheet's scan set. A row whose
    /// location cell is empty keeps the scan with no location code and is
    /// recorded as an incomplete row.
    pub fn from_spreadsheet<S: TableSource + ?Sized>(
        source: &S,
        path: &Path,
        config: &StudyConfig,
    ) -> Result<Self> {
        let columns = [config.scan_column.as_str(), config.location_column.as_str()];
        let mut incomplete_rows = Vec::new();

        let mut entries = |sheet: &str, phase: Phase| -> Result<Vec<LedgerEntry>> {
            let rows = source.read_sheet_rows(path, sheet, &columns)?;
            let mut sheet_entries = Vec::with_capacity(rows.len());
            for row in rows {
                let cell = |idx: usize| row.get(idx).copied().flatten().map(|v| v.round() as i64);
                let Some(scan_id) = cell(0) else {
                    log::debug!(
                        "Row without a scan number in sheet '{sheet}' of {}; skipped",
                        path.display()
                    );
                    continue;
                };
                let location_code = cell(1);
                if location_code.is_none() {
                    incomplete_rows.push(FileIssue::from_error(
                        &StudyError::IncompleteLedgerRow {
                            path: path.to_path_buf(),
                            sheet: sheet.to_string(),
                            scan_id,
                        },
                    ));
                }
                sheet_entries.push(LedgerEntry {
                    scan_id,
                    location_code,
                    phase,
                });
            }
            Ok(sheet_entries)
        };

        let before = entries(&config.before_exposure_sheet, Phase::Pre)?;
        let after = entries(&config.after_exposure_sheet, Phase::Post)?;

        let mut ledger = Self::from_entries(before, after);
        ledger.source = Some(path.to_path_buf());
        ledger.incomplete_rows = incomplete_rows;
        Ok(ledger)
    }

    /// Classify a scan id; contradictory ids resolve to `Pre`
    #[must_use]
    pub fn classify(&self, scan_id: i64) -> ExposureState {
        if self.before_ids.contains(&scan_id) {
            ExposureState::Pre
        } else if self.after_ids.contains(&scan_id) {
            ExposureState::Post
        } else {
            ExposureState::Unknown
        }
    }

    /// Location code the spreadsheet records for a scan id
    #[must_use]
    pub fn location_code(&self, scan_id: i64) -> Option<i64> {
        self.before
            .iter()
            .chain(&self.after)
            .find(|e| e.scan_id == scan_id)
            .and_then(|e| e.location_code)
    }

    /// Scan ids found in both lists, ascending
    #[must_use]
    pub fn contradictions(&self) -> &[i64] {
        &self.contradictions
    }

    /// Contradictions and incomplete rows as per-file issues
    ///
    /// Both were logged when the ledger was built.
    #[must_use]
    pub fn issues(&self) -> Vec<FileIssue> {
        let path = self.source.clone().unwrap_or_default();
        self.contradictions
            .iter()
            .map(|&scan_id| {
                let error = StudyError::ScanLedgerContradiction {
                    path: path.clone(),
                    scan_id,
                };
                FileIssue::new(&path, error.kind(), error.to_string())
            })
            .chain(self.incomplete_rows.iter().cloned())
            .collect()
    }

    #[must_use]
    pub fn before(&self) -> &[LedgerEntry] {
        &self.before
    }

    #[must_use]
    pub fn after(&self) -> &[LedgerEntry] {
        &self.after
    }

    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}
