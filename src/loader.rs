//! Subject and study loading
//!
//! Ties folder discovery, exposure spreadsheets and visit aggregation
//! together for whole subjects. Subjects are independent, so a study load
//! runs them in parallel and reports each subject's outcome separately.

use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::algorithm::aggregation::{VisitAggregator, assemble_subject};
use crate::config::StudyConfig;
use crate::error::{FileIssue, IssueKind, Result, StudyError};
use crate::identifier::IdentifierParser;
use crate::ledger::ScanLedger;
use crate::models::Subject;
use crate::utils::io::{FsTableSource, TableSource, list_files_matching, list_subdirs_matching};
use crate::utils::logging::{create_main_progress_bar, log_operation_start};

/// Loads subjects from an instrument export root and a scan-information root
#[derive(Debug, Clone)]
pub struct StudyLoader<S: TableSource = FsTableSource> {
    config: StudyConfig,
    source: S,
    instrument_root: PathBuf,
    scan_info_root: PathBuf,
    parser: IdentifierParser,
}

impl StudyLoader<FsTableSource> {
    /// Loader reading exports from disk
    ///
    /// # Arguments
    /// * `config` - Study configuration
    /// * `instrument_root` - Folder holding one sub-folder per visit
    /// * `scan_info_root` - Folder holding the exposure spreadsheets
    #[must_use]
    pub fn new(config: StudyConfig, instrument_root: &Path, scan_info_root: &Path) -> Self {
        Self::with_source(config, FsTableSource, instrument_root, scan_info_root)
    }
}

impl<S: TableSource> StudyLoader<S> {
    /// Loader with a custom table source
    ///
    /// # Arguments
    /// * `config` - Study configuration
    /// * `source` - Reader for delimited exports and spreadsheets
    /// * `instrument_root` - Folder holding one sub-folder per visit
    /// * `scan_info_root` - Folder holding the exposure spreadsheets
    #[must_use]
    pub fn with_source(
        config: StudyConfig,
        source: S,
        instrument_root: &Path,
        scan_info_root: &Path,
    ) -> Self {
        let parser = IdentifierParser::from_config(&config);
        Self {
            config,
            source,
            instrument_root: instrument_root.to_path_buf(),
            scan_info_root: scan_info_root.to_path_buf(),
            parser,
        }
    }

    #[must_use]
    pub fn config(&self) -> &StudyConfig {
        &self.config
    }

    /// Visit folders under the instrument root whose subject token is `subject_id`
    ///
    /// # Returns
    /// * `Result<Vec<PathBuf>>` - Matching folders, sorted by path
    pub fn collect_subject_folders(&self, subject_id: &str) -> Result<Vec<PathBuf>> {
        list_subdirs_matching(&self.instrument_root, |name| {
            name.split('_').next() == Some(subject_id)
        })
    }

    /// Exposure spreadsheets naming `subject_id` at token 2 of their file name
    pub fn collect_scan_sheets(&self, subject_id: &str) -> Result<Vec<PathBuf>> {
        list_files_matching(&self.scan_info_root, |name| {
            !name.starts_with("~$") && sheet_token(name, 2) == Some(subject_id)
        })
    }

    /// Scan ledger for one visit of a subject
    ///
    /// The spreadsheet's token 3 carries the visit marker; sheets without it
    /// belong to the initial visit. A missing or unreadable spreadsheet yields
    /// an empty ledger and an issue, so every scan of the visit classifies as
    /// unknown.
    ///
    /// # Arguments
    /// * `subject_id` - Subject whose spreadsheet to read
    /// * `return_visit` - Whether to pick the return visit's spreadsheet
    ///
    /// # Returns
    /// * `(ScanLedger, Vec<FileIssue>)` - The ledger and any problems finding or reading it
    pub fn ledger_for_visit(
        &self,
        subject_id: &str,
        return_visit: bool,
    ) -> (ScanLedger, Vec<FileIssue>) {
        let sheets = match self.collect_scan_sheets(subject_id) {
            Ok(sheets) => sheets,
            Err(e) => return (ScanLedger::empty(), vec![FileIssue::from_error(&e)]),
        };

        let mut matching = sheets.into_iter().filter(|sheet| {
            let marker = sheet
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| sheet_token(n, 3));
            (marker == Some(self.config.return_visit_marker.as_str())) == return_visit
        });

        let Some(sheet) = matching.next() else {
            let issue = FileIssue::new(
                &self.scan_info_root,
                IssueKind::UnreadableSpreadsheet,
                format!(
                    "no exposure spreadsheet for subject {subject_id} ({} visit)",
                    visit_kind(return_visit)
                ),
            );
            log::warn!("{issue}");
            return (ScanLedger::empty(), vec![issue]);
        };

        for extra in matching {
            log::warn!(
                "Ignoring additional exposure spreadsheet {} for subject {subject_id}; using {}",
                extra.display(),
                sheet.display()
            );
        }

        match ScanLedger::from_spreadsheet(&self.source, &sheet, &self.config) {
            Ok(ledger) => (ledger, Vec::new()),
            Err(e) => {
                log::error!(
                    "There is an issue with {}; its scans will be classified as unknown",
                    sheet.display()
                );
                (ScanLedger::empty(), vec![FileIssue::from_error(&e)])
            }
        }
    }

    /// Load every visit of one subject
    ///
    /// Fails when no visit folder matches the subject, or none is an initial
    /// visit. File-level problems are recorded on the visits instead.
    ///
    /// # Arguments
    /// * `subject_id` - Subject token shared by the visit folders
    ///
    /// # Returns
    /// * `Result<Subject>` - The subject with its initial and optional return visit
    pub fn load_subject(&self, subject_id: &str) -> Result<Subject> {
        let folders = self.collect_subject_folders(subject_id)?;
        if folders.is_empty() {
            return Err(StudyError::SubjectNotFound {
                path: self.instrument_root.clone(),
                subject_id: subject_id.to_string(),
            });
        }

        log_operation_start(&format!("Loading subject {subject_id} from"), &self.instrument_root);
        let aggregator = VisitAggregator::new(&self.config, &self.source);
        let mut visits = Vec::with_capacity(folders.len());
        for folder in &folders {
            let return_visit = self.parser.is_return_visit(folder);
            let (ledger, mut issues) = self.ledger_for_visit(subject_id, return_visit);
            let mut visit = aggregator.build_visit(folder, ledger)?;
            issues.append(&mut visit.issues);
            visit.issues = issues;
            visits.push(visit);
        }

        let mut visits = visits.into_iter();
        let first = visits.next().ok_or_else(|| StudyError::SubjectNotFound {
            path: self.instrument_root.clone(),
            subject_id: subject_id.to_string(),
        })?;
        assemble_subject(first, visits)
    }
}

impl<S: TableSource + Sync> StudyLoader<S> {
    /// Load several subjects in parallel
    ///
    /// Results keep the order of `subject_ids`; one subject failing does not
    /// affect the others.
    ///
    /// # Arguments
    /// * `subject_ids` - Subjects to load
    ///
    /// # Returns
    /// * `Vec<(String, Result<Subject>)>` - One outcome per subject id
    pub fn load_study(&self, subject_ids: &[String]) -> Vec<(String, Result<Subject>)> {
        let pb = create_main_progress_bar(subject_ids.len() as u64, Some("Loading subjects"));

        let results: Vec<(String, Result<Subject>)> = subject_ids
            .par_iter()
            .progress_with(pb.clone())
            .map(|id| (id.clone(), self.load_subject(id)))
            .collect();

        pb.finish_and_clear();

        for (id, result) in &results {
            if let Err(e) = result {
                log::error!("Subject {id} could not be loaded: {e}");
            }
        }

        results
    }
}

fn sheet_token(file_name: &str, position: usize) -> Option<&str> {
    let stem = file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem);
    stem.split('_').nth(position).map(str::trim)
}

fn visit_kind(return_visit: bool) -> &'static str {
    if return_visit { "return" } else { "initial" }
}
