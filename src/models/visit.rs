//! Visit and subject aggregates

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::algorithm::curve::{BoundaryMethod, CurveAnalyzer};
use crate::error::FileIssue;
use crate::ledger::ScanLedger;
use crate::models::blood_flow::BloodFlow;
use crate::models::epidermal::Epidermal;
use crate::models::measurement::{Measurement, MeasurementTag};
use crate::models::roughness::SkinRoughness;

/// One clinical session of a subject
///
/// Measurements are appended during ingestion only; once the visit folder
/// has been processed the visit is treated as read-only.
#[derive(Debug, Clone, Serialize)]
pub struct Visit {
    pub subject_id: String,
    pub return_visit: bool,
    pub folder: PathBuf,
    pub ledger: ScanLedger,
    pub epidermal: Vec<Epidermal>,
    pub blood_flow: Vec<BloodFlow>,
    pub skin_roughness: Vec<SkinRoughness>,
    /// Problems with individual files that were skipped or flagged
    pub issues: Vec<FileIssue>,
}

impl Visit {
    #[must_use]
    pub fn new(subject_id: &str, return_visit: bool, folder: &Path, ledger: ScanLedger) -> Self {
        Self {
            subject_id: subject_id.to_string(),
            return_visit,
            folder: folder.to_path_buf(),
            ledger,
            epidermal: Vec::new(),
            blood_flow: Vec::new(),
            skin_roughness: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn add_epidermal(&mut self, measurement: Epidermal) {
        self.epidermal.push(measurement);
    }

    pub fn add_blood_flow(&mut self, measurement: BloodFlow) {
        self.blood_flow.push(measurement);
    }

    pub fn add_skin_roughness(&mut self, measurement: SkinRoughness) {
        self.skin_roughness.push(measurement);
    }

    pub fn record_issue(&mut self, issue: FileIssue) {
        self.issues.push(issue);
    }

    #[must_use]
    pub fn num_epidermal(&self) -> usize {
        self.epidermal.len()
    }

    #[must_use]
    pub fn num_blood_flow(&self) -> usize {
        self.blood_flow.len()
    }

    #[must_use]
    pub fn num_skin_roughness(&self) -> usize {
        self.skin_roughness.len()
    }

    /// Tags of every measurement in the visit
    pub fn tags(&self) -> impl Iterator<Item = &MeasurementTag> {
        self.epidermal
            .iter()
            .map(Measurement::tag)
            .chain(self.blood_flow.iter().map(Measurement::tag))
            .chain(self.skin_roughness.iter().map(Measurement::tag))
    }

    /// Measurements kept with an unresolved location
    pub fn unresolved_locations(&self) -> impl Iterator<Item = &MeasurementTag> {
        self.tags().filter(|tag| !tag.location.is_resolved())
    }

    /// Run the full curve analysis on every epidermal measurement
    ///
    /// A measurement that cannot be analysed is recorded as an issue and the
    /// rest continue. Returns how many measurements were analysed.
    pub fn analyze_epidermal(&mut self, analyzer: &CurveAnalyzer, method: BoundaryMethod) -> usize {
        let mut analysed = 0;
        let mut failures = Vec::new();

        for measurement in &mut self.epidermal {
            match analyzer.analyze(measurement, method) {
                Ok(()) => analysed += 1,
                Err(e) => failures.push(FileIssue::from_error(&e)),
            }
        }

        self.issues.extend(failures);
        analysed
    }
}

/// A study participant with an initial and an optional return visit
#[derive(Debug, Clone, Serialize)]
pub struct Subject {
    id: String,
    pub initial_visit: Visit,
    pub return_visit: Option<Visit>,
}

impl Subject {
    #[must_use]
    pub fn new(id: &str, initial_visit: Visit) -> Self {
        Self {
            id: id.to_string(),
            initial_visit,
            return_visit: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Attach the return visit, handing back any visit it replaces
    pub fn attach_return_visit(&mut self, visit: Visit) -> Option<Visit> {
        self.return_visit.replace(visit)
    }

    /// Initial visit first, then the return visit if present
    pub fn visits(&self) -> impl Iterator<Item = &Visit> {
        std::iter::once(&self.initial_visit).chain(self.return_visit.as_ref())
    }

    pub fn visits_mut(&mut self) -> impl Iterator<Item = &mut Visit> {
        std::iter::once(&mut self.initial_visit).chain(self.return_visit.as_mut())
    }

    /// Every file issue across both visits
    pub fn issues(&self) -> impl Iterator<Item = &FileIssue> {
        self.visits().flat_map(|visit| visit.issues.iter())
    }
}
