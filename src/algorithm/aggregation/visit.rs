//! Visit aggregation
//!
//! For each modality of a visit: find the instrument sub-folder, parse every
//! data file name, resolve location and exposure, read the export and append
//! the measurement. A failing file is recorded on the visit and skipped.

use std::path::Path;
use std::time::Instant;

use crate::config::StudyConfig;
use crate::error::{FileIssue, Result, StudyError};
use crate::identifier::{IdentifierParser, ParsedIdentifier};
use crate::ledger::{ExposureState, ScanLedger};
use crate::location::LocationNormalizer;
use crate::models::{
    BloodFlow, Epidermal, Measurement, MeasurementTag, Modality, SkinRoughness, Visit,
};
use crate::utils::io::{TableSource, find_matching_subfolder, list_files_with_extension};
use crate::utils::logging::{log_issue_summary, log_operation_complete, log_operation_start};

/// Builds `Visit` records from a visit folder and its scan ledger
#[derive(Debug)]
pub struct VisitAggregator<'c, S: TableSource> {
    config: &'c StudyConfig,
    source: S,
    parser: IdentifierParser,
}

impl<'c, S: TableSource> VisitAggregator<'c, S> {
    #[must_use]
    pub fn new(config: &'c StudyConfig, source: S) -> Self {
        Self {
            config,
            source,
            parser: IdentifierParser::from_config(config),
        }
    }

    #[must_use]
    pub fn parser(&self) -> &IdentifierParser {
        &self.parser
    }

    /// Ingest every modality of one visit folder
    ///
    /// Fails only when the folder name itself carries no subject id; missing
    /// modality folders and bad files become issues on the visit.
    pub fn build_visit(&self, folder: &Path, ledger: ScanLedger) -> Result<Visit> {
        let start = Instant::now();
        log_operation_start("Ingesting visit folder", folder);

        let subject_id = self.parser.subject_id(folder)?;
        let return_visit = self.parser.is_return_visit(folder);

        let ledger_issues = ledger.issues();
        let mut visit = Visit::new(&subject_id, return_visit, folder, ledger);
        visit.issues.extend(ledger_issues);

        let mut ingested = 0;
        for modality in Modality::ALL {
            match self.ingest_modality(&mut visit, modality) {
                Ok(count) => ingested += count,
                Err(e) => visit.record_issue(FileIssue::from_error(&e)),
            }
        }

        log_operation_complete("Ingested", folder, ingested, start.elapsed());
        log_issue_summary(folder, visit.issues.len());

        Ok(visit)
    }

    /// Ingest the data files of one modality into the visit
    ///
    /// Returns the number of measurements added.
    pub fn ingest_modality(&self, visit: &mut Visit, modality: Modality) -> Result<usize> {
        let label = self.config.folder_label(modality);
        let data_folder = find_matching_subfolder(&visit.folder, label)?;
        let files = list_files_with_extension(&data_folder, &self.config.data_extension)?;
        log::debug!(
            "Found {} {modality} files in {}",
            files.len(),
            data_folder.display()
        );

        let mut parsed: Vec<ParsedIdentifier> = Vec::with_capacity(files.len());
        for file in &files {
            match self.parser.parse(file) {
                Ok(identifier) => {
                    if identifier.subject_id != visit.subject_id {
                        log::warn!(
                            "File {} names subject {} inside the folder of subject {}",
                            file.display(),
                            identifier.subject_id,
                            visit.subject_id
                        );
                    }
                    parsed.push(identifier);
                }
                Err(e) => visit.record_issue(FileIssue::from_error(&e)),
            }
        }

        // The normalizer needs every raw code of the run before any slot is assigned.
        let normalizer = LocationNormalizer::for_visit(
            &visit.subject_id,
            parsed.iter().map(|p| p.raw_location),
            &self.config.location_overrides,
        );

        let mut added = 0;
        for identifier in &parsed {
            let location = normalizer.resolve(identifier.raw_location);
            if !location.is_resolved() {
                visit.record_issue(FileIssue::from_error(&StudyError::UnresolvedLocation {
                    path: identifier.path.clone(),
                    subject_id: visit.subject_id.clone(),
                    raw_code: identifier.raw_location,
                }));
            }

            let exposure = visit.ledger.classify(identifier.scan_id);
            if exposure == ExposureState::Unknown {
                log::info!(
                    "Scan {} of {} is not in the exposure ledger; exposure unknown",
                    identifier.scan_id,
                    identifier.path.display()
                );
            }

            let tag = MeasurementTag::from_identifier(
                identifier,
                exposure,
                location,
                visit.return_visit,
            );
            let outcome = match modality {
                Modality::Epidermal => self
                    .read::<Epidermal>(tag)
                    .map(|m| visit.add_epidermal(m)),
                Modality::BloodFlow => self
                    .read::<BloodFlow>(tag)
                    .map(|m| visit.add_blood_flow(m)),
                Modality::SkinRoughness => self
                    .read::<SkinRoughness>(tag)
                    .map(|m| visit.add_skin_roughness(m)),
            };

            match outcome {
                Ok(()) => added += 1,
                Err(e) => visit.record_issue(FileIssue::from_error(&e)),
            }
        }

        Ok(added)
    }

    fn read<M: Measurement>(&self, tag: MeasurementTag) -> Result<M> {
        M::read(&self.source, tag, self.config)
    }
}
