//! Flat per-measurement report of a loaded subject
//!
//! One row per measurement across both visits, carrying identity, exposure,
//! location and whichever derived values the modality has.

use serde::Serialize;

use crate::error::FileIssue;
use crate::ledger::ExposureState;
use crate::models::{Measurement, MeasurementTag, Modality, Subject, Visit};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRow {
    pub subject_id: String,
    pub return_visit: bool,
    pub modality: Modality,
    pub scan_id: i64,
    pub arm_id: String,
    /// Canonical slot, `None` when unresolved
    pub location: Option<u8>,
    pub exposure: ExposureState,
    pub file: String,
    pub depth_at_max_intensity: Option<f64>,
    pub boundary_depth: Option<f64>,
    pub sid: Option<f64>,
    pub auc: Option<f64>,
    pub plexus_depth: Option<f64>,
    pub max_vascular_density: Option<f64>,
    pub ra: Option<f64>,
    pub rz: Option<f64>,
    pub rq: Option<f64>,
}

impl MeasurementRow {
    fn from_tag(tag: &MeasurementTag, modality: Modality) -> Self {
        Self {
            subject_id: tag.subject_id.clone(),
            return_visit: tag.return_visit,
            modality,
            scan_id: tag.scan_id,
            arm_id: tag.arm_id.clone(),
            location: tag.location.slot(),
            exposure: tag.exposure,
            file: tag.path.display().to_string(),
            depth_at_max_intensity: None,
            boundary_depth: None,
            sid: None,
            auc: None,
            plexus_depth: None,
            max_vascular_density: None,
            ra: None,
            rz: None,
            rq: None,
        }
    }
}

/// Report for one subject, rows ordered by visit then modality
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectReport {
    pub subject_id: String,
    pub has_return_visit: bool,
    pub rows: Vec<MeasurementRow>,
    pub issues: Vec<FileIssue>,
}

impl SubjectReport {
    #[must_use]
    pub fn from_subject(subject: &Subject) -> Self {
        Self {
            subject_id: subject.id().to_string(),
            has_return_visit: subject.return_visit.is_some(),
            rows: subject.visits().flat_map(visit_rows).collect(),
            issues: subject.issues().cloned().collect(),
        }
    }

    /// Rows of one modality
    pub fn rows_for(&self, modality: Modality) -> impl Iterator<Item = &MeasurementRow> {
        self.rows.iter().filter(move |row| row.modality == modality)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn visit_rows(visit: &Visit) -> Vec<MeasurementRow> {
    let epidermal = visit.epidermal.iter().map(|m| {
        let analysis = m.analysis();
        MeasurementRow {
            depth_at_max_intensity: analysis.depth_at_max_intensity,
            boundary_depth: m.boundary().and_then(|b| b.depth),
            sid: analysis.sid,
            auc: analysis.auc,
            ..MeasurementRow::from_tag(m.tag(), Modality::Epidermal)
        }
    });

    let blood_flow = visit.blood_flow.iter().map(|m| MeasurementRow {
        plexus_depth: Some(m.plexus_depth()),
        max_vascular_density: m.max_vascular_density(),
        ..MeasurementRow::from_tag(m.tag(), Modality::BloodFlow)
    });

    let roughness = visit.skin_roughness.iter().map(|m| MeasurementRow {
        ra: Some(m.ra),
        rz: Some(m.rz),
        rq: Some(m.rq),
        ..MeasurementRow::from_tag(m.tag(), Modality::SkinRoughness)
    });

    epidermal.chain(blood_flow).chain(roughness).collect()
}
