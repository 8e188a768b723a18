//! Attributes shared by every instrument measurement

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::StudyConfig;
use crate::error::Result;
use crate::identifier::ParsedIdentifier;
use crate::ledger::ExposureState;
use crate::location::LocationSlot;
use crate::utils::io::TableSource;

/// Instrument modality of a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Modality {
    /// Optical depth-reflectance A-scan
    Epidermal,
    /// Laser-Doppler blood flow depth profile
    BloodFlow,
    /// Surface profilometry
    SkinRoughness,
}

impl Modality {
    pub const ALL: [Self; 3] = [Self::Epidermal, Self::BloodFlow, Self::SkinRoughness];
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Epidermal => "epidermal",
            Self::BloodFlow => "blood flow",
            Self::SkinRoughness => "skin roughness",
        };
        f.write_str(name)
    }
}

/// Identity, timing and placement of one measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementTag {
    /// Export the measurement was read from
    pub path: PathBuf,
    pub subject_id: String,
    pub scan_id: i64,
    pub arm_id: String,
    pub exposure: ExposureState,
    pub location: LocationSlot,
    pub return_visit: bool,
}

impl MeasurementTag {
    /// Tag a parsed file name with its resolved exposure and location
    ///
    /// The visit flag belongs to the enclosing visit folder; token 1 of a data
    /// file name is the arm label.
    #[must_use]
    pub fn from_identifier(
        identifier: &ParsedIdentifier,
        exposure: ExposureState,
        location: LocationSlot,
        return_visit: bool,
    ) -> Self {
        Self {
            path: identifier.path.clone(),
            subject_id: identifier.subject_id.clone(),
            scan_id: identifier.scan_id,
            arm_id: identifier.arm_id.clone(),
            exposure,
            location,
            return_visit,
        }
    }

    /// `Some(true)` after exposure, `None` when the scan is not in the ledger
    #[must_use]
    pub fn exposed(&self) -> Option<bool> {
        self.exposure.exposed()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A measurement read from one instrument export
pub trait Measurement: Sized {
    const MODALITY: Modality;

    fn tag(&self) -> &MeasurementTag;

    /// Read the export named by the tag
    fn read<S: TableSource + ?Sized>(
        source: &S,
        tag: MeasurementTag,
        config: &StudyConfig,
    ) -> Result<Self>;
}
