//! Surface profilometry measurement
//!
//! Export layout: headerless rows `Ra,<value>`, `Rz,<value>`, `Rq,<value>`.

use serde::Serialize;

use crate::config::StudyConfig;
use crate::error::{Result, StudyError};
use crate::models::measurement::{Measurement, MeasurementTag, Modality};
use crate::utils::io::TableSource;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkinRoughness {
    tag: MeasurementTag,
    /// Arithmetic mean roughness
    pub ra: f64,
    /// Mean peak-to-valley height
    pub rz: f64,
    /// Root mean square roughness
    pub rq: f64,
}

impl SkinRoughness {
    #[must_use]
    pub fn new(tag: MeasurementTag, ra: f64, rz: f64, rq: f64) -> Self {
        Self { tag, ra, rz, rq }
    }
}

impl Measurement for SkinRoughness {
    const MODALITY: Modality = Modality::SkinRoughness;

    fn tag(&self) -> &MeasurementTag {
        &self.tag
    }

    fn read<S: TableSource + ?Sized>(
        source: &S,
        tag: MeasurementTag,
        _config: &StudyConfig,
    ) -> Result<Self> {
        let table = source.read_delimited(&tag.path, None)?;
        let value = |row: usize, name: &str| {
            table.number(row, 1).ok_or_else(|| {
                StudyError::invalid_data(&tag.path, format!("missing {name} in row {row}"))
            })
        };

        let ra = value(0, "Ra")?;
        let rz = value(1, "Rz")?;
        let rq = value(2, "Rq")?;
        Ok(Self::new(tag, ra, rz, rq))
    }
}
