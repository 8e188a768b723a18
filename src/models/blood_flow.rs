//! Laser-Doppler blood flow measurement
//!
//! Export layout: the first row carries the plexus depth in its second cell
//! (`"0.31 mm"`), the depth table header follows at a fixed row with columns
//! depth, vascular density and vessel diameter.

use serde::Serialize;

use crate::config::StudyConfig;
use crate::error::{Result, StudyError};
use crate::models::measurement::{Measurement, MeasurementTag, Modality};
use crate::utils::io::TableSource;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BloodFlow {
    tag: MeasurementTag,
    plexus_depth: f64,
    depth: Vec<f64>,
    vascular_density: Vec<f64>,
    vessel_diameter: Vec<f64>,
}

impl BloodFlow {
    #[must_use]
    pub fn new(
        tag: MeasurementTag,
        plexus_depth: f64,
        depth: Vec<f64>,
        vascular_density: Vec<f64>,
        vessel_diameter: Vec<f64>,
    ) -> Self {
        Self {
            tag,
            plexus_depth,
            depth,
            vascular_density,
            vessel_diameter,
        }
    }

    #[must_use]
    pub fn plexus_depth(&self) -> f64 {
        self.plexus_depth
    }

    #[must_use]
    pub fn depth(&self) -> &[f64] {
        &self.depth
    }

    #[must_use]
    pub fn vascular_density(&self) -> &[f64] {
        &self.vascular_density
    }

    #[must_use]
    pub fn vessel_diameter(&self) -> &[f64] {
        &self.vessel_diameter
    }

    /// Largest vascular density sample; `None` for an empty series
    #[must_use]
    pub fn max_vascular_density(&self) -> Option<f64> {
        self.vascular_density
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .max_by(f64::total_cmp)
    }
}

impl Measurement for BloodFlow {
    const MODALITY: Modality = Modality::BloodFlow;

    fn tag(&self) -> &MeasurementTag {
        &self.tag
    }

    fn read<S: TableSource + ?Sized>(
        source: &S,
        tag: MeasurementTag,
        config: &StudyConfig,
    ) -> Result<Self> {
        let table = source.read_delimited(&tag.path, Some(config.blood_flow_header_row))?;

        let plexus_cell = table
            .preamble_cell(0, 1)
            .ok_or_else(|| StudyError::invalid_data(&tag.path, "missing plexus depth cell"))?;
        let plexus_depth = plexus_cell
            .split(' ')
            .next()
            .and_then(|v| v.parse::<f64>().ok())
            .ok_or_else(|| {
                StudyError::invalid_data(
                    &tag.path,
                    format!("plexus depth '{plexus_cell}' is not a number"),
                )
            })?;

        let (series, skipped) = table.numeric_columns(&[0, 1, 2]);
        if skipped > 0 {
            log::debug!(
                "Skipped {skipped} non-numeric rows in {}",
                tag.path.display()
            );
        }
        let [depth, vascular_density, vessel_diameter] = <[Vec<f64>; 3]>::try_from(series)
            .map_err(|_| StudyError::invalid_data(&tag.path, "depth table is not three columns"))?;

        Ok(Self::new(
            tag,
            plexus_depth,
            depth,
            vascular_density,
            vessel_diameter,
        ))
    }
}
