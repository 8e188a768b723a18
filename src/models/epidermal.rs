//! Epidermal A-scan measurement
//!
//! Export layout: a key/value summary block at the top of the file, then a
//! depth table whose header sits at a fixed row. The first column of the
//! depth table is depth (mm), the second the reflected intensity.

use serde::Serialize;

use crate::algorithm::curve::BoundaryMethod;
use crate::config::StudyConfig;
use crate::error::{Result, StudyError};
use crate::models::measurement::{Measurement, MeasurementTag, Modality};
use crate::utils::io::TableSource;

/// Boundary found by one of the detection methods
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Boundary {
    pub method: BoundaryMethod,
    /// Curve index of the boundary; `None` when the method found none
    pub index: Option<usize>,
    pub depth: Option<f64>,
}

/// Derived values cached on an epidermal measurement, filled stage by stage
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurveAnalysis {
    pub normalized: Option<Vec<f64>>,
    pub peak_index: Option<usize>,
    pub depth_at_max_intensity: Option<f64>,
    pub boundary: Option<Boundary>,
    pub sid: Option<f64>,
    pub auc: Option<f64>,
}

/// Depth-resolved intensity profile from the optical instrument
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Epidermal {
    tag: MeasurementTag,
    summary: Vec<(String, String)>,
    depth: Vec<f64>,
    intensity: Vec<f64>,
    pub(crate) analysis: CurveAnalysis,
}

impl Epidermal {
    /// Create a measurement from depth/intensity samples
    pub fn new(tag: MeasurementTag, depth: Vec<f64>, intensity: Vec<f64>) -> Result<Self> {
        if depth.len() != intensity.len() {
            return Err(StudyError::InvalidCurve {
                path: tag.path.clone(),
                reason: format!(
                    "{} depth samples but {} intensity samples",
                    depth.len(),
                    intensity.len()
                ),
            });
        }
        if depth.is_empty() {
            return Err(StudyError::InvalidCurve {
                path: tag.path.clone(),
                reason: "no samples".to_string(),
            });
        }

        Ok(Self {
            tag,
            summary: Vec::new(),
            depth,
            intensity,
            analysis: CurveAnalysis::default(),
        })
    }

    /// Attach the export's summary block
    #[must_use]
    pub fn with_summary(mut self, summary: Vec<(String, String)>) -> Self {
        self.summary = summary;
        self
    }

    #[must_use]
    pub fn depth(&self) -> &[f64] {
        &self.depth
    }

    #[must_use]
    pub fn intensity(&self) -> &[f64] {
        &self.intensity
    }

    #[must_use]
    pub fn summary(&self) -> &[(String, String)] {
        &self.summary
    }

    /// Summary value for a key, compared case-insensitively
    #[must_use]
    pub fn summary_value(&self, key: &str) -> Option<&str> {
        self.summary
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Cached analysis results
    #[must_use]
    pub fn analysis(&self) -> &CurveAnalysis {
        &self.analysis
    }

    #[must_use]
    pub fn normalized(&self) -> Option<&[f64]> {
        self.analysis.normalized.as_deref()
    }

    #[must_use]
    pub fn sid(&self) -> Option<f64> {
        self.analysis.sid
    }

    #[must_use]
    pub fn auc(&self) -> Option<f64> {
        self.analysis.auc
    }

    #[must_use]
    pub fn boundary(&self) -> Option<&Boundary> {
        self.analysis.boundary.as_ref()
    }
}

impl Measurement for Epidermal {
    const MODALITY: Modality = Modality::Epidermal;

    fn tag(&self) -> &MeasurementTag {
        &self.tag
    }

    fn read<S: TableSource + ?Sized>(
        source: &S,
        tag: MeasurementTag,
        config: &StudyConfig,
    ) -> Result<Self> {
        let table = source.read_delimited(&tag.path, Some(config.epidermal_header_row))?;

        let summary = table
            .preamble
            .iter()
            .take(config.epidermal_summary_rows + 1)
            .filter_map(|row| {
                let key = row.first()?.trim();
                (!key.is_empty()).then(|| {
                    (
                        key.to_string(),
                        row.get(1).map(|v| v.trim().to_string()).unwrap_or_default(),
                    )
                })
            })
            .collect();

        let (mut series, skipped) = table.numeric_columns(&[0, 1]);
        if skipped > 0 {
            log::debug!(
                "Skipped {skipped} non-numeric rows in {}",
                tag.path.display()
            );
        }
        let intensity = series.pop().unwrap_or_default();
        let depth = series.pop().unwrap_or_default();

        Ok(Self::new(tag, depth, intensity)?.with_summary(summary))
    }
}
