//! Staged analysis of an epidermal intensity curve
//!
//! Stages run in a fixed order, each reading the previous stage's result from
//! the measurement's cache:
//!
//! 1. normalize to `[0, 1]`
//! 2. locate the intensity peak
//! 3. detect the epidermal/dermal boundary
//! 4. attenuation index (SID)
//! 5. area under the normalized curve (AuC)
//!
//! Every stage is a pure function of the raw samples and the configuration,
//! so re-running a stage stores the same values again.

use itertools::{Itertools, MinMaxResult};

use super::boundary::{BoundaryMethod, max_second_difference, sign_change};
use super::config::CurveConfig;
use super::derivative::{central_difference, trapezoid};
use crate::error::{Result, StudyError};
use crate::models::epidermal::{Boundary, Epidermal};
use crate::models::measurement::Measurement;

/// Runs the curve analysis stages with one configuration
#[derive(Debug, Clone, Default)]
pub struct CurveAnalyzer {
    config: CurveConfig,
}

impl CurveAnalyzer {
    #[must_use]
    pub fn new(config: CurveConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Run every stage, storing all results on the measurement
    pub fn analyze(&self, measurement: &mut Epidermal, method: BoundaryMethod) -> Result<()> {
        self.normalize(measurement)?;
        self.locate_peak(measurement)?;
        self.detect_boundary(measurement, method)?;
        self.attenuation_index(measurement)?;
        self.area_under_curve(measurement)?;
        Ok(())
    }

    /// `(I - min) / (max - min)`; a flat curve is a `DegenerateCurve` error
    pub fn normalize<'a>(&self, measurement: &'a mut Epidermal) -> Result<&'a [f64]> {
        let intensity = measurement.intensity();
        if let Some(bad) = intensity.iter().position(|v| !v.is_finite()) {
            return Err(StudyError::InvalidCurve {
                path: measurement.tag().path.clone(),
                reason: format!("non-finite intensity at index {bad}"),
            });
        }

        let (min, max) = match intensity.iter().copied().minmax_by(f64::total_cmp) {
            MinMaxResult::MinMax(min, max) if max > min => (min, max),
            MinMaxResult::NoElements => {
                return Err(StudyError::InvalidCurve {
                    path: measurement.tag().path.clone(),
                    reason: "no samples".to_string(),
                });
            }
            _ => {
                return Err(StudyError::DegenerateCurve {
                    path: measurement.tag().path.clone(),
                    reason: "maximum intensity equals minimum intensity".to_string(),
                });
            }
        };

        let range = max - min;
        let normalized = intensity.iter().map(|v| (v - min) / range).collect();
        let normalized = measurement.analysis.normalized.insert(normalized);
        Ok(normalized.as_slice())
    }

    /// Depth of the maximum intensity, first occurrence on ties
    pub fn locate_peak(&self, measurement: &mut Epidermal) -> Result<f64> {
        let normalized = require(measurement, "locate peak", "normalize", |m| {
            m.analysis.normalized.as_deref()
        })?;

        let peak_index = first_max_index(normalized).unwrap_or_default();
        let depth = measurement.depth()[peak_index];

        measurement.analysis.peak_index = Some(peak_index);
        measurement.analysis.depth_at_max_intensity = Some(depth);
        Ok(depth)
    }

    /// First derivative of the normalized curve over depth
    pub fn derivative(&self, measurement: &Epidermal) -> Result<Vec<f64>> {
        let normalized = require(measurement, "derivative", "normalize", |m| {
            m.analysis.normalized.as_deref()
        })?;
        Ok(central_difference(measurement.depth(), normalized))
    }

    /// Locate the boundary with the chosen method
    ///
    /// A method that finds no boundary stores an unresolved boundary rather
    /// than failing.
    pub fn detect_boundary(
        &self,
        measurement: &mut Epidermal,
        method: BoundaryMethod,
    ) -> Result<Boundary> {
        require(measurement, "detect boundary", "locate peak", |m| {
            m.analysis.peak_index
        })?;
        let derivative = self.derivative(measurement)?;

        let index = match method {
            BoundaryMethod::SignChange => sign_change(
                &derivative,
                self.config.sign_change_start,
                self.config.sign_change_limit,
            ),
            BoundaryMethod::MaxSecondDifference => max_second_difference(
                &derivative,
                self.config.head_margin,
                self.config.tail_margin,
            ),
        };

        if index.is_none() {
            log::info!(
                "No {method:?} boundary found in {}",
                measurement.tag().path.display()
            );
        }

        let boundary = Boundary {
            method,
            index,
            depth: index.map(|i| measurement.depth()[i]),
        };
        measurement.analysis.boundary = Some(boundary);
        Ok(boundary)
    }

    /// `numerator / depth` at the normalized intensity closest to the reference
    pub fn attenuation_index(&self, measurement: &mut Epidermal) -> Result<f64> {
        require(measurement, "attenuation index", "detect boundary", |m| {
            m.analysis.boundary.as_ref()
        })?;
        let normalized = require(measurement, "attenuation index", "normalize", |m| {
            m.analysis.normalized.as_deref()
        })?;

        let index = closest_index(normalized, self.config.sid_reference).unwrap_or_default();
        let depth = measurement.depth()[index];
        if depth == 0.0 {
            return Err(StudyError::InvalidCurve {
                path: measurement.tag().path.clone(),
                reason: format!("zero depth at reference intensity index {index}"),
            });
        }

        let sid = self.config.sid_numerator / depth;
        measurement.analysis.sid = Some(sid);
        Ok(sid)
    }

    /// Trapezoidal area of the normalized curve from the peak to the depth
    /// window past it, bounds ordered so the width is never negative
    pub fn area_under_curve(&self, measurement: &mut Epidermal) -> Result<f64> {
        require(measurement, "area under curve", "attenuation index", |m| {
            m.analysis.sid
        })?;
        let normalized = require(measurement, "area under curve", "normalize", |m| {
            m.analysis.normalized.as_deref()
        })?;
        let (peak_index, peak_depth) = match (
            measurement.analysis.peak_index,
            measurement.analysis.depth_at_max_intensity,
        ) {
            (Some(index), Some(depth)) => (index, depth),
            _ => return Err(not_ready(measurement, "area under curve", "locate peak")),
        };

        let target = peak_depth + self.config.auc_window;
        let end_index = closest_index(measurement.depth(), target).unwrap_or(peak_index);
        let (lower, upper) = if end_index < peak_index {
            (end_index, peak_index)
        } else {
            (peak_index, end_index)
        };

        let auc = trapezoid(
            &measurement.depth()[lower..=upper],
            &normalized[lower..=upper],
        );
        measurement.analysis.auc = Some(auc);
        Ok(auc)
    }
}

/// Fetch a prerequisite from the cache or report the missing stage
fn require<'a, T>(
    measurement: &'a Epidermal,
    stage: &'static str,
    requires: &'static str,
    get: impl FnOnce(&'a Epidermal) -> Option<T>,
) -> Result<T> {
    get(measurement).ok_or_else(|| not_ready(measurement, stage, requires))
}

fn not_ready(measurement: &Epidermal, stage: &'static str, requires: &'static str) -> StudyError {
    StudyError::StageNotReady {
        path: measurement.tag().path.clone(),
        stage,
        requires,
    }
}

/// Index of the first maximum
fn first_max_index(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// Index of the value closest to `target`, first occurrence on ties
fn closest_index(values: &[f64], target: f64) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| {
            let distance = (v - target).abs();
            match best {
                Some((_, d)) if distance >= d => best,
                _ => Some((i, distance)),
            }
        })
        .map(|(i, _)| i)
}
