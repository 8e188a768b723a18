//! Configuration for epidermal curve analysis

use serde::{Deserialize, Serialize};

/// Parameters of the boundary, SID and AuC computations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Normalized intensity the attenuation index is read at
    pub sid_reference: f64,
    /// Numerator of the attenuation index
    pub sid_numerator: f64,
    /// Depth past the intensity peak that bounds the AuC integral
    pub auc_window: f64,
    /// First index the sign-change search considers
    pub sign_change_start: usize,
    /// Index the sign-change search stops before
    pub sign_change_limit: usize,
    /// Samples excluded at the head of the max-second-difference window
    pub head_margin: usize,
    /// Samples excluded at the tail of the max-second-difference window
    pub tail_margin: usize,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            sid_reference: 0.2,
            sid_numerator: 0.8,
            auc_window: 0.2,
            sign_change_start: 0,
            sign_change_limit: 250,
            head_margin: 10,
            tail_margin: 10,
        }
    }
}

impl CurveConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set where the sign-change search starts and stops
    #[must_use]
    pub fn with_sign_change_range(mut self, start: usize, limit: usize) -> Self {
        self.sign_change_start = start;
        self.sign_change_limit = limit;
        self
    }

    /// Set the head and tail margins of the max-second-difference window
    #[must_use]
    pub fn with_margins(mut self, head: usize, tail: usize) -> Self {
        self.head_margin = head;
        self.tail_margin = tail;
        self
    }

    /// Set the AuC depth window
    #[must_use]
    pub fn with_auc_window(mut self, window: f64) -> Self {
        self.auc_window = window;
        self
    }
}
