//! Canonical location slots
//!
//! Instruments number scanned locations with an arbitrary, increasing code.
//! Each visit scans four locations, and the canonical slot is anchored to the
//! last four codes seen for the visit: `slot = code - (max_code - 4)`.

pub mod overrides;

pub use overrides::LocationOverrides;

use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// Number of canonical locations scanned per visit
pub const LOCATIONS_PER_VISIT: i64 = 4;

/// Canonical location of a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LocationSlot {
    /// One of the four standard positions, 1-4
    Canonical(u8),
    /// Raw code could not be placed; the measurement is kept but flagged
    Unresolved { raw_code: i64 },
}

impl LocationSlot {
    /// Slot number if resolved
    #[must_use]
    pub fn slot(&self) -> Option<u8> {
        match self {
            Self::Canonical(slot) => Some(*slot),
            Self::Unresolved { .. } => None,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Canonical(_))
    }
}

impl fmt::Display for LocationSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canonical(slot) => write!(f, "{slot}"),
            Self::Unresolved { raw_code } => write!(f, "unresolved ({raw_code})"),
        }
    }
}

/// Maps raw instrument codes of one visit to canonical slots
#[derive(Debug, Clone)]
pub struct LocationNormalizer<'a> {
    subject_id: String,
    min_code: Option<i64>,
    overrides: &'a LocationOverrides,
}

impl<'a> LocationNormalizer<'a> {
    /// Build the normalizer from every raw code seen in one visit
    pub fn for_visit<I>(subject_id: &str, raw_codes: I, overrides: &'a LocationOverrides) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let codes: SmallVec<[i64; 8]> = raw_codes.into_iter().collect();
        let min_code = codes.iter().max().map(|max| max - LOCATIONS_PER_VISIT);

        Self {
            subject_id: subject_id.to_string(),
            min_code,
            overrides,
        }
    }

    /// Whether this subject is resolved through the override table
    #[must_use]
    pub fn is_overridden(&self) -> bool {
        self.overrides.covers(&self.subject_id)
    }

    /// Canonical slot for a raw code
    #[must_use]
    pub fn resolve(&self, raw_code: i64) -> LocationSlot {
        if self.is_overridden() {
            return match self.overrides.get(&self.subject_id, raw_code) {
                Some(slot) => LocationSlot::Canonical(slot),
                None => LocationSlot::Unresolved { raw_code },
            };
        }

        match self.min_code.map(|min| raw_code - min) {
            Some(slot @ 1..=LOCATIONS_PER_VISIT) => {
                LocationSlot::Canonical(u8::try_from(slot).unwrap_or_default())
            }
            _ => LocationSlot::Unresolved { raw_code },
        }
    }
}
