//! Per-subject location code exceptions
//!
//! Two subjects were captured with an extra or skipped instrument location
//! code, which breaks the four-consecutive-codes rule. Their codes are mapped
//! to canonical slots through this table and never through arithmetic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Explicit `(subject_id, raw_code) -> slot` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationOverrides {
    table: BTreeMap<String, BTreeMap<i64, u8>>,
}

impl LocationOverrides {
    /// An empty table, every subject uses the arithmetic rule
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The exceptions recorded for the skin exposure study
    ///
    /// `A27` skipped code 14 during capture; `A63` has a repeated scan at
    /// code 42 for the second location.
    #[must_use]
    pub fn study_defaults() -> Self {
        let mut overrides = Self::new();
        for (raw, slot) in [(12, 1), (13, 2), (15, 3), (16, 4)] {
            overrides.insert("A27", raw, slot);
        }
        for (raw, slot) in [(40, 1), (41, 2), (42, 2), (43, 3), (44, 4)] {
            overrides.insert("A63", raw, slot);
        }
        overrides
    }

    /// Add or replace one mapping
    pub fn insert(&mut self, subject_id: &str, raw_code: i64, slot: u8) {
        self.table
            .entry(subject_id.to_string())
            .or_default()
            .insert(raw_code, slot);
    }

    /// Whether the subject bypasses the arithmetic rule
    #[must_use]
    pub fn covers(&self, subject_id: &str) -> bool {
        self.table.contains_key(subject_id)
    }

    /// Slot for a raw code of an overridden subject
    #[must_use]
    pub fn get(&self, subject_id: &str, raw_code: i64) -> Option<u8> {
        self.table.get(subject_id)?.get(&raw_code).copied()
    }

    /// Raw codes listed for a subject, ascending
    #[must_use]
    pub fn codes_for(&self, subject_id: &str) -> Vec<i64> {
        self.table
            .get(subject_id)
            .map(|codes| codes.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Subjects with an override table
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }
}
