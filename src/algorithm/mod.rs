//! Algorithm implementations for the skin exposure study
//!
//! Aggregation of instrument exports into visit and subject records, and the
//! epidermal curve analysis run on the aggregated measurements.

pub mod aggregation;
pub mod curve;
