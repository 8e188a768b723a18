//! Domain models for the skin exposure study
//!
//! Measurements from the three instruments, and the visit and subject
//! aggregates they are collected into.

pub mod blood_flow;
pub mod epidermal;
pub mod measurement;
pub mod roughness;
pub mod visit;

// Re-export commonly used types
pub use blood_flow::BloodFlow;
pub use epidermal::{Boundary, CurveAnalysis, Epidermal};
pub use measurement::{Measurement, MeasurementTag, Modality};
pub use roughness::SkinRoughness;
pub use visit::{Subject, Visit};
