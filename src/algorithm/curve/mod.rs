//! Epidermal curve analysis
//!
//! Normalization, boundary detection and the SID/AuC biomarkers derived
//! from an A-scan intensity-vs-depth curve.

pub mod analyzer;
pub mod boundary;
pub mod config;
pub mod derivative;

pub use analyzer::CurveAnalyzer;
pub use boundary::BoundaryMethod;
pub use config::CurveConfig;
