//! Reconciles multi-instrument skin-imaging study exports into per-subject
//! records, and derives epidermal biomarkers from optical A-scan curves.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod identifier;
pub mod ledger;
pub mod loader;
pub mod location;
pub mod models;
pub mod report;
pub mod utils;

// Core types
pub use config::StudyConfig;
pub use error::{FileIssue, IssueKind, Result, StudyError};
pub use loader::StudyLoader;

// Ingestion building blocks
pub use algorithm::aggregation::{VisitAggregator, assemble_subject};
pub use identifier::{FilenameShape, IdentifierParser, ParsedIdentifier};
pub use ledger::{ExposureState, ScanLedger};
pub use location::{LocationNormalizer, LocationOverrides, LocationSlot};

// Domain models
pub use models::{
    BloodFlow, Epidermal, Measurement, MeasurementTag, Modality, SkinRoughness, Subject, Visit,
};

// Curve analysis
pub use algorithm::curve::{BoundaryMethod, CurveAnalyzer, CurveConfig};

// Reporting
pub use report::{MeasurementRow, SubjectReport};

pub use utils::io::{FsTableSource, Table, TableSource};
