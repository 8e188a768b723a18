//! Aggregation of instrument exports into visits and subjects

pub mod subject;
pub mod visit;

pub use subject::assemble_subject;
pub use visit::VisitAggregator;
