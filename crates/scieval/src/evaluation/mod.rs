//! Scoring engine and record lifecycle for scientific activity evaluation.
//!
//! Submissions flow through validation, per-block scoring, and weighted
//! aggregation into an immutable evaluation record; the record manager owns
//! the draft/final/superseded lifecycle over a pluggable store, and the
//! report module flattens records into export rows.

pub mod domain;
pub mod engine;
pub mod report;
pub mod router;
pub mod rules;
pub mod service;
pub mod store;
pub mod validation;
pub mod weights;

#[cfg(test)]
mod tests;

pub use domain::{
    Category, CategoryInputs, CategoryScore, EfficiencyLevel, EvaluationId, EvaluationRecord,
    EvaluationStatus, EvaluationSummary, InnovationInputs, OutreachInputs, Period, ProjectInputs,
    RawSubmission, ResearchInputs, ScoreComponent, SubjectId,
};
pub use engine::{EvaluationEngine, EvaluationError};
pub use report::{project, project_ordered, ReportOrdering, ReportRow};
pub use router::{evaluation_router, EvaluationRequest};
pub use service::{EvaluationService, ServiceError, SupersedePolicy};
pub use store::{EvaluationStore, StoreError};
pub use validation::{validate, ValidatedInputs, ValidationError, READINESS_LEVELS};
pub use weights::{aggregate, AggregationError, WeightConfig, WeightConfigError, WEIGHT_SUM_TOLERANCE};
