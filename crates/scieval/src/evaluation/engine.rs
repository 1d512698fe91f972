use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use super::domain::{
    Category, EvaluationId, EvaluationRecord, EvaluationStatus, Period, RawSubmission, SubjectId,
};
use super::validation::{self, ValidationError};
use super::weights::{AggregationError, WeightConfig};
use super::{rules, weights};

static EVALUATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_evaluation_id() -> EvaluationId {
    let id = EVALUATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EvaluationId(format!("eval-{id:06}"))
}

/// Failure while turning a raw submission into a draft record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
    #[error("block {category} appears more than once in the submission")]
    DuplicateCategory { category: Category },
}

/// Stateless pipeline turning raw block figures into a draft record:
/// validate each block, score it, then aggregate under the supplied weights.
///
/// The engine never touches storage; committing the draft is the record
/// manager's job.
#[derive(Debug, Default)]
pub struct EvaluationEngine;

impl EvaluationEngine {
    pub fn evaluate(
        &self,
        subject: SubjectId,
        period: Period,
        submission: RawSubmission,
        weights: WeightConfig,
    ) -> Result<EvaluationRecord, EvaluationError> {
        // Reject a bad weight configuration before doing any scoring work.
        weights.validate().map_err(AggregationError::from)?;

        let mut scores = BTreeMap::new();
        for entry in submission.entries {
            let category = entry.category();
            if scores.contains_key(&category) {
                return Err(EvaluationError::DuplicateCategory { category });
            }
            let validated = validation::validate(entry)?;
            scores.insert(category, rules::score(&validated));
        }

        let index = weights::aggregate(&scores, &weights)?;

        Ok(EvaluationRecord {
            id: next_evaluation_id(),
            subject,
            period,
            scores,
            index,
            weights,
            revision: 1,
            computed_at: Utc::now(),
            status: EvaluationStatus::Draft,
        })
    }
}
