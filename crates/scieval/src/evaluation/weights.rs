//! Block weights and aggregation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Category, CategoryScore};

/// Tolerance for the weights-sum-to-one check. Sums outside this window are
/// rejected instead of renormalized, so two evaluations claiming the same
/// weights are actually comparable.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weight per block, snapshotted into every evaluation record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightConfig {
    pub research: f64,
    pub projects: f64,
    pub outreach: f64,
    pub innovation: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            research: 0.25,
            projects: 0.25,
            outreach: 0.25,
            innovation: 0.25,
        }
    }
}

impl WeightConfig {
    pub fn weight(&self, category: Category) -> f64 {
        match category {
            Category::Research => self.research,
            Category::Projects => self.projects,
            Category::Outreach => self.outreach,
            Category::Innovation => self.innovation,
        }
    }

    pub fn sum(&self) -> f64 {
        self.research + self.projects + self.outreach + self.innovation
    }

    pub fn validate(&self) -> Result<(), WeightConfigError> {
        for category in Category::ALL {
            let value = self.weight(category);
            if !value.is_finite() || value < 0.0 {
                return Err(WeightConfigError::Negative { category, value });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightConfigError::SumOutOfTolerance {
                sum,
                tolerance: WEIGHT_SUM_TOLERANCE,
            });
        }
        Ok(())
    }
}

/// Weight misconfiguration; fatal to the evaluation attempt and fixed by an
/// operator, never patched up by the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightConfigError {
    #[error("weight for block {category} must be a finite non-negative number, got {value}")]
    Negative { category: Category, value: f64 },
    #[error("block weights must sum to 1.0 within {tolerance}, got {sum}")]
    SumOutOfTolerance { sum: f64, tolerance: f64 },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregationError {
    #[error(transparent)]
    Weights(#[from] WeightConfigError),
    #[error("no score present for block {category}; the evaluation is incomplete")]
    MissingCategory { category: Category },
}

/// Weighted sum of the four sub-scores.
///
/// All four blocks must be present; a partial evaluation is not scoreable.
pub fn aggregate(
    scores: &BTreeMap<Category, CategoryScore>,
    weights: &WeightConfig,
) -> Result<f64, AggregationError> {
    weights.validate()?;

    let mut index = 0.0;
    for category in Category::ALL {
        let score = scores
            .get(&category)
            .ok_or(AggregationError::MissingCategory { category })?;
        index += weights.weight(category) * score.value;
    }
    Ok(index)
}
