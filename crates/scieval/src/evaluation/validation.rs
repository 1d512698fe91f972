//! Per-block input validation.
//!
//! Every rule failure names the block, the offending field, and the violated
//! constraint so the submitter can correct the figure; nothing is coerced.

use super::domain::{Category, CategoryInputs};

/// Accepted values for [`InnovationInputs::readiness_level`].
///
/// [`InnovationInputs::readiness_level`]: super::domain::InnovationInputs::readiness_level
pub const READINESS_LEVELS: &[&str] = &["none", "prototype", "pilot", "market"];

/// Inputs that passed the per-block rules. Only obtainable through
/// [`validate`], so the scorer never sees unchecked figures.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInputs(CategoryInputs);

impl ValidatedInputs {
    pub fn category(&self) -> Category {
        self.0.category()
    }

    pub fn inputs(&self) -> &CategoryInputs {
        &self.0
    }
}

/// Structured validation failure, surfaced to the submitter verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("block {category} field '{field}' must be a finite number")]
    NotFinite { category: Category, field: &'static str },
    #[error("block {category} field '{field}' must be non-negative, got {value}")]
    Negative {
        category: Category,
        field: &'static str,
        value: f64,
    },
    #[error("block {category} field '{field}' must be within [0, 1], got {value}")]
    ShareOutOfRange {
        category: Category,
        field: &'static str,
        value: f64,
    },
    #[error(
        "block {category} field '{field}' ({value}) cannot exceed '{limit_field}' ({limit})"
    )]
    CountExceedsTotal {
        category: Category,
        field: &'static str,
        value: u32,
        limit_field: &'static str,
        limit: u32,
    },
    #[error("block {category} field '{field}': unknown value '{value}', expected one of {expected:?}")]
    UnknownVariant {
        category: Category,
        field: &'static str,
        value: String,
        expected: &'static [&'static str],
    },
}

impl ValidationError {
    pub fn category(&self) -> Category {
        match self {
            Self::NotFinite { category, .. }
            | Self::Negative { category, .. }
            | Self::ShareOutOfRange { category, .. }
            | Self::CountExceedsTotal { category, .. }
            | Self::UnknownVariant { category, .. } => *category,
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            Self::NotFinite { field, .. }
            | Self::Negative { field, .. }
            | Self::ShareOutOfRange { field, .. }
            | Self::CountExceedsTotal { field, .. }
            | Self::UnknownVariant { field, .. } => field,
        }
    }
}

/// Check one block's raw figures against its rule table.
///
/// Fails fast on the first violated rule.
pub fn validate(inputs: CategoryInputs) -> Result<ValidatedInputs, ValidationError> {
    let category = inputs.category();
    match &inputs {
        CategoryInputs::Research(research) => {
            check_share(category, "degree_holder_share", research.degree_holder_share)?;
        }
        CategoryInputs::Projects(projects) => {
            if projects.international_projects > projects.active_projects {
                return Err(ValidationError::CountExceedsTotal {
                    category,
                    field: "international_projects",
                    value: projects.international_projects,
                    limit_field: "active_projects",
                    limit: projects.active_projects,
                });
            }
            check_amount(category, "funding_kusd", projects.funding_kusd)?;
        }
        CategoryInputs::Outreach(_) => {
            // Counts only; u32 already rules out negatives.
        }
        CategoryInputs::Innovation(innovation) => {
            if !READINESS_LEVELS.contains(&innovation.readiness_level.as_str()) {
                return Err(ValidationError::UnknownVariant {
                    category,
                    field: "readiness_level",
                    value: innovation.readiness_level.clone(),
                    expected: READINESS_LEVELS,
                });
            }
        }
    }
    Ok(ValidatedInputs(inputs))
}

fn check_share(category: Category, field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { category, field });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::ShareOutOfRange {
            category,
            field,
            value,
        });
    }
    Ok(())
}

fn check_amount(category: Category, field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { category, field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative {
            category,
            field,
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::domain::{InnovationInputs, ProjectInputs, ResearchInputs};

    #[test]
    fn accepts_research_inputs_within_range() {
        let inputs = CategoryInputs::Research(ResearchInputs {
            publications: 12,
            citations: 80,
            degree_holder_share: 0.4,
        });
        let validated = validate(inputs).expect("valid inputs");
        assert_eq!(validated.category(), Category::Research);
    }

    #[test]
    fn rejects_share_above_one() {
        let inputs = CategoryInputs::Research(ResearchInputs {
            publications: 0,
            citations: 0,
            degree_holder_share: 1.2,
        });
        let err = validate(inputs).expect_err("share out of range");
        assert_eq!(err.category(), Category::Research);
        assert_eq!(err.field(), "degree_holder_share");
        assert!(matches!(err, ValidationError::ShareOutOfRange { value, .. } if value == 1.2));
    }

    #[test]
    fn rejects_non_finite_funding() {
        let inputs = CategoryInputs::Projects(ProjectInputs {
            active_projects: 1,
            international_projects: 0,
            funding_kusd: f64::NAN,
        });
        let err = validate(inputs).expect_err("NaN funding");
        assert!(matches!(err, ValidationError::NotFinite { field: "funding_kusd", .. }));
    }

    #[test]
    fn rejects_negative_funding() {
        let inputs = CategoryInputs::Projects(ProjectInputs {
            active_projects: 2,
            international_projects: 1,
            funding_kusd: -5.0,
        });
        let err = validate(inputs).expect_err("negative funding");
        assert!(matches!(err, ValidationError::Negative { field: "funding_kusd", .. }));
    }

    #[test]
    fn rejects_more_international_than_active_projects() {
        let inputs = CategoryInputs::Projects(ProjectInputs {
            active_projects: 1,
            international_projects: 3,
            funding_kusd: 0.0,
        });
        let err = validate(inputs).expect_err("inconsistent project counts");
        assert!(matches!(
            err,
            ValidationError::CountExceedsTotal {
                field: "international_projects",
                value: 3,
                limit: 1,
                ..
            }
        ));
    }

    #[test]
    fn rejects_unknown_readiness_level() {
        let inputs = CategoryInputs::Innovation(InnovationInputs {
            initiatives: 2,
            patents: 0,
            readiness_level: "industrial".to_string(),
        });
        let err = validate(inputs).expect_err("unknown readiness level");
        match err {
            ValidationError::UnknownVariant { value, expected, .. } => {
                assert_eq!(value, "industrial");
                assert_eq!(expected, READINESS_LEVELS);
            }
            other => panic!("expected unknown variant error, got {other:?}"),
        }
    }

    #[test]
    fn validation_reports_first_failure_only() {
        // Both the count consistency and the funding rule are violated; the
        // count rule comes first in the table.
        let inputs = CategoryInputs::Projects(ProjectInputs {
            active_projects: 0,
            international_projects: 1,
            funding_kusd: -1.0,
        });
        let err = validate(inputs).expect_err("invalid inputs");
        assert!(matches!(err, ValidationError::CountExceedsTotal { .. }));
    }
}
