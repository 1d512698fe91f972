//! Block scoring rules.
//!
//! Every numeric field is normalized with a saturating ratio against a
//! documented ceiling, then the field scores are combined with fixed
//! in-block weights that sum to 1.0 per block. Raw magnitudes above a
//! ceiling therefore contribute the full field weight and nothing more,
//! so an unbounded count cannot dominate the aggregate.

use super::domain::{CategoryInputs, CategoryScore, ScoreComponent};
use super::validation::ValidatedInputs;

// Block R: research output.
pub const RESEARCH_PUBLICATION_CEILING: f64 = 20.0;
pub const RESEARCH_CITATION_CEILING: f64 = 200.0;
pub const RESEARCH_PUBLICATION_WEIGHT: f64 = 0.5;
pub const RESEARCH_CITATION_WEIGHT: f64 = 0.2;
pub const RESEARCH_DEGREE_SHARE_WEIGHT: f64 = 0.3;

// Block P: project participation.
pub const PROJECT_ACTIVE_CEILING: f64 = 10.0;
pub const PROJECT_INTERNATIONAL_CEILING: f64 = 5.0;
pub const PROJECT_FUNDING_CEILING_KUSD: f64 = 500.0;
pub const PROJECT_ACTIVE_WEIGHT: f64 = 0.5;
pub const PROJECT_INTERNATIONAL_WEIGHT: f64 = 0.3;
pub const PROJECT_FUNDING_WEIGHT: f64 = 0.2;

// Block O: outreach and recognition.
pub const OUTREACH_AWARD_CEILING: f64 = 5.0;
pub const OUTREACH_CONFERENCE_CEILING: f64 = 10.0;
pub const OUTREACH_STUDENT_CEILING: f64 = 15.0;
pub const OUTREACH_AWARD_WEIGHT: f64 = 0.4;
pub const OUTREACH_CONFERENCE_WEIGHT: f64 = 0.3;
pub const OUTREACH_STUDENT_WEIGHT: f64 = 0.3;

// Block I: innovation.
pub const INNOVATION_INITIATIVE_CEILING: f64 = 10.0;
pub const INNOVATION_PATENT_CEILING: f64 = 8.0;
pub const INNOVATION_INITIATIVE_WEIGHT: f64 = 0.4;
pub const INNOVATION_PATENT_WEIGHT: f64 = 0.4;
pub const INNOVATION_READINESS_WEIGHT: f64 = 0.2;

/// Monotonic saturating normalization: linear up to the ceiling, flat above.
fn saturate(value: f64, ceiling: f64) -> f64 {
    (value / ceiling).min(1.0)
}

/// Maturity mapping for the `readiness_level` field. Membership is enforced
/// during validation, so an unexpected value can only mean a missed rule and
/// contributes nothing.
fn readiness_value(level: &str) -> f64 {
    match level {
        "none" => 0.0,
        "prototype" => 1.0 / 3.0,
        "pilot" => 2.0 / 3.0,
        "market" => 1.0,
        _ => 0.0,
    }
}

struct BlockTally {
    components: Vec<ScoreComponent>,
    value: f64,
}

impl BlockTally {
    fn new() -> Self {
        Self {
            components: Vec::new(),
            value: 0.0,
        }
    }

    fn field(&mut self, field: &'static str, raw: f64, normalized: f64, weight: f64) {
        self.components.push(ScoreComponent {
            field: field.to_string(),
            raw,
            normalized,
            weight,
        });
        self.value += normalized * weight;
    }

    fn saturated(&mut self, field: &'static str, raw: f64, ceiling: f64, weight: f64) {
        self.field(field, raw, saturate(raw, ceiling), weight);
    }
}

/// Produce the normalized sub-score for one validated block.
///
/// Deterministic: the score depends on nothing but the inputs and the
/// constants above. All-zero inputs score exactly `0.0`.
pub fn score(validated: &ValidatedInputs) -> CategoryScore {
    let category = validated.category();
    let mut tally = BlockTally::new();

    match validated.inputs() {
        CategoryInputs::Research(research) => {
            tally.saturated(
                "publications",
                f64::from(research.publications),
                RESEARCH_PUBLICATION_CEILING,
                RESEARCH_PUBLICATION_WEIGHT,
            );
            tally.saturated(
                "citations",
                f64::from(research.citations),
                RESEARCH_CITATION_CEILING,
                RESEARCH_CITATION_WEIGHT,
            );
            tally.field(
                "degree_holder_share",
                research.degree_holder_share,
                research.degree_holder_share,
                RESEARCH_DEGREE_SHARE_WEIGHT,
            );
        }
        CategoryInputs::Projects(projects) => {
            tally.saturated(
                "active_projects",
                f64::from(projects.active_projects),
                PROJECT_ACTIVE_CEILING,
                PROJECT_ACTIVE_WEIGHT,
            );
            tally.saturated(
                "international_projects",
                f64::from(projects.international_projects),
                PROJECT_INTERNATIONAL_CEILING,
                PROJECT_INTERNATIONAL_WEIGHT,
            );
            tally.saturated(
                "funding_kusd",
                projects.funding_kusd,
                PROJECT_FUNDING_CEILING_KUSD,
                PROJECT_FUNDING_WEIGHT,
            );
        }
        CategoryInputs::Outreach(outreach) => {
            tally.saturated(
                "awards",
                f64::from(outreach.awards),
                OUTREACH_AWARD_CEILING,
                OUTREACH_AWARD_WEIGHT,
            );
            tally.saturated(
                "conferences_organized",
                f64::from(outreach.conferences_organized),
                OUTREACH_CONFERENCE_CEILING,
                OUTREACH_CONFERENCE_WEIGHT,
            );
            tally.saturated(
                "supervised_students",
                f64::from(outreach.supervised_students),
                OUTREACH_STUDENT_CEILING,
                OUTREACH_STUDENT_WEIGHT,
            );
        }
        CategoryInputs::Innovation(innovation) => {
            tally.saturated(
                "initiatives",
                f64::from(innovation.initiatives),
                INNOVATION_INITIATIVE_CEILING,
                INNOVATION_INITIATIVE_WEIGHT,
            );
            tally.saturated(
                "patents",
                f64::from(innovation.patents),
                INNOVATION_PATENT_CEILING,
                INNOVATION_PATENT_WEIGHT,
            );
            let readiness = readiness_value(&innovation.readiness_level);
            tally.field(
                "readiness_level",
                readiness,
                readiness,
                INNOVATION_READINESS_WEIGHT,
            );
        }
    }

    CategoryScore {
        category,
        value: tally.value,
        components: tally.components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::domain::{
        Category, InnovationInputs, OutreachInputs, ProjectInputs, ResearchInputs,
    };
    use crate::evaluation::validation::validate;

    fn score_inputs(inputs: CategoryInputs) -> CategoryScore {
        score(&validate(inputs).expect("valid inputs"))
    }

    fn research(publications: u32, citations: u32, share: f64) -> CategoryInputs {
        CategoryInputs::Research(ResearchInputs {
            publications,
            citations,
            degree_holder_share: share,
        })
    }

    #[test]
    fn all_zero_inputs_score_exactly_zero() {
        let zero_blocks = vec![
            research(0, 0, 0.0),
            CategoryInputs::Projects(ProjectInputs {
                active_projects: 0,
                international_projects: 0,
                funding_kusd: 0.0,
            }),
            CategoryInputs::Outreach(OutreachInputs {
                awards: 0,
                conferences_organized: 0,
                supervised_students: 0,
            }),
            CategoryInputs::Innovation(InnovationInputs {
                initiatives: 0,
                patents: 0,
                readiness_level: "none".to_string(),
            }),
        ];
        for inputs in zero_blocks {
            let result = score_inputs(inputs);
            assert_eq!(result.value, 0.0, "block {} not zero", result.category);
        }
    }

    #[test]
    fn scores_stay_within_unit_interval_for_extreme_counts() {
        let result = score_inputs(research(10_000, 1_000_000, 1.0));
        assert!((result.value - 1.0).abs() < 1e-12);

        let result = score_inputs(CategoryInputs::Outreach(OutreachInputs {
            awards: u32::MAX,
            conferences_organized: u32::MAX,
            supervised_students: u32::MAX,
        }));
        assert!(result.value <= 1.0);
        assert!(result.value >= 0.0);
    }

    #[test]
    fn normalization_saturates_at_the_ceiling() {
        let at_ceiling = score_inputs(research(20, 0, 0.0));
        let above_ceiling = score_inputs(research(40, 0, 0.0));
        assert_eq!(at_ceiling.value, above_ceiling.value);
        assert_eq!(at_ceiling.value, RESEARCH_PUBLICATION_WEIGHT);
    }

    #[test]
    fn normalization_is_monotonic_below_the_ceiling() {
        let low = score_inputs(research(5, 0, 0.0));
        let high = score_inputs(research(10, 0, 0.0));
        assert!(high.value > low.value);
    }

    #[test]
    fn identical_inputs_yield_identical_scores() {
        let a = score_inputs(research(7, 33, 0.55));
        let b = score_inputs(research(7, 33, 0.55));
        assert_eq!(a, b);
    }

    #[test]
    fn readiness_levels_order_the_innovation_score() {
        let levels = ["none", "prototype", "pilot", "market"];
        let mut previous = -1.0;
        for level in levels {
            let result = score_inputs(CategoryInputs::Innovation(InnovationInputs {
                initiatives: 0,
                patents: 0,
                readiness_level: level.to_string(),
            }));
            assert!(result.value > previous, "level '{level}' did not increase");
            previous = result.value;
        }
        assert!((previous - INNOVATION_READINESS_WEIGHT).abs() < 1e-12);
    }

    #[test]
    fn components_record_every_input_field() {
        let result = score_inputs(research(5, 10, 0.2));
        assert_eq!(result.category, Category::Research);
        let fields: Vec<&str> = result
            .components
            .iter()
            .map(|component| component.field.as_str())
            .collect();
        assert_eq!(
            fields,
            vec!["publications", "citations", "degree_holder_share"]
        );
    }
}
