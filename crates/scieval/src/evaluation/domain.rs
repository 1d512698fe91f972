use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::weights::WeightConfig;

/// The four fixed blocks of scientific activity being evaluated.
///
/// The codes follow the reporting convention: `R` research output, `P`
/// project participation, `O` outreach and recognition, `I` innovation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "R")]
    Research,
    #[serde(rename = "P")]
    Projects,
    #[serde(rename = "O")]
    Outreach,
    #[serde(rename = "I")]
    Innovation,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Research,
        Category::Projects,
        Category::Outreach,
        Category::Innovation,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Category::Research => "R",
            Category::Projects => "P",
            Category::Outreach => "O",
            Category::Innovation => "I",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::Research => "research output",
            Category::Projects => "project participation",
            Category::Outreach => "outreach and recognition",
            Category::Innovation => "innovation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Identifier wrapper for the evaluated subject (person or unit).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Evaluation period, e.g. `"2024"` or `"2024-Q1"`. Lexicographic order
/// matches chronological order for both conventions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period(pub String);

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier assigned to every evaluation record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluationId(pub String);

/// Raw research-output figures for block `R`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchInputs {
    pub publications: u32,
    pub citations: u32,
    /// Share of staff holding a scientific degree, within `[0, 1]`.
    pub degree_holder_share: f64,
}

/// Raw project-participation figures for block `P`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInputs {
    pub active_projects: u32,
    pub international_projects: u32,
    /// Attracted project funding in thousands of USD.
    pub funding_kusd: f64,
}

/// Raw outreach and recognition figures for block `O`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachInputs {
    pub awards: u32,
    pub conferences_organized: u32,
    pub supervised_students: u32,
}

/// Raw innovation figures for block `I`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InnovationInputs {
    pub initiatives: u32,
    pub patents: u32,
    /// Maturity of the flagship development; one of
    /// `none`, `prototype`, `pilot`, `market`.
    pub readiness_level: String,
}

/// Per-block raw inputs, tagged by category so each block carries its own
/// field set and is validated through its own rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum CategoryInputs {
    #[serde(rename = "R")]
    Research(ResearchInputs),
    #[serde(rename = "P")]
    Projects(ProjectInputs),
    #[serde(rename = "O")]
    Outreach(OutreachInputs),
    #[serde(rename = "I")]
    Innovation(InnovationInputs),
}

impl CategoryInputs {
    pub const fn category(&self) -> Category {
        match self {
            CategoryInputs::Research(_) => Category::Research,
            CategoryInputs::Projects(_) => Category::Projects,
            CategoryInputs::Outreach(_) => Category::Outreach,
            CategoryInputs::Innovation(_) => Category::Innovation,
        }
    }
}

/// One submission of raw figures, consumed by the engine and discarded
/// after scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSubmission {
    pub entries: Vec<CategoryInputs>,
}

/// Discrete contribution of one input field to a block score, kept so the
/// computation stays auditable after the raw figures are gone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub field: String,
    pub raw: f64,
    pub normalized: f64,
    pub weight: f64,
}

/// Normalized sub-score for one block, immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    /// Within `[0, 1]`.
    pub value: f64,
    pub components: Vec<ScoreComponent>,
}

/// Lifecycle state of an evaluation record.
///
/// `Draft -> Final -> Superseded`; `Superseded` is terminal. A draft may be
/// discarded without trace; a final record is only ever replaced by a fresh
/// evaluation, never edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    Draft,
    Final,
    Superseded,
}

impl EvaluationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationStatus::Draft => "draft",
            EvaluationStatus::Final => "final",
            EvaluationStatus::Superseded => "superseded",
        }
    }
}

/// Qualitative band for an aggregate index, used in summaries and the demo
/// output. Thresholds at 0.25, 0.50, and 0.75.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl EfficiencyLevel {
    pub fn from_index(index: f64) -> Self {
        if index < 0.25 {
            Self::Low
        } else if index < 0.50 {
            Self::Moderate
        } else if index < 0.75 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

/// One evaluation of one subject for one period.
///
/// The weight configuration is snapshotted so historical records stay
/// reproducible when operators later change the weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: EvaluationId,
    pub subject: SubjectId,
    pub period: Period,
    pub scores: BTreeMap<Category, CategoryScore>,
    /// Aggregate efficiency index within `[0, 1]`.
    pub index: f64,
    pub weights: WeightConfig,
    /// Starts at 1; each supersession of a final record increments it.
    pub revision: u32,
    pub computed_at: DateTime<Utc>,
    pub status: EvaluationStatus,
}

impl EvaluationRecord {
    pub fn block_value(&self, category: Category) -> f64 {
        self.scores.get(&category).map_or(0.0, |score| score.value)
    }

    pub fn level(&self) -> EfficiencyLevel {
        EfficiencyLevel::from_index(self.index)
    }

    pub fn strongest_block(&self) -> Option<Category> {
        self.scores
            .values()
            .max_by(|a, b| a.value.total_cmp(&b.value))
            .map(|score| score.category)
    }

    pub fn weakest_block(&self) -> Option<Category> {
        self.scores
            .values()
            .min_by(|a, b| a.value.total_cmp(&b.value))
            .map(|score| score.category)
    }

    pub fn summary(&self) -> EvaluationSummary {
        EvaluationSummary {
            id: self.id.clone(),
            subject: self.subject.clone(),
            period: self.period.clone(),
            index: self.index,
            level: self.level().label(),
            status: self.status.label(),
            revision: self.revision,
            computed_at: self.computed_at,
        }
    }
}

/// Sanitized representation of a record for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSummary {
    pub id: EvaluationId,
    pub subject: SubjectId,
    pub period: Period,
    pub index: f64,
    pub level: &'static str,
    pub status: &'static str,
    pub revision: u32,
    pub computed_at: DateTime<Utc>,
}
