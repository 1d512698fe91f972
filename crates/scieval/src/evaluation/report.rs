//! Projection of evaluation records into export rows.
//!
//! Pure transformation: ordering and column shape live here, file encoding
//! belongs to the export collaborator.

use serde::Serialize;

use super::domain::{Category, EvaluationRecord};

/// One export row per evaluation record. Column order matches the tabular
/// contract: subject, period, the four block scores, index, status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub subject: String,
    pub period: String,
    pub research: f64,
    pub projects: f64,
    pub outreach: f64,
    pub innovation: f64,
    pub index: f64,
    pub status: &'static str,
}

impl ReportRow {
    fn from_record(record: &EvaluationRecord) -> Self {
        Self {
            subject: record.subject.0.clone(),
            period: record.period.0.clone(),
            research: record.block_value(Category::Research),
            projects: record.block_value(Category::Projects),
            outreach: record.block_value(Category::Outreach),
            innovation: record.block_value(Category::Innovation),
            index: record.index,
            status: record.status.label(),
        }
    }
}

/// Row ordering for exports. Both orderings are total and deterministic for
/// a given record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportOrdering {
    /// `(subject, period)` ascending.
    #[default]
    SubjectPeriod,
    /// `(period, subject)` ascending, the shape period-level exports use.
    PeriodSubject,
}

/// Project records into rows in the default `(subject, period)` ordering.
pub fn project(records: &[EvaluationRecord]) -> Vec<ReportRow> {
    project_ordered(records, ReportOrdering::default())
}

pub fn project_ordered(records: &[EvaluationRecord], ordering: ReportOrdering) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = records.iter().map(ReportRow::from_record).collect();
    match ordering {
        ReportOrdering::SubjectPeriod => {
            rows.sort_by(|a, b| (&a.subject, &a.period).cmp(&(&b.subject, &b.period)));
        }
        ReportOrdering::PeriodSubject => {
            rows.sort_by(|a, b| (&a.period, &a.subject).cmp(&(&b.period, &b.subject)));
        }
    }
    rows
}
