use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{
    EvaluationRecord, EvaluationStatus, Period, RawSubmission, SubjectId,
};
use super::engine::{EvaluationEngine, EvaluationError};
use super::report::{self, ReportRow};
use super::store::{EvaluationStore, StoreError};
use super::weights::WeightConfig;

/// What to do when a commit collides with an existing final record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupersedePolicy {
    /// Surface the collision; the caller must decide explicitly.
    #[default]
    Deny,
    /// Retire the existing final record and take its place.
    Replace,
}

/// Record manager enforcing the evaluation lifecycle over a storage
/// collaborator: drafts are produced by the engine, committed here, and
/// corrected only by superseding, never by editing in place.
pub struct EvaluationService<S> {
    engine: EvaluationEngine,
    store: Arc<S>,
}

impl<S> EvaluationService<S>
where
    S: EvaluationStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            engine: EvaluationEngine,
            store,
        }
    }

    /// Score a submission into a draft record. Nothing is persisted; a draft
    /// that is never committed leaves no trace.
    pub fn evaluate(
        &self,
        subject: SubjectId,
        period: Period,
        submission: RawSubmission,
        weights: WeightConfig,
    ) -> Result<EvaluationRecord, ServiceError> {
        let record = self.engine.evaluate(subject, period, submission, weights)?;
        Ok(record)
    }

    /// Finalize a draft.
    ///
    /// With [`SupersedePolicy::Deny`] an existing final record for the same
    /// subject and period fails the commit; with [`SupersedePolicy::Replace`]
    /// the prior record is retained as superseded and the new one becomes
    /// final with an incremented revision.
    pub fn commit(
        &self,
        record: EvaluationRecord,
        policy: SupersedePolicy,
    ) -> Result<EvaluationRecord, ServiceError> {
        if record.status != EvaluationStatus::Draft {
            return Err(ServiceError::NotDraft {
                status: record.status.label(),
            });
        }

        let existing = self.store.find_final(&record.subject, &record.period)?;

        let mut record = record;
        record.status = EvaluationStatus::Final;
        record.computed_at = Utc::now();

        match (existing, policy) {
            (Some(_), SupersedePolicy::Deny) => Err(ServiceError::FinalExists {
                subject: record.subject,
                period: record.period,
            }),
            (Some(prior), SupersedePolicy::Replace) => {
                record.revision = prior.revision + 1;
                let subject = record.subject.clone();
                let period = record.period.clone();
                let stored = self.store.supersede(&subject, &period, record)?;
                info!(
                    subject = %stored.subject,
                    period = %stored.period,
                    revision = stored.revision,
                    "evaluation superseded"
                );
                Ok(stored)
            }
            (None, _) => {
                let stored = self.store.save(record)?;
                info!(
                    subject = %stored.subject,
                    period = %stored.period,
                    index = stored.index,
                    "evaluation committed"
                );
                Ok(stored)
            }
        }
    }

    pub fn find_final(
        &self,
        subject: &SubjectId,
        period: &Period,
    ) -> Result<Option<EvaluationRecord>, ServiceError> {
        Ok(self.store.find_final(subject, period)?)
    }

    /// Admin read path: everything recorded for a period, projected into
    /// export rows in the default ordering.
    pub fn report_for_period(&self, period: &Period) -> Result<Vec<ReportRow>, ServiceError> {
        let records = self.store.list_by_period(period)?;
        Ok(report::project(&records))
    }

    /// Full projection across periods, for bulk exports.
    pub fn report_all(&self) -> Result<Vec<ReportRow>, ServiceError> {
        let records = self.store.list_all()?;
        Ok(report::project(&records))
    }
}

/// Error raised by the record manager.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(
        "a final evaluation for subject '{subject}' in period '{period}' already exists; \
         supersession was not requested"
    )]
    FinalExists { subject: SubjectId, period: Period },
    #[error("only draft evaluations can be committed, found status '{status}'")]
    NotDraft { status: &'static str },
}
