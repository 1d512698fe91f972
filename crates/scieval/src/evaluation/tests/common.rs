use std::sync::{Arc, Mutex};

use crate::evaluation::domain::{
    CategoryInputs, EvaluationRecord, EvaluationStatus, InnovationInputs, OutreachInputs, Period,
    ProjectInputs, RawSubmission, ResearchInputs, SubjectId,
};
use crate::evaluation::service::EvaluationService;
use crate::evaluation::store::{EvaluationStore, StoreError};
use crate::evaluation::weights::WeightConfig;

/// Append-only in-memory store upholding the single-final invariant inside
/// one mutex, the way a relational collaborator would inside a transaction.
#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<Vec<EvaluationRecord>>>,
}

impl MemoryStore {
    pub(super) fn records(&self) -> Vec<EvaluationRecord> {
        self.records.lock().expect("store mutex poisoned").clone()
    }
}

impl EvaluationStore for MemoryStore {
    fn save(&self, record: EvaluationRecord) -> Result<EvaluationRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if record.status == EvaluationStatus::Final
            && guard.iter().any(|existing| {
                existing.status == EvaluationStatus::Final
                    && existing.subject == record.subject
                    && existing.period == record.period
            })
        {
            return Err(StoreError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn supersede(
        &self,
        subject: &SubjectId,
        period: &Period,
        replacement: EvaluationRecord,
    ) -> Result<EvaluationRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let prior = guard
            .iter_mut()
            .find(|existing| {
                existing.status == EvaluationStatus::Final
                    && &existing.subject == subject
                    && &existing.period == period
            })
            .ok_or(StoreError::NotFound)?;
        prior.status = EvaluationStatus::Superseded;
        guard.push(replacement.clone());
        Ok(replacement)
    }

    fn find_final(
        &self,
        subject: &SubjectId,
        period: &Period,
    ) -> Result<Option<EvaluationRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .iter()
            .find(|existing| {
                existing.status == EvaluationStatus::Final
                    && &existing.subject == subject
                    && &existing.period == period
            })
            .cloned())
    }

    fn list_by_period(&self, period: &Period) -> Result<Vec<EvaluationRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|existing| &existing.period == period)
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<EvaluationRecord>, StoreError> {
        Ok(self.records())
    }
}

pub(super) fn build_service() -> (EvaluationService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (EvaluationService::new(store.clone()), store)
}

/// The reference submission: 5 publications, 2 projects, 1 award, and
/// 3 initiatives, everything else zero.
pub(super) fn reference_submission() -> RawSubmission {
    RawSubmission {
        entries: vec![
            CategoryInputs::Research(ResearchInputs {
                publications: 5,
                citations: 0,
                degree_holder_share: 0.0,
            }),
            CategoryInputs::Projects(ProjectInputs {
                active_projects: 2,
                international_projects: 0,
                funding_kusd: 0.0,
            }),
            CategoryInputs::Outreach(OutreachInputs {
                awards: 1,
                conferences_organized: 0,
                supervised_students: 0,
            }),
            CategoryInputs::Innovation(InnovationInputs {
                initiatives: 3,
                patents: 0,
                readiness_level: "none".to_string(),
            }),
        ],
    }
}

pub(super) fn reference_weights() -> WeightConfig {
    WeightConfig {
        research: 0.4,
        projects: 0.3,
        outreach: 0.2,
        innovation: 0.1,
    }
}

pub(super) fn subject(id: &str) -> SubjectId {
    SubjectId(id.to_string())
}

pub(super) fn period(value: &str) -> Period {
    Period(value.to_string())
}
