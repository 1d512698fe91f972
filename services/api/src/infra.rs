use metrics_exporter_prometheus::PrometheusHandle;
use scieval::evaluation::{
    EvaluationRecord, EvaluationStatus, EvaluationStore, Period, StoreError, SubjectId,
};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Append-only in-memory store. The single mutex makes the final-uniqueness
/// check and the insert one atomic step, which is all the record manager
/// asks of a storage collaborator.
#[derive(Default, Clone)]
pub(crate) struct InMemoryEvaluationStore {
    records: Arc<Mutex<Vec<EvaluationRecord>>>,
}

fn is_final_for(record: &EvaluationRecord, subject: &SubjectId, period: &Period) -> bool {
    record.status == EvaluationStatus::Final
        && &record.subject == subject
        && &record.period == period
}

impl EvaluationStore for InMemoryEvaluationStore {
    fn save(&self, record: EvaluationRecord) -> Result<EvaluationRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if record.status == EvaluationStatus::Final
            && guard
                .iter()
                .any(|existing| is_final_for(existing, &record.subject, &record.period))
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
            .find(|existing| is_final_for(existing, subject, period))
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
            .find(|existing| is_final_for(existing, subject, period))
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
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.clone())
    }
}
