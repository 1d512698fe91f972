use super::domain::{EvaluationRecord, Period, SubjectId};

/// Storage abstraction so the record manager can be exercised in isolation.
///
/// Implementations must guarantee atomic visibility of the at-most-one-final
/// invariant: a `save` of a final record and a `supersede` for the same
/// `(subject, period)` can never leave two final records behind.
pub trait EvaluationStore: Send + Sync {
    /// Insert a record. Fails with [`StoreError::Conflict`] when the record
    /// is final and a final record already exists for its subject and period.
    fn save(&self, record: EvaluationRecord) -> Result<EvaluationRecord, StoreError>;

    /// Atomically mark the current final record for `(subject, period)` as
    /// superseded and insert `replacement` as the new final record. The old
    /// record is retained with only its status flipped.
    fn supersede(
        &self,
        subject: &SubjectId,
        period: &Period,
        replacement: EvaluationRecord,
    ) -> Result<EvaluationRecord, StoreError>;

    fn find_final(
        &self,
        subject: &SubjectId,
        period: &Period,
    ) -> Result<Option<EvaluationRecord>, StoreError>;

    /// All records for a period, superseded ones included, so exports keep
    /// the audit trail visible.
    fn list_by_period(&self, period: &Period) -> Result<Vec<EvaluationRecord>, StoreError>;

    fn list_all(&self) -> Result<Vec<EvaluationRecord>, StoreError>;
}

/// Error enumeration for storage failures. Transient infrastructure trouble
/// is surfaced opaquely through `Unavailable`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("a final evaluation already exists for this subject and period")]
    Conflict,
    #[error("evaluation record not found")]
    NotFound,
    #[error("evaluation store unavailable: {0}")]
    Unavailable(String),
}
