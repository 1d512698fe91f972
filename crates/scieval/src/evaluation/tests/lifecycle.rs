use super::common::*;
use crate::evaluation::domain::EvaluationStatus;
use crate::evaluation::service::{ServiceError, SupersedePolicy};
use crate::evaluation::store::{EvaluationStore, StoreError};

#[test]
fn commit_finalizes_a_draft() {
    let (service, _) = build_service();
    let draft = service
        .evaluate(
            subject("A123"),
            period("2024-Q1"),
            reference_submission(),
            reference_weights(),
        )
        .expect("evaluation succeeds");
    assert_eq!(draft.status, EvaluationStatus::Draft);

    let committed = service
        .commit(draft, SupersedePolicy::Deny)
        .expect("commit succeeds");
    assert_eq!(committed.status, EvaluationStatus::Final);
    assert_eq!(committed.revision, 1);

    let found = service
        .find_final(&subject("A123"), &period("2024-Q1"))
        .expect("lookup succeeds")
        .expect("final record present");
    assert_eq!(found.id, committed.id);
}

#[test]
fn duplicate_final_commit_conflicts() {
    let (service, _) = build_service();
    let first = service
        .evaluate(
            subject("A123"),
            period("2024-Q1"),
            reference_submission(),
            reference_weights(),
        )
        .expect("first evaluation");
    service
        .commit(first, SupersedePolicy::Deny)
        .expect("first commit");

    let second = service
        .evaluate(
            subject("A123"),
            period("2024-Q1"),
            reference_submission(),
            reference_weights(),
        )
        .expect("second evaluation");
    match service.commit(second, SupersedePolicy::Deny) {
        Err(ServiceError::FinalExists { subject, period }) => {
            assert_eq!(subject.0, "A123");
            assert_eq!(period.0, "2024-Q1");
        }
        other => panic!("expected final-exists conflict, got {other:?}"),
    }
}

#[test]
fn supersession_retains_the_prior_record() {
    let (service, store) = build_service();
    let original = service
        .evaluate(
            subject("A123"),
            period("2024-Q1"),
            reference_submission(),
            reference_weights(),
        )
        .and_then(|draft| service.commit(draft, SupersedePolicy::Deny))
        .expect("original final");

    let replacement = service
        .evaluate(
            subject("A123"),
            period("2024-Q1"),
            reference_submission(),
            reference_weights(),
        )
        .and_then(|draft| service.commit(draft, SupersedePolicy::Replace))
        .expect("supersession succeeds");

    assert_eq!(replacement.status, EvaluationStatus::Final);
    assert_eq!(replacement.revision, 2);
    assert!(replacement.computed_at >= original.computed_at);

    let records = store.records();
    assert_eq!(records.len(), 2);
    let retired = records
        .iter()
        .find(|record| record.id == original.id)
        .expect("original record retained");
    assert_eq!(retired.status, EvaluationStatus::Superseded);
    // Only the status flipped; the scored values are untouched.
    assert_eq!(retired.index, original.index);
    assert_eq!(retired.scores, original.scores);

    let current = service
        .find_final(&subject("A123"), &period("2024-Q1"))
        .expect("lookup succeeds")
        .expect("final present");
    assert_eq!(current.id, replacement.id);
}

#[test]
fn committed_record_cannot_be_committed_again() {
    let (service, _) = build_service();
    let committed = service
        .evaluate(
            subject("A123"),
            period("2024-Q1"),
            reference_submission(),
            reference_weights(),
        )
        .and_then(|draft| service.commit(draft, SupersedePolicy::Deny))
        .expect("commit succeeds");

    match service.commit(committed, SupersedePolicy::Replace) {
        Err(ServiceError::NotDraft { status }) => assert_eq!(status, "final"),
        other => panic!("expected not-draft rejection, got {other:?}"),
    }
}

#[test]
fn discarded_draft_leaves_no_trace() {
    let (service, store) = build_service();
    let draft = service
        .evaluate(
            subject("A123"),
            period("2024-Q1"),
            reference_submission(),
            reference_weights(),
        )
        .expect("evaluation succeeds");
    drop(draft);
    assert!(store.records().is_empty());
}

#[test]
fn store_enforces_single_final_per_subject_and_period() {
    let (service, store) = build_service();
    let mut record = service
        .evaluate(
            subject("A123"),
            period("2024-Q1"),
            reference_submission(),
            reference_weights(),
        )
        .expect("evaluation succeeds");
    record.status = EvaluationStatus::Final;

    store.save(record.clone()).expect("first save");
    match store.save(record) {
        Err(StoreError::Conflict) => {}
        other => panic!("expected store conflict, got {other:?}"),
    }
}

#[test]
fn evaluations_for_different_periods_do_not_conflict() {
    let (service, _) = build_service();
    for quarter in ["2024-Q1", "2024-Q2"] {
        service
            .evaluate(
                subject("A123"),
                period(quarter),
                reference_submission(),
                reference_weights(),
            )
            .and_then(|draft| service.commit(draft, SupersedePolicy::Deny))
            .unwrap_or_else(|err| panic!("commit for {quarter} failed: {err:?}"));
    }
}
