use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::common::*;
use crate::scoring::domain::{ClaimId, RiskCategory};
use crate::scoring::service::RiskAssessmentService;
use crate::scoring::{AssessmentError, StoreError};

#[test]
fn assess_persists_the_result_through_the_sink() {
    let (service, claims, assessments) = build_service();
    claims.seed(high_risk_claim(), high_risk_history());

    let result = service
        .assess(&ClaimId("claim-9001".to_string()), assessment_time())
        .expect("assessment succeeds");

    assert_eq!(result.category, RiskCategory::High);
    let recorded = assessments.records();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0], result);
}

#[test]
fn unknown_claim_id_surfaces_not_found() {
    let (service, _claims, _assessments) = build_service();

    let err = service
        .assess(&ClaimId("claim-missing".to_string()), assessment_time())
        .expect_err("unknown id must fail");

    assert!(matches!(err, AssessmentError::NotFound(_)));
}

#[test]
fn batch_isolates_per_id_failures() {
    let (service, claims, _assessments) = build_service();
    for index in [1u32, 2, 4, 5] {
        let mut claim = benign_claim();
        claim.claim_id = ClaimId(format!("claim-{index}"));
        claims.seed(claim, clean_history());
    }

    let ids: Vec<ClaimId> = (1..=5u32).map(|i| ClaimId(format!("claim-{i}"))).collect();
    let outcomes = service
        .assess_batch(&ids, assessment_time())
        .expect("batch runs");

    assert_eq!(outcomes.len(), 5);
    let successes = outcomes.values().filter(|entry| entry.is_ok()).count();
    assert_eq!(successes, 4);
    match outcomes
        .get(&ClaimId("claim-3".to_string()))
        .expect("entry for the unknown id")
    {
        Err(AssessmentError::NotFound(id)) => assert_eq!(id.0, "claim-3"),
        other => panic!("expected not-found entry, got {other:?}"),
    }
}

#[test]
fn oversized_batch_is_rejected_before_any_work() {
    let mut config = engine_config();
    config.max_batch_size = 3;
    let claims = Arc::new(MemoryClaimStore::default());
    let assessments = Arc::new(MemoryAssessmentStore::default());
    let service = RiskAssessmentService::new(claims, assessments.clone(), config)
        .expect("config is valid");

    let ids: Vec<ClaimId> = (1..=4u32).map(|i| ClaimId(format!("claim-{i}"))).collect();
    let err = service
        .assess_batch(&ids, assessment_time())
        .expect_err("oversized batch must be rejected");

    assert!(matches!(
        err,
        AssessmentError::BatchTooLarge {
            requested: 4,
            max: 3
        }
    ));
    assert!(assessments.records().is_empty());
}

#[test]
fn duplicate_ids_appear_once_in_the_outcome_map() {
    let (service, claims, _assessments) = build_service();
    claims.seed(benign_claim(), clean_history());

    let id = ClaimId("claim-1002".to_string());
    let outcomes = service
        .assess_batch(&[id.clone(), id.clone()], assessment_time())
        .expect("batch runs");

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes.get(&id).expect("entry present").is_ok());
}

#[test]
fn cancellation_stops_new_work_and_returns_partial_results() {
    let (service, claims, _assessments) = build_service();
    claims.seed(benign_claim(), clean_history());
    let ids = vec![
        ClaimId("claim-1002".to_string()),
        ClaimId("claim-other".to_string()),
    ];

    let cancelled = AtomicBool::new(true);
    let outcomes = service
        .assess_batch_with_cancel(&ids, assessment_time(), &cancelled)
        .expect("cancelled batch still returns");

    assert!(outcomes.is_empty());
    assert!(cancelled.load(Ordering::Acquire));
}

#[test]
fn store_outage_is_reported_per_id_not_as_a_batch_failure() {
    let claims = Arc::new(UnavailableClaimStore);
    let assessments = Arc::new(MemoryAssessmentStore::default());
    let service = RiskAssessmentService::new(claims, assessments, engine_config())
        .expect("config is valid");

    let ids = vec![ClaimId("claim-1".to_string())];
    let outcomes = service
        .assess_batch(&ids, assessment_time())
        .expect("batch runs");

    match outcomes.get(&ids[0]).expect("entry present") {
        Err(AssessmentError::Store(StoreError::Unavailable(_))) => {}
        other => panic!("expected store error entry, got {other:?}"),
    }
}
