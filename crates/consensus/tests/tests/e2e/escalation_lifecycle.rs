//! End-to-end test: escalated proposals wait for a human verdict, and fail
//! closed when none arrives inside the review window.

use maple_consensus_engine::{
    ConsensusConfig, ConsensusEngine, EngineError, RecordingReviewChannel, ReviewChannel,
};
use maple_consensus_trust::TrustRecord;
use maple_consensus_types::{
    Agent, AgentId, Decision, DecisionReason, HumanVerdict, Proposal, ProposalId, TaskContext,
    ValidationSignal,
};
use std::collections::HashMap;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn engine(review: Arc<RecordingReviewChannel>) -> ConsensusEngine {
    let engine = ConsensusEngine::new(&ConsensusConfig::default())
        .unwrap()
        .with_review_channel(review as Arc<dyn ReviewChannel>);
    engine
        .trust()
        .restore(vec![
            TrustRecord {
                agent: Agent::generalist("steady"),
                score: 0.6,
                updates: 8,
                absences: 0,
                calibrated: false,
            },
            TrustRecord {
                agent: Agent::generalist("bold"),
                score: 0.8,
                updates: 8,
                absences: 0,
                calibrated: false,
            },
        ])
        .unwrap();
    engine
}

/// Scores 0.6 * 0.9 = 0.54: inside the band below the 0.6 threshold.
fn borderline() -> Proposal {
    Proposal::new(
        "steady",
        "storage",
        "fn evict(&mut self) { self.lru.pop(); }",
        "Evict before the cache fills.",
    )
    .with_id("borderline")
}

fn critical() -> Proposal {
    Proposal::new("bold", "auth", "fn verify() {}", "Skip the second hash.").with_id("critical")
}

async fn escalate_both(engine: &ConsensusEngine) {
    let mut signals = HashMap::new();
    signals.insert(ProposalId::new("borderline"), ValidationSignal::passed(0.9));
    signals.insert(ProposalId::new("critical"), ValidationSignal::passed(1.0));
    let report = engine
        .decide(
            vec![borderline(), critical()],
            &signals,
            &TaskContext::for_domain("storage"),
        )
        .await;

    let reasons: Vec<&DecisionReason> = report.outcomes.iter().map(|o| &o.reason).collect();
    assert_eq!(
        reasons,
        vec![&DecisionReason::Borderline, &DecisionReason::CriticalRisk]
    );
    assert_eq!(report.count(Decision::EscalatedToHuman), 2);
    assert!(report.trust_updates.is_empty());
}

fn trust(engine: &ConsensusEngine, agent: &str) -> f64 {
    engine.trust().get_trust(&AgentId::new(agent)).value()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn escalations_defer_trust_until_verdict() {
    let review = Arc::new(RecordingReviewChannel::new());
    let engine = engine(review.clone());
    escalate_both(&engine).await;

    assert_eq!(review.len(), 2);
    assert_eq!(engine.pending_escalations().len(), 2);
    assert_eq!(trust(&engine, "steady"), 0.6);
    assert_eq!(trust(&engine, "bold"), 0.8);

    let ticket = &engine.pending_escalations()[0];
    let approved = engine
        .apply_verdict(ticket.proposal_id(), HumanVerdict::Approve, ticket.created_at_ms + 1)
        .await
        .unwrap();
    assert_eq!(approved.decision, Decision::Accepted);
    assert_eq!(approved.reason, DecisionReason::HumanApproved);

    let ticket = &engine.pending_escalations()[0];
    let rejected = engine
        .apply_verdict(ticket.proposal_id(), HumanVerdict::Reject, ticket.created_at_ms + 1)
        .await
        .unwrap();
    assert_eq!(rejected.decision, Decision::Rejected);
    assert_eq!(rejected.reason, DecisionReason::HumanRejected);

    assert!(engine.pending_escalations().is_empty());
    assert_eq!(engine.metrics().verdicts_applied, 2);

    // One success and one failure landed, one per agent.
    let outcomes = engine.store().load_outcomes().await.unwrap();
    assert_eq!(outcomes.len(), 4);
    let moved = [trust(&engine, "steady") - 0.6, trust(&engine, "bold") - 0.8];
    assert!(moved.iter().any(|d| *d > 0.0));
    assert!(moved.iter().any(|d| *d < 0.0));
}

#[tokio::test]
async fn silence_past_the_window_fails_closed() {
    let engine = engine(Arc::new(RecordingReviewChannel::new()));
    escalate_both(&engine).await;
    let deadline = engine
        .pending_escalations()
        .iter()
        .map(|t| t.deadline_ms)
        .max()
        .unwrap();

    // Both tickets share a deadline; at that instant the window is still open.
    assert!(engine.expire_escalations(deadline).await.is_empty());
    let expired = engine.expire_escalations(deadline + 1).await;
    assert_eq!(expired.len(), 2);
    assert!(engine.pending_escalations().is_empty());
    assert_eq!(engine.metrics().escalations_expired, 2);
    for outcome in &expired {
        assert_eq!(outcome.decision, Decision::Rejected);
        assert_eq!(outcome.reason, DecisionReason::ReviewWindowExpired);
    }
    assert!(trust(&engine, "steady") < 0.6);
    assert!(trust(&engine, "bold") < 0.8);
}

#[tokio::test]
async fn late_verdict_is_ignored() {
    let engine = engine(Arc::new(RecordingReviewChannel::new()));
    escalate_both(&engine).await;
    let ticket = engine.pending_escalations()[0].clone();

    let outcome = engine
        .apply_verdict(ticket.proposal_id(), HumanVerdict::Approve, ticket.deadline_ms + 1)
        .await
        .unwrap();
    assert_eq!(outcome.decision, Decision::Rejected);
    assert_eq!(outcome.reason, DecisionReason::ReviewWindowExpired);
    assert_eq!(engine.metrics().verdicts_applied, 0);
}

#[tokio::test]
async fn verdict_for_unknown_or_settled_proposal_is_an_error() {
    let engine = engine(Arc::new(RecordingReviewChannel::new()));
    escalate_both(&engine).await;
    let ticket = engine.pending_escalations()[0].clone();
    let now = ticket.created_at_ms;

    engine
        .apply_verdict(ticket.proposal_id(), HumanVerdict::Approve, now)
        .await
        .unwrap();
    let again = engine
        .apply_verdict(ticket.proposal_id(), HumanVerdict::Reject, now)
        .await;
    assert!(matches!(again, Err(EngineError::UnknownEscalation(_))));

    let unknown = engine
        .apply_verdict(&ProposalId::new("never-seen"), HumanVerdict::Approve, now)
        .await;
    assert!(matches!(unknown, Err(EngineError::UnknownEscalation(_))));
}
