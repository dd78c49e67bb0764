//! End-to-end test: proposals missing required fields are rejected before
//! risk assessment and never reach a human.

use maple_consensus_engine::{ConsensusConfig, ConsensusEngine};
use maple_consensus_types::{
    AgentId, Decision, DecisionReason, Proposal, ProposalId, TaskContext, ValidationSignal,
};
use std::collections::HashMap;

fn engine() -> ConsensusEngine {
    ConsensusEngine::new(&ConsensusConfig::default()).unwrap()
}

#[tokio::test]
async fn missing_fields_are_rejected_without_scoring() {
    let engine = engine();
    let proposals = vec![
        Proposal::new("a1", "auth", "   ", "Rotate signing keys.").with_id("no-content"),
        Proposal::new("a2", "kernel", "fn f() {}", "").with_id("no-rationale"),
        Proposal::new("a3", "", "fn f() {}", "Inline it.").with_id("no-domain"),
    ];
    // A perfect signal changes nothing.
    let signals: HashMap<ProposalId, ValidationSignal> = proposals
        .iter()
        .map(|p| (p.id.clone(), ValidationSignal::passed(1.0)))
        .collect();

    let report = engine
        .decide(proposals, &signals, &TaskContext::for_domain("auth"))
        .await;

    let fields: Vec<DecisionReason> = report.outcomes.iter().map(|o| o.reason.clone()).collect();
    assert_eq!(
        fields,
        vec![
            DecisionReason::Malformed("content".into()),
            DecisionReason::Malformed("rationale".into()),
            DecisionReason::Malformed("domain".into()),
        ]
    );
    for outcome in &report.outcomes {
        assert_eq!(outcome.decision, Decision::Rejected);
        assert!(outcome.breakdown.is_none());
        assert_eq!(outcome.weighted_score, 0.0);
    }

    // Core-domain malformed proposals are still plain rejections.
    assert!(report.escalations.is_empty());
    assert!(engine.pending_escalations().is_empty());
    assert_eq!(engine.metrics().malformed, 3);
    assert_eq!(engine.metrics().rejected, 3);

    // Each attributable submitter pays for the malformed proposal.
    assert_eq!(report.trust_updates.len(), 3);
    assert!(engine.trust().get_trust(&AgentId::new("a1")).value() < 0.5);
}

#[tokio::test]
async fn anonymous_proposal_moves_no_trust() {
    let engine = engine();
    let report = engine
        .decide(
            vec![Proposal::new("", "storage", "fn f() {}", "Inline it.")],
            &HashMap::new(),
            &TaskContext::for_domain("storage"),
        )
        .await;

    assert_eq!(
        report.outcomes[0].reason,
        DecisionReason::Malformed("agent_id".into())
    );
    assert!(report.trust_updates.is_empty());
    assert!(engine.trust().is_empty());
}

#[tokio::test]
async fn duplicate_id_in_one_round_is_malformed() {
    let engine = engine();
    let first = Proposal::new("a1", "storage", "fn f() {}", "Inline it.").with_id("dup");
    let second = Proposal::new("a2", "storage", "fn g() {}", "Hoist it.").with_id("dup");

    let report = engine
        .decide(
            vec![first, second],
            &HashMap::new(),
            &TaskContext::for_domain("storage"),
        )
        .await;

    assert_eq!(report.outcomes.len(), 1);
    assert!(report.outcomes[0].breakdown.is_some());
    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(
        report.duplicates[0].reason,
        DecisionReason::Malformed("id".into())
    );
    assert_eq!(engine.trust().get_trust(&AgentId::new("a2")).value(), 0.5);
}

#[tokio::test]
async fn id_reused_in_a_later_round_is_rejected_without_penalty() {
    let engine = engine();
    let ctx = TaskContext::for_domain("storage");
    let proposal = || Proposal::new("a1", "storage", "fn f() {}", "Inline it.").with_id("p1");
    let mut signals = HashMap::new();
    signals.insert(ProposalId::new("p1"), ValidationSignal::passed(0.3));

    let first = engine.decide(vec![proposal()], &signals, &ctx).await;
    assert_eq!(first.outcomes[0].decision, Decision::Rejected);
    let trust = engine.trust().get_trust(&AgentId::new("a1"));

    let second = engine.decide(vec![proposal()], &signals, &ctx).await;
    assert!(second.outcomes.is_empty());
    assert_eq!(second.duplicates.len(), 1);
    assert_eq!(engine.trust().get_trust(&AgentId::new("a1")), trust);
    assert_eq!(engine.store().load_outcomes().await.unwrap().len(), 1);
    assert_eq!(engine.metrics().decided(), 1);
}
