//! Property tests: critical-risk proposals are never accepted automatically.

use maple_consensus_engine::{ConsensusConfig, ConsensusEngine};
use maple_consensus_trust::TrustRecord;
use maple_consensus_types::{
    Agent, AgentRole, Decision, DecisionReason, Proposal, ProposalId, RiskLevel, TaskContext,
    ValidationSignal,
};
use proptest::prelude::*;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn engine_with(agent: Agent, trust: f64) -> ConsensusEngine {
    let engine = ConsensusEngine::new(&ConsensusConfig::default()).unwrap();
    engine
        .trust()
        .restore(vec![TrustRecord {
            agent,
            score: trust,
            updates: 0,
            absences: 0,
            calibrated: false,
        }])
        .unwrap();
    engine
}

/// One proposal per risk level, from the same agent.
fn proposal_at(level: RiskLevel, agent: &str) -> Proposal {
    let body = "fn flush() { buf.clear(); }";
    match level {
        RiskLevel::Low => Proposal::new(agent, "storage", body, "Clear after flush."),
        RiskLevel::Elevated => {
            Proposal::new(agent, "storage", body, "Clear after flush.").novel_insight()
        }
        RiskLevel::Critical => Proposal::new(agent, "storage", body, "Clear after flush.")
            .with_affected_domain("crypto"),
    }
}

fn arb_role() -> impl Strategy<Value = AgentRole> {
    prop_oneof![
        Just(AgentRole::Architect),
        Just(AgentRole::Optimizer),
        Just(AgentRole::Security),
        Just(AgentRole::Generalist),
        Just(AgentRole::Specialist("crypto".into())),
    ]
}

fn arb_critical_domain() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("auth"),
        Just("consensus"),
        Just("crypto"),
        Just("kernel"),
        Just("pii"),
        Just("security"),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Exhaustive over risk levels at maximum trust and quality: only the
/// critical proposal escalates, and it escalates for its risk.
#[test]
fn every_risk_level_at_maximum_score() {
    let rt = runtime();
    for level in [RiskLevel::Low, RiskLevel::Elevated, RiskLevel::Critical] {
        let engine = engine_with(Agent::new("sec", AgentRole::Security), 1.0);
        let proposal = proposal_at(level, "sec");
        let id = proposal.id.clone();
        let mut signals = HashMap::new();
        signals.insert(id.clone(), ValidationSignal::passed(1.0));

        let report = rt.block_on(engine.decide(
            vec![proposal],
            &signals,
            &TaskContext::for_domain("storage"),
        ));
        let outcome = report.outcome(&id).unwrap();
        assert_eq!(outcome.risk_level(), Some(level));
        if level == RiskLevel::Critical {
            assert_eq!(outcome.decision, Decision::EscalatedToHuman);
            assert_eq!(outcome.reason, DecisionReason::CriticalRisk);
        } else {
            assert_eq!(outcome.decision, Decision::Accepted);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// No trust, weight or quality lets a critical proposal through.
    #[test]
    fn critical_is_never_auto_accepted(
        trust in 0.0f64..=1.0,
        quality in 0.0f64..=1.0,
        role in arb_role(),
        domain in arb_critical_domain(),
        signal_present in any::<bool>(),
    ) {
        let rt = runtime();
        let engine = engine_with(Agent::new("agent", role), trust);
        let proposal = Proposal::new("agent", "storage", "fn f() {}", "Adjust the check.")
            .with_affected_domain(domain);
        let id: ProposalId = proposal.id.clone();
        let mut signals = HashMap::new();
        if signal_present {
            signals.insert(id.clone(), ValidationSignal::passed(quality));
        }

        let report = rt.block_on(engine.decide(
            vec![proposal],
            &signals,
            &TaskContext::for_domain(domain).with_risk(RiskLevel::Critical),
        ));
        let outcome = report.outcome(&id).unwrap();
        prop_assert_eq!(outcome.decision, Decision::EscalatedToHuman);
        prop_assert!(report.trust_updates.is_empty());
        prop_assert!(report.intents.is_empty());
    }
}
