//! End-to-end test: goal negotiation penalises critical goals and runs one
//! trust decay pass per round.

use maple_consensus_engine::{ConsensusConfig, ConsensusEngine};
use maple_consensus_goal_arbiter::GlobalState;
use maple_consensus_trust::{OutcomeKind, TrustRecord};
use maple_consensus_types::{Agent, AgentId, GoalProposal, RiskLevel};

fn engine() -> ConsensusEngine {
    ConsensusEngine::new(&ConsensusConfig::default()).unwrap()
}

#[tokio::test]
async fn low_risk_goal_beats_equal_reward_critical_goal() {
    let engine = engine();
    let goals = vec![
        GoalProposal::new("arch", "rework session handling", "kernel", 8.0)
            .with_submission_index(0),
        GoalProposal::new("opt", "batch metric flushes", "telemetry", 8.0)
            .with_submission_index(1),
    ];

    let selection = engine
        .negotiate_goal(goals, &GlobalState::default())
        .await
        .unwrap();

    assert_eq!(selection.winner.agent_id, AgentId::new("opt"));
    let critical = &selection.candidates[0];
    let low = &selection.candidates[1];
    assert_eq!(critical.risk_penalty, 2.0);
    assert_eq!(low.risk_penalty, 1.0);
    assert!((critical.score * 2.0 - low.score).abs() < 1e-9);
}

#[tokio::test]
async fn declared_risk_cannot_be_lowered() {
    let engine = engine();
    let goals = vec![GoalProposal::new("a", "rotate signing keys", "crypto", 8.0)
        .with_risk(RiskLevel::Low)];
    let selection = engine
        .negotiate_goal(goals, &GlobalState::default())
        .await
        .unwrap();
    assert_eq!(selection.winner.risk_level, RiskLevel::Critical);
}

#[tokio::test]
async fn empty_round_selects_nothing_but_still_decays() {
    let engine = engine();
    engine
        .trust()
        .restore(vec![TrustRecord {
            agent: Agent::generalist("idle"),
            score: 0.2,
            updates: 3,
            absences: 0,
            calibrated: false,
        }])
        .unwrap();
    assert!(engine.negotiate_goal(Vec::new(), &GlobalState::default()).await.is_none());
    assert!((engine.trust().get_trust(&AgentId::new("idle")).value() - 0.22).abs() < 1e-9);
}

#[tokio::test]
async fn active_agents_are_spared_from_decay() {
    let engine = engine();
    engine
        .trust()
        .restore(vec![
            TrustRecord {
                agent: Agent::generalist("active"),
                score: 0.9,
                updates: 3,
                absences: 0,
                calibrated: false,
            },
            TrustRecord {
                agent: Agent::generalist("idle"),
                score: 0.9,
                updates: 3,
                absences: 0,
                calibrated: false,
            },
        ])
        .unwrap();

    let active = AgentId::new("active");
    let after_success = engine
        .trust()
        .record_outcome(&active, OutcomeKind::Success, 1.0)
        .after;
    engine.negotiate_goal(Vec::new(), &GlobalState::default()).await;

    assert_eq!(engine.trust().get_trust(&active).value(), after_success);
    assert!((engine.trust().get_trust(&AgentId::new("idle")).value() - 0.88).abs() < 1e-9);

    // Repeated idle rounds converge on the baseline and stop there.
    for _ in 0..50 {
        engine.negotiate_goal(Vec::new(), &GlobalState::default()).await;
    }
    assert_eq!(engine.trust().get_trust(&active).value(), 0.5);
    assert_eq!(engine.trust().get_trust(&AgentId::new("idle")).value(), 0.5);
}
