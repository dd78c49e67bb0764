//! End-to-end test: a cancelled round writes nothing.

use maple_consensus_engine::{
    CancellationHandle, ConsensusConfig, ConsensusEngine, EngineError, ProposalSource,
    SilentProposalSource, SimulatedProposalSource,
};
use maple_consensus_types::{Agent, Proposal, TaskContext, ValidationSignal};
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sources() -> Vec<Arc<dyn ProposalSource>> {
    vec![
        Arc::new(
            SimulatedProposalSource::new(
                Agent::generalist("quick"),
                Proposal::new(
                    "quick",
                    "storage",
                    "fn flush(&mut self) { self.buf.clear(); }",
                    "Merge flushes on the write path. Fewer syscalls.",
                )
                .novel_insight(),
            )
            .with_signal(ValidationSignal::passed(1.0)),
        ),
        Arc::new(
            SimulatedProposalSource::new(
                Agent::generalist("auditor"),
                Proposal::new("auditor", "auth", "fn check() {}", "Tighten token checks."),
            )
            .with_signal(ValidationSignal::passed(0.9)),
        ),
        Arc::new(SilentProposalSource::new(Agent::generalist("silent"))),
    ]
}

async fn assert_untouched(engine: &ConsensusEngine) {
    assert!(engine.trust().is_empty());
    assert!(engine.intents().is_empty());
    assert!(engine.pending_escalations().is_empty());
    assert!(engine.store().load_outcomes().await.unwrap().is_empty());
    assert!(engine.store().load_trust_records().await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn cancel_during_collection_discards_the_round() {
    let engine = ConsensusEngine::new(&ConsensusConfig::default()).unwrap();
    let cancel = CancellationHandle::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        trigger.cancel();
    });

    let err = engine
        .run_round(&sources(), &TaskContext::for_domain("storage"), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::RoundCancelled(_)));
    assert_untouched(&engine).await;

    let metrics = engine.metrics();
    assert_eq!(metrics.cancelled_rounds, 1);
    assert_eq!(metrics.rounds, 0);
    assert_eq!(metrics.decided(), 0);
}

#[tokio::test]
async fn cancel_before_start_never_queries_sources() {
    let engine = ConsensusEngine::new(&ConsensusConfig::default()).unwrap();
    let cancel = CancellationHandle::new();
    cancel.cancel();

    let result = engine
        .run_round(&sources(), &TaskContext::for_domain("storage"), &cancel)
        .await;

    assert!(matches!(result, Err(EngineError::RoundCancelled(1))));
    assert_untouched(&engine).await;
}

#[tokio::test(start_paused = true)]
async fn next_round_runs_normally_after_a_cancel() {
    let engine = ConsensusEngine::new(&ConsensusConfig::default()).unwrap();
    let cancelled = CancellationHandle::new();
    cancelled.cancel();
    assert!(engine
        .run_round(&sources(), &TaskContext::for_domain("storage"), &cancelled)
        .await
        .is_err());

    let report = engine
        .run_round(
            &sources(),
            &TaskContext::for_domain("storage"),
            &CancellationHandle::new(),
        )
        .await
        .unwrap();

    assert_eq!(report.round, 2);
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.absent.len(), 1);
    assert_eq!(engine.trust().len(), 3);
}
