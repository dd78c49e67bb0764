//! The scripted cycle.

use maple_consensus_engine::{
    CancellationHandle, ConsensusEngine, ProposalSource, RecordingReviewChannel, RoundReport,
    SilentProposalSource, SimulatedProposalSource,
};
use maple_consensus_goal_arbiter::GlobalState;
use maple_consensus_trust::TrustRecord;
use maple_consensus_types::{
    Agent, AgentRole, GoalProposal, HumanVerdict, Proposal, TaskContext, ValidationSignal,
};
use std::sync::Arc;
use tracing::info;

fn seed(engine: &ConsensusEngine) -> anyhow::Result<()> {
    let record = |agent: Agent, score: f64| TrustRecord {
        agent,
        score,
        updates: 20,
        absences: 0,
        calibrated: false,
    };
    engine.trust().restore(vec![
        record(Agent::new("architect", AgentRole::Architect), 0.8),
        record(Agent::new("optimizer", AgentRole::Optimizer), 0.75),
        record(Agent::new("sentinel", AgentRole::Security), 0.9),
        record(Agent::generalist("explorer"), 0.95),
        record(Agent::new("archivist", AgentRole::Documentation), 0.6),
    ])?;
    Ok(())
}

fn sources() -> Vec<Arc<dyn ProposalSource>> {
    vec![
        Arc::new(
            SimulatedProposalSource::new(
                Agent::new("optimizer", AgentRole::Optimizer),
                Proposal::new(
                    "optimizer",
                    "storage",
                    "fn flush(&mut self) { self.buf.clear(); }",
                    "Clear the write buffer once the flush completes.",
                ),
            )
            .with_signal(ValidationSignal::passed(0.92)),
        ),
        Arc::new(
            SimulatedProposalSource::new(
                Agent::new("sentinel", AgentRole::Security),
                Proposal::new(
                    "sentinel",
                    "storage",
                    "fn mask(row: &mut Row) { row.email = redact(&row.email); }",
                    "Redact emails before rows leave the storage layer.",
                )
                .with_affected_domain("pii"),
            )
            .with_signal(ValidationSignal::passed(0.95)),
        ),
        Arc::new(
            SimulatedProposalSource::new(
                Agent::generalist("explorer"),
                Proposal::new(
                    "explorer",
                    "storage",
                    "fn compact(&mut self) { self.segments.merge_small(); }",
                    "Merge small segments during idle compaction. Read amplification drops by half.",
                )
                .novel_insight(),
            )
            .with_signal(ValidationSignal::passed(0.97)),
        ),
        Arc::new(SilentProposalSource::new(Agent::new(
            "archivist",
            AgentRole::Documentation,
        ))),
    ]
}

fn print_report(report: &RoundReport) {
    println!("Round {}:", report.round);
    for outcome in &report.outcomes {
        println!(
            "  {:<10} {:<20} {:?} (score {:.3})",
            outcome.agent_id.as_str(),
            outcome.decision.to_string(),
            outcome.reason,
            outcome.weighted_score
        );
    }
    for agent in &report.absent {
        println!("  {:<10} non-vote", agent.as_str());
    }
    for intent in &report.intents {
        println!("  intent cached: \"{}\" ({})", intent.principle, intent.domain);
    }
}

pub async fn run(engine: &ConsensusEngine, review: &RecordingReviewChannel) -> anyhow::Result<()> {
    seed(engine)?;

    let ctx = TaskContext::for_domain("storage");
    let report = engine
        .run_round(&sources(), &ctx, &CancellationHandle::new())
        .await?;
    print_report(&report);

    // The reviewer signs off on everything in the queue.
    for ticket in review.tickets() {
        let outcome = engine
            .apply_verdict(ticket.proposal_id(), HumanVerdict::Approve, ticket.created_at_ms)
            .await?;
        println!(
            "Reviewer approved {} from {}: {}",
            outcome.proposal_id.short(),
            outcome.agent_id.as_str(),
            outcome.decision
        );
    }

    let goals = vec![
        GoalProposal::new("architect", "rework the kernel scheduler", "kernel", 9.0)
            .with_submission_index(0),
        GoalProposal::new("optimizer", "cut compaction stalls", "storage", 6.0)
            .with_submission_index(1),
        GoalProposal::new("archivist", "document the wire format", "documentation", 4.0)
            .with_submission_index(2),
    ];
    let state = GlobalState::new().with_priority("storage", 1.2);
    match engine.negotiate_goal(goals, &state).await {
        Some(selection) => {
            for candidate in &selection.candidates {
                println!(
                    "  goal {} by {:<10} score {:.3} (alignment {:.2}, penalty {:.1})",
                    candidate.goal_id.short(),
                    candidate.agent_id.as_str(),
                    candidate.score,
                    candidate.alignment,
                    candidate.risk_penalty
                );
            }
            println!(
                "Next cycle objective: {} ({})",
                selection.winner.objective, selection.winner.domain
            );
        }
        None => println!("No goal proposed"),
    }

    let cycle = engine.advance_cycle();
    info!(cycle, "Evolution cycle closed");
    Ok(())
}
