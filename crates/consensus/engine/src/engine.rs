use crate::cancel::CancellationHandle;
use crate::config::{ConsensusConfig, EngineConfig};
use crate::error::{ConfigError, EngineError, SourceError, StoreError};
use crate::escalation::{EscalationQueue, EscalationTicket, RecordingReviewChannel, ReviewChannel};
use crate::metrics::ConsensusMetrics;
use crate::source::{ProposalSource, SourcedProposal};
use crate::store::{ConsensusStore, InMemoryConsensusStore};
use futures::future::join_all;
use maple_consensus_goal_arbiter::{GlobalState, GoalArbiter, GoalSelection};
use maple_consensus_intent_cache::IntentCache;
use maple_consensus_risk::RiskAssessor;
use maple_consensus_trust::{OutcomeKind, TrustRegistry, TrustUpdate};
use maple_consensus_types::{
    Agent, AgentId, ConsensusOutcome, Decision, DecisionReason, GoalProposal, HumanVerdict,
    Proposal, ProposalId, RiskAssessment, ScoringBreakdown, StrategicIntent, TaskContext,
    ValidationSignal,
};
use maple_consensus_weighting::ContextualWeighter;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What one committed round produced.
#[derive(Clone, Debug, Default)]
pub struct RoundReport {
    pub round: u64,
    /// One outcome per proposal, in submission order.
    pub outcomes: Vec<ConsensusOutcome>,
    pub trust_updates: Vec<TrustUpdate>,
    /// Intents admitted to the cache this round.
    pub intents: Vec<StrategicIntent>,
    /// Tickets handed to the review channel.
    pub escalations: Vec<EscalationTicket>,
    /// Agents that timed out or failed during collection.
    pub absent: Vec<AgentId>,
    /// Resubmissions of an id already decided or pending, rejected as
    /// `Malformed("id")`. They carry no trust write and are not persisted;
    /// the first decision for the id stands.
    pub duplicates: Vec<ConsensusOutcome>,
}

impl RoundReport {
    pub fn outcome(&self, id: &ProposalId) -> Option<&ConsensusOutcome> {
        self.outcomes.iter().find(|o| &o.proposal_id == id)
    }

    pub fn count(&self, decision: Decision) -> usize {
        self.outcomes.iter().filter(|o| o.decision == decision).count()
    }

    pub fn accepted(&self) -> impl Iterator<Item = &ConsensusOutcome> {
        self.outcomes.iter().filter(|o| o.is_accepted())
    }
}

/// Registry and cache sizes after [`ConsensusEngine::restore_from_store`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    pub agents: usize,
    pub intents: usize,
    /// Proposal ids marked as already decided.
    pub decisions: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Absence {
    Timeout,
    Failed,
}

/// One scored proposal, not yet committed.
struct Evaluation {
    proposal: Proposal,
    outcome: ConsensusOutcome,
    write: Option<OutcomeKind>,
    ticket: Option<EscalationTicket>,
    /// Id already consumed; rejected without side effects.
    duplicate: bool,
}

struct StagedRound {
    round: u64,
    agents: Vec<Agent>,
    absent: Vec<(AgentId, Absence)>,
    evaluations: Vec<Evaluation>,
}

/// The consensus pipeline.
///
/// Shared state (trust registry, intent cache) sits behind `Arc`, so one
/// engine can serve concurrent rounds for different task contexts.
pub struct ConsensusEngine {
    config: EngineConfig,
    trust: Arc<TrustRegistry>,
    intents: Arc<IntentCache>,
    weighter: ContextualWeighter,
    risk: RiskAssessor,
    arbiter: GoalArbiter,
    store: Arc<dyn ConsensusStore>,
    review: Arc<dyn ReviewChannel>,
    escalations: EscalationQueue,
    /// Every proposal id that reached a decision or is pending review.
    consumed: Mutex<HashSet<ProposalId>>,
    metrics: Mutex<ConsensusMetrics>,
    rounds: AtomicU64,
}

impl ConsensusEngine {
    /// Build an engine from validated configuration, with an in-memory store
    /// and a recording review channel.
    pub fn new(config: &ConsensusConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config: config.engine.clone(),
            trust: Arc::new(TrustRegistry::new(config.trust.clone())?),
            intents: Arc::new(IntentCache::new(config.intent_cache.clone())),
            weighter: ContextualWeighter::new(config.weighting.clone()).map_err(ConfigError::from)?,
            risk: RiskAssessor::new(config.risk.clone()).map_err(ConfigError::from)?,
            arbiter: GoalArbiter::new(config.arbiter.clone()).map_err(ConfigError::from)?,
            store: Arc::new(InMemoryConsensusStore::new()),
            review: Arc::new(RecordingReviewChannel::new()),
            escalations: EscalationQueue::default(),
            consumed: Mutex::new(HashSet::new()),
            metrics: Mutex::new(ConsensusMetrics::new()),
            rounds: AtomicU64::new(0),
        })
    }

    pub fn with_store(mut self, store: Arc<dyn ConsensusStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_review_channel(mut self, review: Arc<dyn ReviewChannel>) -> Self {
        self.review = review;
        self
    }

    /// Share a registry with other engines.
    pub fn with_trust_registry(mut self, trust: Arc<TrustRegistry>) -> Self {
        self.trust = trust;
        self
    }

    /// Share an intent cache with other engines.
    pub fn with_intent_cache(mut self, intents: Arc<IntentCache>) -> Self {
        self.intents = intents;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn trust(&self) -> &Arc<TrustRegistry> {
        &self.trust
    }

    pub fn intents(&self) -> &Arc<IntentCache> {
        &self.intents
    }

    pub fn store(&self) -> &Arc<dyn ConsensusStore> {
        &self.store
    }

    pub fn metrics(&self) -> ConsensusMetrics {
        self.metrics.lock().clone()
    }

    /// Escalations still waiting for a verdict, oldest first.
    pub fn pending_escalations(&self) -> Vec<EscalationTicket> {
        self.escalations.snapshot()
    }

    /// Decide a batch of already-collected proposals.
    ///
    /// `signals` maps proposal ids to sandbox results; proposals without one
    /// are scored with the configured missing quality.
    pub async fn decide(
        &self,
        proposals: Vec<Proposal>,
        signals: &HashMap<ProposalId, ValidationSignal>,
        ctx: &TaskContext,
    ) -> RoundReport {
        let round = self.next_round();
        let inputs = proposals
            .into_iter()
            .map(|p| {
                let signal = signals.get(&p.id).copied();
                SourcedProposal { proposal: p, signal }
            })
            .collect();
        let staged = self.evaluate(round, inputs, ctx, Vec::new(), Vec::new(), now_ms());
        let report = self.apply(staged);
        self.persist(&report).await;
        report
    }

    /// Collect proposals from every source, then decide them.
    ///
    /// Sources are queried concurrently, each bounded by the collection
    /// timeout. A late or failing source is a non-vote. Cancellation aborts
    /// collection at once and is checked again before commit; a cancelled
    /// round leaves trust, cache and escalations untouched.
    pub async fn run_round(
        &self,
        sources: &[Arc<dyn ProposalSource>],
        ctx: &TaskContext,
        cancel: &CancellationHandle,
    ) -> Result<RoundReport, EngineError> {
        let round = self.next_round();
        if cancel.is_cancelled() {
            return Err(self.cancelled(round));
        }

        info!(round, domain = %ctx.domain, sources = sources.len(), "Collecting proposals");

        let (inputs, absent) = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(self.cancelled(round)),
            collected = self.collect(sources, ctx) => collected,
        };

        let agents = sources.iter().map(|s| s.agent()).collect();
        let staged = self.evaluate(round, inputs, ctx, agents, absent, now_ms());

        if cancel.is_cancelled() {
            return Err(self.cancelled(round));
        }

        let report = self.apply(staged);
        self.persist(&report).await;
        Ok(report)
    }

    /// Resolve a pending escalation with a human verdict.
    ///
    /// A verdict arriving after the review window is ignored and the
    /// escalation fails closed.
    pub async fn apply_verdict(
        &self,
        id: &ProposalId,
        verdict: HumanVerdict,
        now_ms: u64,
    ) -> Result<ConsensusOutcome, EngineError> {
        let ticket = self
            .escalations
            .take(id)
            .ok_or_else(|| EngineError::UnknownEscalation(id.clone()))?;

        if ticket.is_expired(now_ms) {
            warn!(proposal = %id, "Verdict arrived after review window; failing closed");
            return Ok(self.fail_closed(ticket, now_ms).await);
        }

        let (decision, reason, kind) = match verdict {
            HumanVerdict::Approve => (Decision::Accepted, DecisionReason::HumanApproved, OutcomeKind::Success),
            HumanVerdict::Reject => (Decision::Rejected, DecisionReason::HumanRejected, OutcomeKind::Failure),
        };

        let outcome = ConsensusOutcome {
            proposal_id: ticket.proposal.id.clone(),
            agent_id: ticket.proposal.agent_id.clone(),
            decision,
            reason,
            weighted_score: ticket.breakdown.weighted_score,
            breakdown: Some(ticket.breakdown.clone()),
            decided_at_ms: now_ms,
        };

        self.trust.record_outcome(&outcome.agent_id, kind, 1.0);
        let intent = if outcome.is_accepted() && ticket.proposal.is_novel_insight() {
            self.intents.abstract_and_cache(&outcome, &ticket.proposal)
        } else {
            None
        };

        {
            let mut metrics = self.metrics.lock();
            metrics.verdicts_applied += 1;
            if intent.is_some() {
                metrics.intents_cached += 1;
            }
        }

        info!(
            proposal = %outcome.proposal_id,
            agent = %outcome.agent_id,
            decision = %outcome.decision,
            "Human verdict applied"
        );

        self.append_outcome(&outcome).await;
        if let Some(intent) = intent {
            self.save_intent(&intent).await;
        }
        self.save_trust().await;

        Ok(outcome)
    }

    /// Reject every escalation whose review window has passed.
    pub async fn expire_escalations(&self, now_ms: u64) -> Vec<ConsensusOutcome> {
        let expired = self.escalations.take_expired(now_ms);
        let mut outcomes = Vec::with_capacity(expired.len());
        for ticket in expired {
            outcomes.push(self.fail_closed(ticket, now_ms).await);
        }
        outcomes
    }

    /// Run one goal negotiation round and then one trust decay pass.
    ///
    /// A goal's risk is the higher of its declared level and the assessed
    /// level, so agents cannot talk a goal down.
    pub async fn negotiate_goal(
        &self,
        goals: Vec<GoalProposal>,
        state: &GlobalState,
    ) -> Option<GoalSelection> {
        let goals: Vec<GoalProposal> = goals
            .into_iter()
            .map(|mut goal| {
                let assessed = self.risk.assess_goal(&goal.objective, &goal.domain);
                goal.risk_level = goal.risk_level.max(assessed);
                goal
            })
            .collect();
        let agents: Vec<Agent> = goals.iter().map(|g| self.trust.agent(&g.agent_id)).collect();
        let snapshot = self.trust.snapshot();

        let selection =
            self.arbiter
                .select_goal(&goals, &snapshot, state, &self.intents, &self.weighter, &agents);

        let decayed = self.trust.decay_idle();
        self.metrics.lock().goal_rounds += 1;
        debug!(
            goals = goals.len(),
            decayed = decayed.len(),
            selected = selection.is_some(),
            "Goal negotiation round closed"
        );

        self.save_trust().await;
        selection
    }

    /// Advance the intent cache to the next evolution cycle.
    pub fn advance_cycle(&self) -> u64 {
        self.intents.advance_cycle()
    }

    /// Reload trust records and intents from the store. Intended for
    /// startup, before any round runs.
    pub async fn restore_from_store(&self) -> Result<RestoreSummary, EngineError> {
        let records = self.store.load_trust_records().await?;
        let agents = self.trust.restore(records)?;
        let intents = self.store.load_intents().await?;
        let intents = self.intents.restore(intents);
        let outcomes = self.store.load_outcomes().await?;
        let decisions = {
            let mut consumed = self.consumed.lock();
            consumed.extend(outcomes.into_iter().map(|o| o.proposal_id));
            consumed.len()
        };
        info!(agents, intents, decisions, "Consensus state restored from store");
        Ok(RestoreSummary {
            agents,
            intents,
            decisions,
        })
    }

    fn next_round(&self) -> u64 {
        self.rounds.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn cancelled(&self, round: u64) -> EngineError {
        self.metrics.lock().cancelled_rounds += 1;
        warn!(round, "Round cancelled; staged results discarded");
        EngineError::RoundCancelled(round)
    }

    async fn collect(
        &self,
        sources: &[Arc<dyn ProposalSource>],
        ctx: &TaskContext,
    ) -> (Vec<SourcedProposal>, Vec<(AgentId, Absence)>) {
        let timeout = self.config.collection_timeout();
        let requests = sources.iter().map(|source| async move {
            let agent = source.agent();
            let result = tokio::time::timeout(timeout, source.propose(ctx)).await;
            (agent, result)
        });

        let mut proposals = Vec::new();
        let mut absent = Vec::new();
        for (agent, result) in join_all(requests).await {
            match result {
                Ok(Ok(sourced)) if sourced.proposal.agent_id == agent.id => proposals.push(sourced),
                Ok(Ok(sourced)) => {
                    let err = SourceError::AgentMismatch {
                        expected: agent.id.clone(),
                        actual: sourced.proposal.agent_id,
                    };
                    warn!(agent = %agent.id, error = %err, "Proposal discarded; counted as non-vote");
                    absent.push((agent.id, Absence::Failed));
                }
                Ok(Err(err)) => {
                    warn!(agent = %agent.id, error = %err, "Proposal source failed; counted as non-vote");
                    absent.push((agent.id, Absence::Failed));
                }
                Err(_) => {
                    warn!(
                        agent = %agent.id,
                        timeout_ms = self.config.collection_timeout_ms,
                        "Proposal collection timed out; counted as non-vote"
                    );
                    absent.push((agent.id, Absence::Timeout));
                }
            }
        }
        (proposals, absent)
    }

    /// Score every proposal against pre-round trust. Nothing is written.
    fn evaluate(
        &self,
        round: u64,
        inputs: Vec<SourcedProposal>,
        ctx: &TaskContext,
        agents: Vec<Agent>,
        absent: Vec<(AgentId, Absence)>,
        now_ms: u64,
    ) -> StagedRound {
        let roles: HashMap<&AgentId, &Agent> = agents.iter().map(|a| (&a.id, a)).collect();
        let mut seen = HashSet::new();
        let evaluations = inputs
            .into_iter()
            .map(|SourcedProposal { proposal, signal }| {
                if let Err(err) = proposal.validate() {
                    return self.malformed(proposal, err.field(), now_ms);
                }
                if !seen.insert(proposal.id.clone()) || self.is_consumed(&proposal.id) {
                    return self.duplicate(proposal, now_ms);
                }
                let agent = roles
                    .get(&proposal.agent_id)
                    .map(|a| (*a).clone())
                    .unwrap_or_else(|| self.trust.agent(&proposal.agent_id));
                self.score(proposal, &agent, signal, ctx, now_ms)
            })
            .collect();

        StagedRound {
            round,
            agents,
            absent,
            evaluations,
        }
    }

    fn malformed(&self, proposal: Proposal, field: &str, now_ms: u64) -> Evaluation {
        warn!(
            proposal = %proposal.id,
            agent = %proposal.agent_id,
            field,
            "Malformed proposal rejected"
        );
        // A proposal with no agent cannot be attributed.
        let write = (!proposal.agent_id.is_empty()).then_some(OutcomeKind::Failure);
        Evaluation {
            outcome: unscored(&proposal, field, now_ms),
            proposal,
            write,
            ticket: None,
            duplicate: false,
        }
    }

    fn duplicate(&self, proposal: Proposal, now_ms: u64) -> Evaluation {
        Evaluation {
            outcome: unscored(&proposal, "id", now_ms),
            proposal,
            write: None,
            ticket: None,
            duplicate: true,
        }
    }

    fn is_consumed(&self, id: &ProposalId) -> bool {
        self.consumed.lock().contains(id)
    }

    fn score(
        &self,
        proposal: Proposal,
        agent: &Agent,
        signal: Option<ValidationSignal>,
        ctx: &TaskContext,
        now_ms: u64,
    ) -> Evaluation {
        let assessment = self.risk.assess(&proposal);
        let scoring_ctx = TaskContext {
            risk_level: assessment.level,
            ..ctx.clone()
        };

        let base = self.trust.get_trust(&proposal.agent_id);
        let (weight, adjusted) = self.weighter.adjusted_trust(agent, &scoring_ctx, base);
        let quality = signal
            .map(|s| s.effective_quality())
            .unwrap_or(self.config.missing_quality);
        let weighted = unit(adjusted * quality);

        let breakdown = ScoringBreakdown {
            base_trust: base.value(),
            multiplier: weight.applied,
            adjusted_trust: adjusted,
            quality,
            weighted_score: weighted,
            risk_level: assessment.level,
            required_threshold: assessment.required_threshold,
        };

        debug!(
            proposal = %proposal.id,
            agent = %proposal.agent_id,
            base_trust = breakdown.base_trust,
            multiplier = breakdown.multiplier,
            quality,
            weighted_score = weighted,
            "Proposal scored"
        );

        let (decision, reason) = self.classify(&assessment, weighted);
        let outcome = ConsensusOutcome {
            proposal_id: proposal.id.clone(),
            agent_id: proposal.agent_id.clone(),
            decision,
            reason: reason.clone(),
            weighted_score: weighted,
            breakdown: Some(breakdown.clone()),
            decided_at_ms: now_ms,
        };

        let (write, ticket) = match decision {
            Decision::Accepted => (Some(OutcomeKind::Success), None),
            Decision::Rejected => (Some(OutcomeKind::Failure), None),
            Decision::EscalatedToHuman => (
                None,
                Some(EscalationTicket {
                    proposal: proposal.clone(),
                    reason,
                    breakdown,
                    task_context: scoring_ctx,
                    created_at_ms: now_ms,
                    deadline_ms: now_ms.saturating_add(self.config.review_window_ms),
                }),
            ),
        };

        Evaluation {
            proposal,
            outcome,
            write,
            ticket,
            duplicate: false,
        }
    }

    /// Critical risk always escalates; otherwise threshold, then band.
    fn classify(&self, assessment: &RiskAssessment, weighted: f64) -> (Decision, DecisionReason) {
        let threshold = assessment.required_threshold;
        if assessment.level.requires_human_review() {
            (Decision::EscalatedToHuman, DecisionReason::CriticalRisk)
        } else if weighted >= threshold {
            (Decision::Accepted, DecisionReason::ThresholdMet)
        } else if weighted >= threshold - self.config.escalation_band {
            (Decision::EscalatedToHuman, DecisionReason::Borderline)
        } else {
            (Decision::Rejected, DecisionReason::ThresholdMiss)
        }
    }

    /// Commit staged results to the registry, cache and escalation queue.
    fn apply(&self, staged: StagedRound) -> RoundReport {
        let StagedRound {
            round,
            agents,
            absent,
            evaluations,
        } = staged;

        for agent in agents {
            self.trust.register_agent(agent);
        }

        let mut report = RoundReport {
            round,
            ..RoundReport::default()
        };
        let mut malformed = 0;
        let (mut timeouts, mut failures) = (0, 0);

        // Claim ids at commit; a concurrent round may have taken one since
        // evaluation.
        let evaluations: Vec<Evaluation> = {
            let mut consumed = self.consumed.lock();
            evaluations
                .into_iter()
                .map(|e| {
                    let claimable = !e.duplicate && !e.proposal.id.is_empty();
                    if claimable && !consumed.insert(e.proposal.id.clone()) {
                        let decided_at = e.outcome.decided_at_ms;
                        self.duplicate(e.proposal, decided_at)
                    } else {
                        e
                    }
                })
                .collect()
        };

        for (agent, absence) in absent {
            self.trust.record_absence(&agent);
            match absence {
                Absence::Timeout => timeouts += 1,
                Absence::Failed => failures += 1,
            }
            report.absent.push(agent);
        }

        for Evaluation {
            proposal,
            outcome,
            write,
            ticket,
            duplicate,
        } in evaluations
        {
            if duplicate {
                warn!(
                    round,
                    proposal = %outcome.proposal_id,
                    agent = %outcome.agent_id,
                    "Proposal id already consumed; resubmission rejected"
                );
                report.duplicates.push(outcome);
                continue;
            }
            if matches!(outcome.reason, DecisionReason::Malformed(_)) {
                malformed += 1;
            }
            if let Some(kind) = write {
                report
                    .trust_updates
                    .push(self.trust.record_outcome(&outcome.agent_id, kind, 1.0));
            }
            if outcome.is_accepted() && proposal.is_novel_insight() {
                if let Some(intent) = self.intents.abstract_and_cache(&outcome, &proposal) {
                    report.intents.push(intent);
                }
            }
            if let Some(ticket) = ticket {
                if self.escalations.insert(ticket.clone()) {
                    report.escalations.push(ticket);
                } else {
                    warn!(proposal = %ticket.proposal.id, "Escalation already pending; ticket dropped");
                }
            }

            info!(
                round,
                proposal = %outcome.proposal_id,
                agent = %outcome.agent_id,
                decision = %outcome.decision,
                reason = ?outcome.reason,
                weighted_score = outcome.weighted_score,
                "Proposal decided"
            );
            report.outcomes.push(outcome);
        }

        let (accepted, rejected, escalated) = (
            report.count(Decision::Accepted) as u64,
            report.count(Decision::Rejected) as u64,
            report.count(Decision::EscalatedToHuman) as u64,
        );
        {
            let mut metrics = self.metrics.lock();
            metrics.rounds += 1;
            metrics.accepted += accepted;
            metrics.rejected += rejected;
            metrics.escalated += escalated;
            metrics.malformed += malformed;
            metrics.duplicates += report.duplicates.len() as u64;
            metrics.timeouts += timeouts;
            metrics.source_errors += failures;
            metrics.intents_cached += report.intents.len() as u64;
        }

        info!(
            round,
            accepted,
            rejected,
            escalated,
            absent = report.absent.len(),
            intents = report.intents.len(),
            "Round committed"
        );
        report
    }

    async fn fail_closed(&self, ticket: EscalationTicket, now_ms: u64) -> ConsensusOutcome {
        let outcome = ConsensusOutcome {
            proposal_id: ticket.proposal.id.clone(),
            agent_id: ticket.proposal.agent_id.clone(),
            decision: Decision::Rejected,
            reason: DecisionReason::ReviewWindowExpired,
            weighted_score: ticket.breakdown.weighted_score,
            breakdown: Some(ticket.breakdown),
            decided_at_ms: now_ms,
        };
        self.trust
            .record_outcome(&outcome.agent_id, OutcomeKind::Failure, 1.0);
        self.metrics.lock().escalations_expired += 1;
        warn!(
            proposal = %outcome.proposal_id,
            agent = %outcome.agent_id,
            deadline_ms = ticket.deadline_ms,
            "Escalation expired without verdict; rejected"
        );
        self.append_outcome(&outcome).await;
        self.save_trust().await;
        outcome
    }

    /// Hand a committed round to the store and the review channel.
    async fn persist(&self, report: &RoundReport) {
        for ticket in &report.escalations {
            if let Err(err) = self.review.submit(ticket.clone()).await {
                self.metrics.lock().store_failures += 1;
                warn!(proposal = %ticket.proposal.id, error = %err, "Review channel rejected ticket");
            }
        }
        for outcome in &report.outcomes {
            self.append_outcome(outcome).await;
        }
        for intent in &report.intents {
            self.save_intent(intent).await;
        }
        self.save_trust().await;
    }

    async fn append_outcome(&self, outcome: &ConsensusOutcome) {
        let result = self.store.append_outcome(outcome.clone()).await;
        self.note_store_result(result, "append_outcome");
    }

    async fn save_intent(&self, intent: &StrategicIntent) {
        let result = self.store.save_intent(intent.clone()).await;
        self.note_store_result(result, "save_intent");
    }

    async fn save_trust(&self) {
        let result = self.store.save_trust_records(self.trust.records()).await;
        self.note_store_result(result, "save_trust_records");
    }

    fn note_store_result(&self, result: Result<(), StoreError>, operation: &'static str) {
        if let Err(err) = result {
            self.metrics.lock().store_failures += 1;
            warn!(operation, error = %err, "Consensus store write failed");
        }
    }
}

/// Rejection for a proposal that never reached scoring.
fn unscored(proposal: &Proposal, field: &str, now_ms: u64) -> ConsensusOutcome {
    ConsensusOutcome {
        proposal_id: proposal.id.clone(),
        agent_id: proposal.agent_id.clone(),
        decision: Decision::Rejected,
        reason: DecisionReason::Malformed(field.to_string()),
        weighted_score: 0.0,
        breakdown: None,
        decided_at_ms: now_ms,
    }
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}
