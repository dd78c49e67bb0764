//! Escalations awaiting a human verdict.

use crate::error::ReviewError;
use async_trait::async_trait;
use maple_consensus_types::{
    DecisionReason, Proposal, ProposalId, ScoringBreakdown, TaskContext,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Everything a reviewer needs to rule on one proposal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EscalationTicket {
    pub proposal: Proposal,
    /// `CriticalRisk` or `Borderline`.
    pub reason: DecisionReason,
    pub breakdown: ScoringBreakdown,
    pub task_context: TaskContext,
    pub created_at_ms: u64,
    /// After this instant the escalation fails closed.
    pub deadline_ms: u64,
}

impl EscalationTicket {
    pub fn proposal_id(&self) -> &ProposalId {
        &self.proposal.id
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms > self.deadline_ms
    }
}

/// Outbound side of human review. Verdicts come back through
/// `ConsensusEngine::apply_verdict`.
#[async_trait]
pub trait ReviewChannel: Send + Sync {
    async fn submit(&self, ticket: EscalationTicket) -> Result<(), ReviewError>;
}

/// Keeps submitted tickets for inspection.
#[derive(Default)]
pub struct RecordingReviewChannel {
    tickets: Mutex<Vec<EscalationTicket>>,
}

impl RecordingReviewChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tickets(&self) -> Vec<EscalationTicket> {
        self.tickets.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.tickets.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.lock().is_empty()
    }
}

#[async_trait]
impl ReviewChannel for RecordingReviewChannel {
    async fn submit(&self, ticket: EscalationTicket) -> Result<(), ReviewError> {
        self.tickets.lock().push(ticket);
        Ok(())
    }
}

/// Pending escalations keyed by proposal.
#[derive(Default)]
pub(crate) struct EscalationQueue {
    pending: Mutex<HashMap<ProposalId, EscalationTicket>>,
}

impl EscalationQueue {
    /// Queue a ticket. A live ticket for the same proposal is never
    /// replaced; returns `false` in that case.
    pub(crate) fn insert(&self, ticket: EscalationTicket) -> bool {
        match self.pending.lock().entry(ticket.proposal.id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(ticket);
                true
            }
        }
    }

    pub(crate) fn take(&self, id: &ProposalId) -> Option<EscalationTicket> {
        self.pending.lock().remove(id)
    }

    /// Remove and return every ticket past its deadline, oldest first.
    pub(crate) fn take_expired(&self, now_ms: u64) -> Vec<EscalationTicket> {
        let mut pending = self.pending.lock();
        let expired: Vec<ProposalId> = pending
            .values()
            .filter(|t| t.is_expired(now_ms))
            .map(|t| t.proposal.id.clone())
            .collect();
        let mut tickets: Vec<EscalationTicket> =
            expired.iter().filter_map(|id| pending.remove(id)).collect();
        tickets.sort_by(|a, b| {
            a.created_at_ms
                .cmp(&b.created_at_ms)
                .then_with(|| a.proposal.id.cmp(&b.proposal.id))
        });
        tickets
    }

    pub(crate) fn snapshot(&self) -> Vec<EscalationTicket> {
        let mut tickets: Vec<EscalationTicket> = self.pending.lock().values().cloned().collect();
        tickets.sort_by(|a, b| {
            a.created_at_ms
                .cmp(&b.created_at_ms)
                .then_with(|| a.proposal.id.cmp(&b.proposal.id))
        });
        tickets
    }

}
