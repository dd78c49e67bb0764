//! Strategic intents distilled from successful proposals.

use crate::ids::{IntentId, ProposalId};
use serde::{Deserialize, Serialize};

/// A reusable principle abstracted from an accepted novel insight.
///
/// Expired intents are kept for audit and only excluded from retrieval.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategicIntent {
    pub id: IntentId,
    pub principle: String,
    pub confidence: f64,
    pub domain: String,
    pub source_proposal: ProposalId,
    pub created_cycle: u64,
    pub created_at_ms: u64,
    /// Lifespan in evolution cycles; `None` never expires.
    pub lifespan_cycles: Option<u64>,
}

impl StrategicIntent {
    pub fn is_expired(&self, current_cycle: u64) -> bool {
        match self.lifespan_cycles {
            Some(lifespan) => current_cycle >= self.created_cycle.saturating_add(lifespan),
            None => false,
        }
    }
}
