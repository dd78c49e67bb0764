use crate::abstraction::abstract_principle;
use maple_consensus_types::{ConsensusOutcome, IntentId, Proposal, StrategicIntent};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

/// Admission and lifetime rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentCacheConfig {
    /// Minimum post-hoc confidence for admission.
    pub admission_confidence: f64,
    /// Lifespan given to new intents; `None` never expires.
    pub default_lifespan_cycles: Option<u64>,
    pub max_principle_len: usize,
}

impl Default for IntentCacheConfig {
    fn default() -> Self {
        Self {
            admission_confidence: 0.9,
            default_lifespan_cycles: Some(50),
            max_principle_len: 240,
        }
    }
}

/// Process-wide store of strategic intents.
pub struct IntentCache {
    config: IntentCacheConfig,
    /// Insertion order is preserved; entries are never removed.
    entries: RwLock<Vec<StrategicIntent>>,
    cycle: AtomicU64,
}

impl IntentCache {
    pub fn new(config: IntentCacheConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(Vec::new()),
            cycle: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &IntentCacheConfig {
        &self.config
    }

    /// Whether an outcome/proposal pair qualifies for admission.
    pub fn is_admissible(&self, outcome: &ConsensusOutcome, proposal: &Proposal) -> bool {
        outcome.is_accepted()
            && proposal.is_novel_insight()
            && outcome.weighted_score >= self.config.admission_confidence
    }

    /// Abstract an accepted novel insight into a strategic intent.
    ///
    /// The outcome's weighted score is the post-hoc confidence. Returns the
    /// stored intent, or `None` when the pair is not admissible or the
    /// rationale has no usable text.
    pub fn abstract_and_cache(
        &self,
        outcome: &ConsensusOutcome,
        proposal: &Proposal,
    ) -> Option<StrategicIntent> {
        if !self.is_admissible(outcome, proposal) {
            debug!(
                proposal = %outcome.proposal_id,
                confidence = outcome.weighted_score,
                "Intent not admitted"
            );
            return None;
        }

        let principle =
            abstract_principle(&proposal.payload.rationale, self.config.max_principle_len)?;

        let intent = StrategicIntent {
            id: IntentId::generate(),
            principle,
            confidence: outcome.weighted_score.clamp(0.0, 1.0),
            domain: proposal.domain.clone(),
            source_proposal: proposal.id.clone(),
            created_cycle: self.current_cycle(),
            created_at_ms: outcome.decided_at_ms,
            lifespan_cycles: self.config.default_lifespan_cycles,
        };

        self.entries.write().push(intent.clone());

        info!(
            intent = %intent.id,
            domain = %intent.domain,
            confidence = intent.confidence,
            "Strategic intent cached"
        );
        Some(intent)
    }

    /// Live intents for a domain, most confident first.
    ///
    /// Equal confidence keeps insertion order. Pure read: repeated calls with
    /// no intervening writes return identical sequences.
    pub fn retrieve(&self, domain: &str) -> Vec<StrategicIntent> {
        let cycle = self.current_cycle();
        let mut live: Vec<StrategicIntent> = self
            .entries
            .read()
            .iter()
            .filter(|i| i.domain.eq_ignore_ascii_case(domain) && !i.is_expired(cycle))
            .cloned()
            .collect();
        live.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        live
    }

    /// Highest live confidence for a domain.
    pub fn top_confidence(&self, domain: &str) -> Option<f64> {
        self.retrieve(domain).first().map(|i| i.confidence)
    }

    pub fn current_cycle(&self) -> u64 {
        self.cycle.load(Ordering::SeqCst)
    }

    /// Move to the next evolution cycle. Returns the new cycle number.
    pub fn advance_cycle(&self) -> u64 {
        let next = self.cycle.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(cycle = next, "Intent cache cycle advanced");
        next
    }

    /// Every intent ever admitted, expired ones included.
    pub fn audit_log(&self) -> Vec<StrategicIntent> {
        self.entries.read().clone()
    }

    /// Reload persisted intents, keeping their original cycle stamps. The
    /// cycle counter moves forward to the newest stamp if it is behind.
    pub fn restore(&self, intents: Vec<StrategicIntent>) -> usize {
        let newest = intents.iter().map(|i| i.created_cycle).max().unwrap_or(0);
        let count = intents.len();
        self.entries.write().extend(intents);
        self.cycle.fetch_max(newest, Ordering::SeqCst);
        info!(intents = count, "Intent cache restored");
        count
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for IntentCache {
    fn default() -> Self {
        Self::new(IntentCacheConfig::default())
    }
}
