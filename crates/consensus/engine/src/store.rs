use crate::error::StoreError;
use async_trait::async_trait;
use maple_consensus_trust::TrustRecord;
use maple_consensus_types::{AgentId, ConsensusOutcome, StrategicIntent};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Durable home for trust records, outcomes and strategic intents.
///
/// Implementations may use files, SQLite, a remote service, etc. The engine
/// only writes after a round has committed.
#[async_trait]
pub trait ConsensusStore: Send + Sync {
    /// Replace the stored trust records with `records`.
    async fn save_trust_records(&self, records: Vec<TrustRecord>) -> Result<(), StoreError>;

    async fn load_trust_records(&self) -> Result<Vec<TrustRecord>, StoreError>;

    /// Append one terminal outcome to the decision history.
    async fn append_outcome(&self, outcome: ConsensusOutcome) -> Result<(), StoreError>;

    /// Full decision history, oldest first.
    async fn load_outcomes(&self) -> Result<Vec<ConsensusOutcome>, StoreError>;

    async fn save_intent(&self, intent: StrategicIntent) -> Result<(), StoreError>;

    /// Every stored intent, oldest first.
    async fn load_intents(&self) -> Result<Vec<StrategicIntent>, StoreError>;
}

/// In-memory store for testing and development.
#[derive(Clone, Default)]
pub struct InMemoryConsensusStore {
    trust: Arc<RwLock<HashMap<AgentId, TrustRecord>>>,
    outcomes: Arc<RwLock<Vec<ConsensusOutcome>>>,
    intents: Arc<RwLock<Vec<StrategicIntent>>>,
}

impl InMemoryConsensusStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Io(format!("lock poisoned: {}", e))
}

#[async_trait]
impl ConsensusStore for InMemoryConsensusStore {
    async fn save_trust_records(&self, records: Vec<TrustRecord>) -> Result<(), StoreError> {
        let mut store = self.trust.write().map_err(poisoned)?;
        store.clear();
        for record in records {
            store.insert(record.agent.id.clone(), record);
        }
        Ok(())
    }

    async fn load_trust_records(&self) -> Result<Vec<TrustRecord>, StoreError> {
        let store = self.trust.read().map_err(poisoned)?;
        let mut records: Vec<TrustRecord> = store.values().cloned().collect();
        records.sort_by(|a, b| a.agent.id.cmp(&b.agent.id));
        Ok(records)
    }

    async fn append_outcome(&self, outcome: ConsensusOutcome) -> Result<(), StoreError> {
        self.outcomes.write().map_err(poisoned)?.push(outcome);
        Ok(())
    }

    async fn load_outcomes(&self) -> Result<Vec<ConsensusOutcome>, StoreError> {
        Ok(self.outcomes.read().map_err(poisoned)?.clone())
    }

    async fn save_intent(&self, intent: StrategicIntent) -> Result<(), StoreError> {
        let mut store = self.intents.write().map_err(poisoned)?;
        match store.iter_mut().find(|existing| existing.id == intent.id) {
            Some(existing) => *existing = intent,
            None => store.push(intent),
        }
        Ok(())
    }

    async fn load_intents(&self) -> Result<Vec<StrategicIntent>, StoreError> {
        Ok(self.intents.read().map_err(poisoned)?.clone())
    }
}
