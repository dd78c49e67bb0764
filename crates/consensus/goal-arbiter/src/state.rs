use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Priority the evolution loop currently gives each domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalState {
    /// Missing domains have priority 1.0.
    pub domain_priorities: HashMap<String, f64>,
}

impl GlobalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_priority(mut self, domain: impl Into<String>, priority: f64) -> Self {
        self.domain_priorities.insert(domain.into(), priority);
        self
    }

    /// Priority for a domain; negative or non-finite values read as 0.
    pub fn priority(&self, domain: &str) -> f64 {
        match self.domain_priorities.get(domain) {
            Some(p) if p.is_finite() => p.max(0.0),
            Some(_) => 0.0,
            None => 1.0,
        }
    }
}
