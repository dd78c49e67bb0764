//! Agents and their capability tags.

use crate::ids::AgentId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared role of an agent.
///
/// Roles are capability tags looked up by contextual weighting rules, not a
/// type hierarchy. They serialize as lowercase strings (`"security"`,
/// `"specialist:data"`) so rule tables stay readable in configuration files.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AgentRole {
    Architect,
    Optimizer,
    Security,
    Generalist,
    Documentation,
    /// Domain specialist, e.g. `Specialist("data")`.
    Specialist(String),
}

impl AgentRole {
    /// Roles that write or reason about code directly.
    pub fn is_technical(&self) -> bool {
        matches!(
            self,
            Self::Architect | Self::Optimizer | Self::Security | Self::Specialist(_)
        )
    }

    /// The specialty domain, if this is a specialist.
    pub fn specialty(&self) -> Option<&str> {
        match self {
            Self::Specialist(domain) => Some(domain.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Architect => write!(f, "architect"),
            Self::Optimizer => write!(f, "optimizer"),
            Self::Security => write!(f, "security"),
            Self::Generalist => write!(f, "generalist"),
            Self::Documentation => write!(f, "documentation"),
            Self::Specialist(domain) => write!(f, "specialist:{}", domain),
        }
    }
}

impl FromStr for AgentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "architect" => Ok(Self::Architect),
            "optimizer" => Ok(Self::Optimizer),
            "security" => Ok(Self::Security),
            "generalist" => Ok(Self::Generalist),
            "documentation" => Ok(Self::Documentation),
            other => match other.strip_prefix("specialist:") {
                Some(domain) if !domain.is_empty() => Ok(Self::Specialist(domain.to_string())),
                _ => Err(format!("unknown agent role: {s}")),
            },
        }
    }
}

impl TryFrom<String> for AgentRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AgentRole> for String {
    fn from(role: AgentRole) -> Self {
        role.to_string()
    }
}

/// A generative agent participating in consensus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub role: AgentRole,
}

impl Agent {
    pub fn new(id: impl Into<AgentId>, role: AgentRole) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    /// An agent with no declared role.
    pub fn generalist(id: impl Into<AgentId>) -> Self {
        Self::new(id, AgentRole::Generalist)
    }
}
