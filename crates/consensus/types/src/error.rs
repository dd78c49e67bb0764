//! Errors for malformed records.

use thiserror::Error;

/// Raised when a submitted proposal is missing required content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProposalError {
    /// A required field is empty.
    #[error("malformed proposal: missing {0}")]
    MissingField(&'static str),
}

impl ProposalError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) => field,
        }
    }
}
