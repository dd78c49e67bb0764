/// Errors from the Trust Registry.
#[derive(Debug, thiserror::Error)]
pub enum TrustError {
    #[error("invalid trust configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid trust record for {agent}: {reason}")]
    InvalidRecord { agent: String, reason: String },
}
