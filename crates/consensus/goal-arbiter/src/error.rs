use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArbiterError {
    #[error("invalid arbiter config: {0}")]
    InvalidConfig(String),
}
