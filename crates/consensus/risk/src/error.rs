/// Errors from the Risk Assessor.
#[derive(Debug, thiserror::Error)]
pub enum RiskError {
    #[error("invalid risk configuration: {0}")]
    InvalidConfig(String),
}
