/// Errors from the Contextual Weighter.
#[derive(Debug, thiserror::Error)]
pub enum WeightingError {
    #[error("invalid multiplier bound: [{min}, {max}]")]
    InvalidBound { min: f64, max: f64 },
    #[error("rule {name} has invalid multiplier {multiplier}")]
    InvalidMultiplier { name: String, multiplier: f64 },
}
