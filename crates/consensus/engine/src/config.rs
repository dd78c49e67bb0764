//! Configuration for the consensus layer

use crate::error::ConfigError;
use maple_consensus_goal_arbiter::ArbiterConfig;
use maple_consensus_intent_cache::IntentCacheConfig;
use maple_consensus_risk::RiskConfig;
use maple_consensus_trust::TrustConfig;
use maple_consensus_weighting::{ContextualWeighter, WeightingConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete configuration, one section per component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsensusConfig {
    #[serde(default)]
    pub trust: TrustConfig,

    #[serde(default)]
    pub risk: RiskConfig,

    #[serde(default)]
    pub weighting: WeightingConfig,

    #[serde(default)]
    pub intent_cache: IntentCacheConfig,

    #[serde(default)]
    pub arbiter: ArbiterConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Round and escalation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Quality assumed when the sandbox supplied no signal
    #[serde(default = "default_missing_quality")]
    pub missing_quality: f64,

    /// Width of the borderline band below the required threshold
    #[serde(default = "default_escalation_band")]
    pub escalation_band: f64,

    /// Per-agent proposal collection timeout in milliseconds
    #[serde(default = "default_collection_timeout_ms")]
    pub collection_timeout_ms: u64,

    /// How long an escalation waits for a human verdict
    #[serde(default = "default_review_window_ms")]
    pub review_window_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            missing_quality: default_missing_quality(),
            escalation_band: default_escalation_band(),
            collection_timeout_ms: default_collection_timeout_ms(),
            review_window_ms: default_review_window_ms(),
        }
    }
}

impl EngineConfig {
    pub fn collection_timeout(&self) -> Duration {
        Duration::from_millis(self.collection_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.missing_quality) {
            return Err(ConfigError::Invalid(format!(
                "engine.missing_quality {} outside [0, 1]",
                self.missing_quality
            )));
        }
        if !(0.0..=1.0).contains(&self.escalation_band) {
            return Err(ConfigError::Invalid(format!(
                "engine.escalation_band {} outside [0, 1]",
                self.escalation_band
            )));
        }
        if self.collection_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "engine.collection_timeout_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_missing_quality() -> f64 {
    0.5
}

fn default_escalation_band() -> f64 {
    0.1
}

fn default_collection_timeout_ms() -> u64 {
    5_000
}

fn default_review_window_ms() -> u64 {
    24 * 60 * 60 * 1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ConsensusConfig {
    /// Load configuration: defaults, then the optional file, then
    /// `CONSENSUS__SECTION__KEY` environment variables. The result is
    /// validated before it is returned.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&ConsensusConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CONSENSUS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let loaded: ConsensusConfig = builder.build()?.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.trust.validate()?;
        self.risk.validate()?;
        ContextualWeighter::new(self.weighting.clone())?;
        self.arbiter.validate()?;
        self.engine.validate()
    }
}
