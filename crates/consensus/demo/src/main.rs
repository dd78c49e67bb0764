//! Consensus demo - one evolution cycle against simulated agents
//!
//! Walks the consensus layer through:
//! - a low-risk proposal accepted on trust and sandbox quality
//! - a PII change escalated to a (simulated) human reviewer
//! - an agent that misses the collection deadline
//! - a novel insight cached as a strategic intent
//! - a goal negotiation steered by that intent

use clap::Parser;
use maple_consensus_engine::{ConsensusConfig, ConsensusEngine, RecordingReviewChannel};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod scenario;

/// Consensus demo CLI
#[derive(Parser)]
#[command(name = "consensus-demo")]
#[command(about = "Run a scripted consensus cycle against simulated agents", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CONSENSUS_CONFIG")]
    config: Option<String>,

    /// Override the per-agent collection timeout from the config
    #[arg(long, env = "CONSENSUS_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Log level
    #[arg(long, env = "CONSENSUS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "CONSENSUS_LOG_JSON")]
    json: bool,

    /// Print the final metrics as JSON
    #[arg(long)]
    metrics_json: bool,
}

impl Cli {
    /// Flags given on the command line win over the loaded config.
    fn apply_overrides(&self, config: &mut ConsensusConfig) {
        if let Some(timeout_ms) = self.timeout_ms {
            config.engine.collection_timeout_ms = timeout_ms;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        config.logging.json |= self.json;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ConsensusConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let review = Arc::new(RecordingReviewChannel::new());
    let engine = ConsensusEngine::new(&config)?.with_review_channel(review.clone());

    println!(
        r#"
  Maple Consensus - demo cycle
  Version: {}
  Collection timeout: {} ms
"#,
        env!("CARGO_PKG_VERSION"),
        config.engine.collection_timeout_ms
    );

    scenario::run(&engine, &review).await?;

    let metrics = engine.metrics();
    if cli.metrics_json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        println!(
            "rounds={} accepted={} rejected={} escalated={} timeouts={} intents={} acceptance={:.2}",
            metrics.rounds,
            metrics.accepted,
            metrics.rejected,
            metrics.escalated,
            metrics.timeouts,
            metrics.intents_cached,
            metrics.acceptance_rate()
        );
    }
    Ok(())
}
