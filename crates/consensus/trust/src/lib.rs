#![deny(unsafe_code)]
//! # maple-consensus-trust
//!
//! The Trust Registry: process-wide per-agent reliability scores.
//!
//! Scores only move through [`TrustRegistry::record_outcome`] (exponential
//! moving average toward 1.0 on success, 0.0 on failure), the explicit
//! [`TrustRegistry::calibrate`] pass for unseen agents, and the per-round
//! [`TrustRegistry::decay_idle`] pull toward the neutral baseline.
//! Every score stays in `[0, 1]`.

pub mod calibration;
pub mod config;
pub mod error;
pub mod registry;

pub use calibration::{CalibrationReport, CalibrationSample};
pub use config::TrustConfig;
pub use error::TrustError;
pub use registry::{OutcomeKind, TrustRecord, TrustRegistry, TrustUpdate};
