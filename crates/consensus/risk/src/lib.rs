#![deny(unsafe_code)]
//! # maple-consensus-risk
//!
//! The Risk Assessor: classifies each proposal as low, elevated or critical
//! and attaches the weighted score it must reach to be accepted.
//!
//! Critical proposals carry a required threshold of 1.0 and are always sent
//! to human review by the consensus engine.

pub mod assessor;
pub mod complexity;
pub mod error;

pub use assessor::{RiskAssessor, RiskConfig, CRITICAL_THRESHOLD};
pub use complexity::{line_factor, normalized_entropy};
pub use error::RiskError;
