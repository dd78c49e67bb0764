#![deny(unsafe_code)]
//! # maple-consensus-intent-cache
//!
//! The Strategic Intent Cache. Accepted, novel, high-confidence proposals
//! are abstracted into short principles that later rounds retrieve by
//! domain. Entries expire by evolution cycle but are never removed, so the
//! full history stays auditable.

pub mod abstraction;
pub mod cache;

pub use abstraction::abstract_principle;
pub use cache::{IntentCache, IntentCacheConfig};
