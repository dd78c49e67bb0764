//! Cross-crate tests for the maple consensus layer.
//!
//! Property tests live in `tests/property/`, end-to-end scenarios in
//! `tests/e2e/`.
