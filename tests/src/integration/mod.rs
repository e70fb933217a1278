//! Cross-component integration scenarios.

pub mod chain_integrity;
pub mod concurrency;
pub mod submission;
pub mod verification;
