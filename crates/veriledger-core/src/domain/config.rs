//! # Ledger Configuration
//!
//! Read-only snapshot consumed by every component. Changes take effect
//! only for invoices processed after the change; records capture the
//! configuration relevant to them (hash algorithm) at creation time.

use serde::{Deserialize, Serialize};
use shared_types::HashAlgorithm;
use std::time::Duration;

/// Production vs. test operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OperatingMode {
    /// Real submissions against the production authority endpoint.
    Production,
    /// Test submissions, flagged as such to the authority.
    #[default]
    Test,
}

/// Identifiers of the issuing software, embedded in verification URLs
/// and authority submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareInfo {
    /// Registered software identifier.
    pub id: String,
    pub name: String,
    pub version: String,
}

impl Default for SoftwareInfo {
    fn default() -> Self {
        Self {
            id: "VL01".to_string(),
            name: "Veriledger".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Bounded exponential backoff with jitter for transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum attempts per drive of the state machine. After exhaustion
    /// the record stays in `Error` and must be resumed manually.
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Add up to 25% random jitter to each delay.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based). Doubles per attempt,
    /// capped at `max_delay_ms`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        let base = self
            .base_delay_ms
            .saturating_mul(1u64 << exp)
            .min(self.max_delay_ms);
        let jitter_ms = if self.jitter && base > 0 {
            use rand::Rng;
            rand::thread_rng().gen_range(0..=base / 4)
        } else {
            0
        };
        Duration::from_millis(base.saturating_add(jitter_ms).min(self.max_delay_ms))
    }
}

/// Read-only engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Hash algorithm for new chain links. Captured per record.
    pub hash_algorithm: HashAlgorithm,
    pub mode: OperatingMode,
    /// When set, a record may not leave `Pending` without a signature.
    pub signing_mandatory: bool,
    pub software: SoftwareInfo,
    /// Base URL for third-party verification lookups.
    pub verification_base_url: String,
    /// Tolerance when validating draft totals against line items.
    pub totals_epsilon: f64,
    pub retry: RetryPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            hash_algorithm: HashAlgorithm::Sha256,
            mode: OperatingMode::Test,
            signing_mandatory: false,
            software: SoftwareInfo::default(),
            verification_base_url: "https://verify.invoices.example/qr".to_string(),
            totals_epsilon: 0.01,
            retry: RetryPolicy::default(),
        }
    }
}
