//! # Veriledger Test Suite
//!
//! Unified test crate for cross-component scenarios:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── chain_integrity.rs   # linkage, sequencing, tamper detection
//!     ├── concurrency.rs       # parallel submissions per issuer
//!     ├── submission.rs        # authority flows, retry budgets
//!     └── verification.rs      # verification URL and QR artifacts
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p veriledger-tests
//! cargo test -p veriledger-tests integration::chain_integrity::
//! ```

#![allow(dead_code)]

pub mod integration;

use std::sync::Arc;

use shared_types::{InvoiceDraft, InvoiceId, InvoiceTotals, LineItem, Party};
use veriledger_core::adapters::{
    InMemoryAuditLog, InMemoryRecordStore, MockAuthorityGateway, MockTimeSource, PassthroughEncoder,
};
use veriledger_core::{LedgerConfig, LedgerDependencies, LedgerService, RetryPolicy};
use veriledger_crypto::NoopSigner;

/// Service fixture wired with shared in-memory adapters so tests can
/// inspect or tamper with the store behind the engine's back.
pub type TestLedger = LedgerService<
    Arc<InMemoryRecordStore>,
    Arc<InMemoryAuditLog>,
    Arc<MockAuthorityGateway>,
    NoopSigner,
    PassthroughEncoder,
    MockTimeSource,
>;

/// Handles to the adapters backing a [`TestLedger`].
pub struct TestHarness {
    pub ledger: Arc<TestLedger>,
    pub store: Arc<InMemoryRecordStore>,
    pub audit: Arc<InMemoryAuditLog>,
    pub authority: Arc<MockAuthorityGateway>,
}

/// Retry policy with millisecond delays so scenarios run fast.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 5,
        base_delay_ms: 1,
        max_delay_ms: 5,
        jitter: false,
    }
}

pub fn fast_config() -> LedgerConfig {
    LedgerConfig {
        retry: fast_retry(),
        ..LedgerConfig::default()
    }
}

/// Build a harness around a scriptable authority.
pub fn harness_with(authority: MockAuthorityGateway, config: LedgerConfig) -> TestHarness {
    let store = Arc::new(InMemoryRecordStore::new());
    let audit = Arc::new(InMemoryAuditLog::new());
    let authority = Arc::new(authority);

    let ledger = LedgerService::new(
        LedgerDependencies {
            store: store.clone(),
            audit: audit.clone(),
            authority: authority.clone(),
            signer: NoopSigner,
            encoder: PassthroughEncoder,
            time_source: MockTimeSource::new(1_700_000_000),
        },
        config,
    );

    TestHarness {
        ledger: Arc::new(ledger),
        store,
        audit,
        authority,
    }
}

/// Harness whose authority accepts everything.
pub fn harness() -> TestHarness {
    harness_with(MockAuthorityGateway::accepting(), fast_config())
}

/// Single-line draft with a zero tax rate and the given total.
pub fn draft(invoice: &str, issuer: &str, total: f64) -> InvoiceDraft {
    InvoiceDraft {
        invoice_id: InvoiceId::new(invoice),
        invoice_number: format!("FA2026/{invoice}"),
        issuer: Party {
            tax_id: issuer.to_string(),
            name: "Cantina Rust SL".to_string(),
        },
        receiver: None,
        lines: vec![LineItem {
            description: "Servicio".to_string(),
            quantity: 1.0,
            unit_price: total,
            tax_rate: 0.0,
        }],
        totals: InvoiceTotals {
            taxable_base: total,
            tax_amount: 0.0,
            total,
        },
        issue_date: "2026-08-06".to_string(),
        issued_at: 1_700_000_000,
        external_reference: None,
    }
}

/// Install a subscriber once so `RUST_LOG=veriledger=debug cargo test`
/// shows engine logs.
pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
