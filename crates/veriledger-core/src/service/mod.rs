//! # Ledger Service
//!
//! The application service implementing [`InvoiceLedgerApi`].
//!
//! ## Architecture
//!
//! 1. Uses dependency injection for every external dependency
//! 2. Serializes chain appends per issuer; issuers are independent
//! 3. Never holds the chain lock across authority I/O
//! 4. Writes one compliance log row per attempted action

mod advance;
mod api;
mod queries;
mod submit;

use crate::domain::config::{LedgerConfig, OperatingMode};
use crate::ports::outbound::{
    AuditLog, AuthorityGateway, CodeEncoder, RecordStore, SubmissionRequest, TimeSource,
};
use parking_lot::Mutex;
use shared_types::{Hash, IntegrityRecord, InvoiceId, IssuerId, LogAction, LogOutcome};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;
use veriledger_crypto::{hash_function_for, HashFunction, SignatureProvider};

/// The invoice ledger service.
///
/// Generic over its driven ports so hosts wire in their own store,
/// authority client and encoder; the hash function is resolved from
/// configuration.
pub struct LedgerService<RS, AL, AG, SP, CE, TS>
where
    RS: RecordStore,
    AL: AuditLog,
    AG: AuthorityGateway,
    SP: SignatureProvider,
    CE: CodeEncoder,
    TS: TimeSource,
{
    pub(crate) store: RS,
    pub(crate) audit: AL,
    pub(crate) authority: AG,
    pub(crate) signer: SP,
    pub(crate) encoder: CE,
    pub(crate) time_source: TS,
    pub(crate) hasher: Box<dyn HashFunction>,
    pub(crate) config: LedgerConfig,
    /// Expected head hash per issuer; the only shared mutable chain state.
    chain_heads: Mutex<HashMap<IssuerId, Hash>>,
    /// Per-issuer append locks (INVARIANT-2: gapless sequencing).
    chain_locks: Mutex<HashMap<IssuerId, Arc<Mutex<()>>>>,
    /// Issuers halted after an integrity violation (INVARIANT-4).
    halted: Mutex<HashSet<IssuerId>>,
}

/// Dependencies for [`LedgerService`].
pub struct LedgerDependencies<RS, AL, AG, SP, CE, TS> {
    pub store: RS,
    pub audit: AL,
    pub authority: AG,
    pub signer: SP,
    pub encoder: CE,
    pub time_source: TS,
}

impl<RS, AL, AG, SP, CE, TS> LedgerService<RS, AL, AG, SP, CE, TS>
where
    RS: RecordStore,
    AL: AuditLog,
    AG: AuthorityGateway,
    SP: SignatureProvider,
    CE: CodeEncoder,
    TS: TimeSource,
{
    /// Create a service with the given dependencies and configuration.
    pub fn new(deps: LedgerDependencies<RS, AL, AG, SP, CE, TS>, config: LedgerConfig) -> Self {
        let hasher = hash_function_for(config.hash_algorithm);
        Self {
            store: deps.store,
            audit: deps.audit,
            authority: deps.authority,
            signer: deps.signer,
            encoder: deps.encoder,
            time_source: deps.time_source,
            hasher,
            config,
            chain_heads: Mutex::new(HashMap::new()),
            chain_locks: Mutex::new(HashMap::new()),
            halted: Mutex::new(HashSet::new()),
        }
    }

    /// Engine configuration snapshot.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Per-issuer append lock, created on first use.
    pub(crate) fn issuer_lock(&self, issuer: &IssuerId) -> Arc<Mutex<()>> {
        self.chain_locks
            .lock()
            .entry(issuer.clone())
            .or_default()
            .clone()
    }

    pub(crate) fn is_halted(&self, issuer: &IssuerId) -> bool {
        self.halted.lock().contains(issuer)
    }

    pub(crate) fn halt_issuer(&self, issuer: &IssuerId) {
        self.halted.lock().insert(issuer.clone());
        tracing::error!(
            "[veriledger] Chain integrity violation: issuer {} halted pending operator resume",
            issuer
        );
    }

    pub(crate) fn halted_remove(&self, issuer: &IssuerId) -> bool {
        self.halted.lock().remove(issuer)
    }

    pub(crate) fn expected_head(&self, issuer: &IssuerId) -> Option<Hash> {
        self.chain_heads.lock().get(issuer).copied()
    }

    pub(crate) fn set_expected_head(&self, issuer: &IssuerId, head: Hash) {
        self.chain_heads.lock().insert(issuer.clone(), head);
    }

    pub(crate) fn clear_expected_head(&self, issuer: &IssuerId) {
        self.chain_heads.lock().remove(issuer);
    }

    /// Append one compliance log row. A failing audit sink is reported
    /// but never aborts the ledger operation itself.
    pub(crate) fn log(
        &self,
        invoice_id: &InvoiceId,
        action: LogAction,
        outcome: LogOutcome,
        detail: impl Into<String>,
    ) {
        let detail = detail.into();
        if let Err(err) =
            self.audit
                .append(invoice_id, self.time_source.now(), action, outcome, detail)
        {
            tracing::error!(
                "[veriledger] Failed to write compliance log row for {}: {}",
                invoice_id,
                err
            );
        }
    }

    /// Build the authority request for one submission attempt. The
    /// idempotency token comes from the record and is stable; the
    /// correlation id is fresh per exchange.
    pub(crate) fn submission_request(&self, record: &IntegrityRecord) -> SubmissionRequest {
        SubmissionRequest {
            correlation_id: Uuid::new_v4(),
            invoice_id: record.invoice_id.clone(),
            issuer_tax_id: record.issuer_id.as_str().to_string(),
            invoice_number: record.invoice_number.clone(),
            content_hash: record.content_hash,
            previous_hash: record.previous_hash,
            signature: record.signature,
            idempotency_token: record.idempotency_token.clone(),
            production: self.config.mode == OperatingMode::Production,
        }
    }
}
