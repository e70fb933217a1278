//! # Inbound Port (Driving API)
//!
//! The single surface external collaborators call once an invoice is
//! finalized, plus the query surface for other modules and UI.

use crate::domain::errors::LedgerError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{IntegrityRecord, InvoiceDraft, InvoiceId, IssuerId, LogEntry, RecordState};

/// Counts by state for one issuer's chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerStatistics {
    pub total: u64,
    pub pending: u64,
    pub signed: u64,
    pub submitted: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub error: u64,
}

impl IssuerStatistics {
    pub fn count(&mut self, state: RecordState) {
        self.total += 1;
        match state {
            RecordState::Pending => self.pending += 1,
            RecordState::Signed => self.signed += 1,
            RecordState::Submitted => self.submitted += 1,
            RecordState::Accepted => self.accepted += 1,
            RecordState::Rejected => self.rejected += 1,
            RecordState::Error => self.error += 1,
        }
    }
}

/// Driving API of the ledger engine.
#[async_trait]
pub trait InvoiceLedgerApi: Send + Sync {
    /// Ingest a finalized draft: canonicalize, chain, sign, build the
    /// verification artifact and drive submission within the retry
    /// budget. Idempotent by `invoice_id`.
    async fn submit_invoice(&self, draft: InvoiceDraft) -> Result<IntegrityRecord, LedgerError>;

    /// Operator resume for a record left in `Error` (or still `Pending`
    /// after signing failures). Grants a fresh retry budget.
    async fn retry_submission(&self, invoice_id: &InvoiceId)
        -> Result<IntegrityRecord, LedgerError>;

    /// Clear a chain-integrity halt after operator investigation. The
    /// stored head is re-adopted as the expected link target.
    fn resume_issuer(&self, issuer_id: &IssuerId) -> Result<(), LedgerError>;

    /// Record for one invoice.
    fn get_record(&self, invoice_id: &InvoiceId) -> Result<IntegrityRecord, LedgerError>;

    /// Ordered, lazily yielded chain for one issuer.
    fn get_chain_for_issuer(
        &self,
        issuer_id: &IssuerId,
    ) -> Result<Box<dyn Iterator<Item = IntegrityRecord> + Send>, LedgerError>;

    /// Ordered, lazily yielded compliance log for one invoice.
    fn get_logs(
        &self,
        invoice_id: &InvoiceId,
    ) -> Result<Box<dyn Iterator<Item = LogEntry> + Send>, LedgerError>;

    /// Counts by state for one issuer.
    fn get_statistics(&self, issuer_id: &IssuerId) -> Result<IssuerStatistics, LedgerError>;

    /// Replay the issuer's stored chain and verify linkage.
    fn verify_issuer_chain(&self, issuer_id: &IssuerId) -> Result<(), LedgerError>;
}
