//! # Inbound API Implementation
//!
//! Implements [`InvoiceLedgerApi`] by delegating to the service's
//! inherent operations.

use super::*;
use crate::domain::errors::LedgerError;
use crate::ports::inbound::{InvoiceLedgerApi, IssuerStatistics};
use async_trait::async_trait;
use shared_types::{InvoiceDraft, LogEntry};

#[async_trait]
impl<RS, AL, AG, SP, CE, TS> InvoiceLedgerApi for LedgerService<RS, AL, AG, SP, CE, TS>
where
    RS: RecordStore,
    AL: AuditLog,
    AG: AuthorityGateway,
    SP: SignatureProvider,
    CE: CodeEncoder,
    TS: TimeSource,
{
    async fn submit_invoice(&self, draft: InvoiceDraft) -> Result<IntegrityRecord, LedgerError> {
        LedgerService::submit_invoice(self, draft).await
    }

    async fn retry_submission(
        &self,
        invoice_id: &InvoiceId,
    ) -> Result<IntegrityRecord, LedgerError> {
        LedgerService::retry_submission(self, invoice_id).await
    }

    fn resume_issuer(&self, issuer_id: &IssuerId) -> Result<(), LedgerError> {
        LedgerService::resume_issuer(self, issuer_id)
    }

    fn get_record(&self, invoice_id: &InvoiceId) -> Result<IntegrityRecord, LedgerError> {
        LedgerService::get_record(self, invoice_id)
    }

    fn get_chain_for_issuer(
        &self,
        issuer_id: &IssuerId,
    ) -> Result<Box<dyn Iterator<Item = IntegrityRecord> + Send>, LedgerError> {
        LedgerService::get_chain_for_issuer(self, issuer_id)
    }

    fn get_logs(
        &self,
        invoice_id: &InvoiceId,
    ) -> Result<Box<dyn Iterator<Item = LogEntry> + Send>, LedgerError> {
        LedgerService::get_logs(self, invoice_id)
    }

    fn get_statistics(&self, issuer_id: &IssuerId) -> Result<IssuerStatistics, LedgerError> {
        LedgerService::get_statistics(self, issuer_id)
    }

    fn verify_issuer_chain(&self, issuer_id: &IssuerId) -> Result<(), LedgerError> {
        LedgerService::verify_issuer_chain(self, issuer_id)
    }
}
