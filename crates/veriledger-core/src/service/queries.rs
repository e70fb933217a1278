//! # Query Surface
//!
//! Read-side operations for other modules and UI, plus operator
//! interventions and audit export.

use super::*;
use crate::domain::chain::verify_linkage;
use crate::domain::errors::LedgerError;
use crate::ports::inbound::IssuerStatistics;
use shared_types::LogEntry;

impl<RS, AL, AG, SP, CE, TS> LedgerService<RS, AL, AG, SP, CE, TS>
where
    RS: RecordStore,
    AL: AuditLog,
    AG: AuthorityGateway,
    SP: SignatureProvider,
    CE: CodeEncoder,
    TS: TimeSource,
{
    pub fn get_record(&self, invoice_id: &InvoiceId) -> Result<IntegrityRecord, LedgerError> {
        self.store
            .get(invoice_id)?
            .ok_or_else(|| LedgerError::RecordNotFound {
                invoice_id: invoice_id.to_string(),
            })
    }

    /// Ordered chain for one issuer, yielded lazily.
    pub fn get_chain_for_issuer(
        &self,
        issuer_id: &IssuerId,
    ) -> Result<Box<dyn Iterator<Item = IntegrityRecord> + Send>, LedgerError> {
        let chain = self.store.chain(issuer_id)?;
        Ok(Box::new(chain.into_iter()))
    }

    /// Ordered compliance log for one invoice, yielded lazily.
    pub fn get_logs(
        &self,
        invoice_id: &InvoiceId,
    ) -> Result<Box<dyn Iterator<Item = LogEntry> + Send>, LedgerError> {
        let entries = self.audit.entries(invoice_id)?;
        Ok(Box::new(entries.into_iter()))
    }

    pub fn get_statistics(&self, issuer_id: &IssuerId) -> Result<IssuerStatistics, LedgerError> {
        let mut stats = IssuerStatistics::default();
        for record in self.store.chain(issuer_id)? {
            stats.count(record.state);
        }
        Ok(stats)
    }

    /// Replay the issuer's stored chain and verify linkage and
    /// sequencing.
    pub fn verify_issuer_chain(&self, issuer_id: &IssuerId) -> Result<(), LedgerError> {
        let chain = self.store.chain(issuer_id)?;
        verify_linkage(&chain).map_err(|fault| LedgerError::ChainVerification {
            issuer: issuer_id.to_string(),
            fault: fault.to_string(),
        })
    }

    /// Clear a chain-integrity halt after operator investigation. The
    /// persisted head is re-adopted as the expected link target.
    pub fn resume_issuer(&self, issuer_id: &IssuerId) -> Result<(), LedgerError> {
        let was_halted = self.halted_remove(issuer_id);
        if !was_halted {
            return Ok(());
        }

        let head = self.store.head(issuer_id)?;
        match head {
            Some(record) => self.set_expected_head(issuer_id, record.content_hash),
            None => self.clear_expected_head(issuer_id),
        }
        tracing::warn!(
            "[veriledger] Issuer {} resumed by operator; persisted head re-adopted",
            issuer_id
        );
        Ok(())
    }

    /// Render the compliance log for one invoice as JSON lines for audit
    /// export.
    pub fn export_audit_json(&self, invoice_id: &InvoiceId) -> Result<String, LedgerError> {
        let entries = self.audit.entries(invoice_id)?;
        let mut out = String::new();
        for entry in &entries {
            let line = serde_json::to_string(entry).map_err(|e| {
                LedgerError::Store(crate::domain::errors::StoreError::Corruption {
                    message: format!("log row not serializable: {e}"),
                })
            })?;
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }
}
