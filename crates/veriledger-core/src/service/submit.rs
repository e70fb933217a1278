//! # Invoice Ingestion
//!
//! Canonicalization and the chain-append critical section.

use super::*;
use crate::domain::canonical::canonicalize;
use crate::domain::chain::compute_content_hash;
use crate::domain::errors::LedgerError;
use crate::domain::submission::idempotency_token;
use crate::domain::verification::build_verification_url;
use shared_types::{InvoiceDraft, RecordState};

impl<RS, AL, AG, SP, CE, TS> LedgerService<RS, AL, AG, SP, CE, TS>
where
    RS: RecordStore,
    AL: AuditLog,
    AG: AuthorityGateway,
    SP: SignatureProvider,
    CE: CodeEncoder,
    TS: TimeSource,
{
    /// Ingest a finalized draft and drive it through the state machine.
    ///
    /// Idempotent by `invoice_id` (INVARIANT-3): a known invoice returns
    /// its stored record without touching the chain or the authority.
    pub async fn submit_invoice(
        &self,
        draft: InvoiceDraft,
    ) -> Result<IntegrityRecord, LedgerError> {
        // Canonicalize before taking any lock; malformed drafts never
        // reach the chain.
        let canonical = match canonicalize(&draft, self.config.totals_epsilon) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.log(
                    &draft.invoice_id,
                    LogAction::Generate,
                    LogOutcome::Failure,
                    err.to_string(),
                );
                return Err(err);
            }
        };

        let (record, replayed) = self.append_to_chain(&draft, &canonical)?;
        if replayed {
            return Ok(record);
        }

        tracing::info!(
            "[veriledger] ✓ Invoice {} chained as #{} for issuer {} (hash {})",
            record.invoice_id,
            record.sequence_number,
            record.issuer_id,
            record.short_hash()
        );

        self.drive(record).await
    }

    /// The per-issuer critical section: read head, link, persist.
    ///
    /// Held only for read-last/compute/write-next; signing and authority
    /// I/O happen outside (INVARIANT-8). Returns `(record, true)` on an
    /// idempotent replay.
    fn append_to_chain(
        &self,
        draft: &InvoiceDraft,
        canonical: &[u8],
    ) -> Result<(IntegrityRecord, bool), LedgerError> {
        let issuer = draft.issuer_id();
        let lock = self.issuer_lock(&issuer);
        let _guard = lock.lock();

        if self.is_halted(&issuer) {
            let err = LedgerError::IssuerHalted {
                issuer: issuer.to_string(),
            };
            self.log(
                &draft.invoice_id,
                LogAction::Generate,
                LogOutcome::Failure,
                err.to_string(),
            );
            return Err(err);
        }

        if let Some(existing) = self.store.get(&draft.invoice_id)? {
            self.log(
                &draft.invoice_id,
                LogAction::Generate,
                LogOutcome::Success,
                "idempotent replay; existing record returned unchanged",
            );
            return Ok((existing, true));
        }

        let head = self.store.head(&issuer)?;
        if let Some(expected) = self.expected_head(&issuer) {
            let found = head.as_ref().map(|h| h.content_hash);
            if found != Some(expected) {
                let err = LedgerError::ChainIntegrity {
                    issuer: issuer.to_string(),
                    expected: hex::encode(&expected[..8]),
                    found: found
                        .map(|h| hex::encode(&h[..8]))
                        .unwrap_or_else(|| "empty chain".to_string()),
                };
                self.halt_issuer(&issuer);
                self.log(
                    &draft.invoice_id,
                    LogAction::Generate,
                    LogOutcome::Failure,
                    err.to_string(),
                );
                return Err(err);
            }
        }

        let previous_hash = head.as_ref().map(|h| h.content_hash);
        let sequence_number = head.as_ref().map_or(0, |h| h.sequence_number) + 1;
        let content_hash = compute_content_hash(
            self.hasher.as_ref(),
            previous_hash.as_ref(),
            canonical,
            sequence_number,
        );

        let verification_url = build_verification_url(draft, &content_hash, &self.config);
        let verification_code = match self.encoder.encode(&verification_url) {
            Ok(code) => code,
            Err(err) => {
                let err = LedgerError::from(err);
                self.log(
                    &draft.invoice_id,
                    LogAction::Generate,
                    LogOutcome::Failure,
                    err.to_string(),
                );
                return Err(err);
            }
        };

        let now = self.time_source.now();
        let record = IntegrityRecord {
            invoice_id: draft.invoice_id.clone(),
            issuer_id: issuer.clone(),
            invoice_number: draft.invoice_number.clone(),
            sequence_number,
            content_hash,
            previous_hash,
            signature: None,
            verification_url,
            verification_code,
            state: RecordState::Pending,
            authority_response: None,
            attempts: 0,
            idempotency_token: idempotency_token(&draft.invoice_id, &content_hash),
            hash_algorithm: self.config.hash_algorithm,
            created_at: now,
            updated_at: now,
        };

        self.store.put(&record)?;
        self.set_expected_head(&issuer, content_hash);
        self.log(
            &record.invoice_id,
            LogAction::Generate,
            LogOutcome::Success,
            format!(
                "chained as #{} with hash {}",
                sequence_number,
                record.short_hash()
            ),
        );

        Ok((record, false))
    }
}
