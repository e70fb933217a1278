//! # State Machine Driving
//!
//! Signing and authority submission with bounded, jittered backoff.
//! The chain-append lock is never held here (INVARIANT-8).

use super::*;
use crate::domain::errors::LedgerError;
use crate::domain::submission::{next_state, SubmissionEvent};
use crate::ports::outbound::AuthorityOutcome;
use shared_types::{AuthorityResponse, RecordState};

impl<RS, AL, AG, SP, CE, TS> LedgerService<RS, AL, AG, SP, CE, TS>
where
    RS: RecordStore,
    AL: AuditLog,
    AG: AuthorityGateway,
    SP: SignatureProvider,
    CE: CodeEncoder,
    TS: TimeSource,
{
    /// Operator resume for a non-terminal record. Grants a fresh retry
    /// budget; cumulative `attempts` keep counting.
    pub async fn retry_submission(
        &self,
        invoice_id: &InvoiceId,
    ) -> Result<IntegrityRecord, LedgerError> {
        let mut record =
            self.store
                .get(invoice_id)?
                .ok_or_else(|| LedgerError::RecordNotFound {
                    invoice_id: invoice_id.to_string(),
                })?;

        if record.state.is_terminal() {
            return Ok(record);
        }

        // A stale in-flight marker means a previous run was interrupted
        // between dispatch and outcome; recover it as a failed attempt.
        if record.state == RecordState::Submitted {
            record.state = next_state(record.state, SubmissionEvent::TransientFailure)?;
            record.updated_at = self.time_source.now();
            self.store.put(&record)?;
            self.log(
                invoice_id,
                LogAction::Submit,
                LogOutcome::Failure,
                "stale in-flight submission recovered as transient failure",
            );
        }

        self.drive(record).await
    }

    /// Drive a record as far as the state machine allows in one run.
    pub(crate) async fn drive(
        &self,
        record: IntegrityRecord,
    ) -> Result<IntegrityRecord, LedgerError> {
        let record = self.ensure_signed(record).await?;
        match record.state {
            RecordState::Signed | RecordState::Error => self.submit_with_retries(record).await,
            _ => Ok(record),
        }
    }

    /// Move a `Pending` record to `Signed`, retrying transient signing
    /// failures within the budget. A record stays `Pending` when signing
    /// is mandatory and unavailable.
    async fn ensure_signed(
        &self,
        mut record: IntegrityRecord,
    ) -> Result<IntegrityRecord, LedgerError> {
        if record.state != RecordState::Pending {
            return Ok(record);
        }

        let mut tries = 0;
        loop {
            tries += 1;
            match self.signer.sign(&record.content_hash) {
                Ok(Some(signature)) => {
                    record.signature = Some(signature);
                    record.state = next_state(record.state, SubmissionEvent::SignSucceeded)?;
                    record.updated_at = self.time_source.now();
                    self.store.put(&record)?;
                    let key = self.signer.key_id().unwrap_or_else(|| "-".to_string());
                    self.log(
                        &record.invoice_id,
                        LogAction::Sign,
                        LogOutcome::Success,
                        format!("signed with key {key}"),
                    );
                    return Ok(record);
                }
                Ok(None) if !self.config.signing_mandatory => {
                    record.state = next_state(record.state, SubmissionEvent::SignSucceeded)?;
                    record.updated_at = self.time_source.now();
                    self.store.put(&record)?;
                    self.log(
                        &record.invoice_id,
                        LogAction::Sign,
                        LogOutcome::Success,
                        "signing disabled by configuration",
                    );
                    return Ok(record);
                }
                Ok(None) => {
                    // A keyless provider will not improve on retry.
                    record.state = next_state(record.state, SubmissionEvent::SignFailed)?;
                    self.store.put(&record)?;
                    self.log(
                        &record.invoice_id,
                        LogAction::Sign,
                        LogOutcome::Failure,
                        "signing mandatory but provider holds no key",
                    );
                    return Ok(record);
                }
                Err(err) => {
                    record.state = next_state(record.state, SubmissionEvent::SignFailed)?;
                    self.store.put(&record)?;
                    self.log(
                        &record.invoice_id,
                        LogAction::Sign,
                        LogOutcome::Failure,
                        err.to_string(),
                    );
                    if tries >= self.config.retry.max_attempts {
                        tracing::warn!(
                            "[veriledger] Signing budget exhausted for {}; record left Pending",
                            record.invoice_id
                        );
                        return Ok(record);
                    }
                    tokio::time::sleep(self.config.retry.delay_for(tries)).await;
                }
            }
        }
    }

    /// Submit to the authority until a verdict arrives or the budget is
    /// exhausted. Each attempt writes one `Submit` row; a verdict adds
    /// one `ReceiveResponse` row.
    async fn submit_with_retries(
        &self,
        mut record: IntegrityRecord,
    ) -> Result<IntegrityRecord, LedgerError> {
        let mut tries = 0;
        loop {
            tries += 1;
            record.state = next_state(record.state, SubmissionEvent::Dispatch)?;
            record.attempts += 1;
            record.updated_at = self.time_source.now();
            self.store.put(&record)?;

            let request = self.submission_request(&record);
            let correlation_id = request.correlation_id;
            tracing::info!(
                "[veriledger] 📤 Submitting invoice {} (attempt {}, exchange {})",
                record.invoice_id,
                record.attempts,
                correlation_id
            );

            match self.authority.submit(request).await {
                Ok(AuthorityOutcome::Accepted { confirmation_code }) => {
                    self.log(
                        &record.invoice_id,
                        LogAction::Submit,
                        LogOutcome::Success,
                        format!("exchange {correlation_id} delivered a verdict"),
                    );
                    record.state = next_state(record.state, SubmissionEvent::AuthorityAccepted)?;
                    record.authority_response = Some(AuthorityResponse::Accepted {
                        confirmation_code: confirmation_code.clone(),
                    });
                    record.updated_at = self.time_source.now();
                    self.store.put(&record)?;
                    self.log(
                        &record.invoice_id,
                        LogAction::ReceiveResponse,
                        LogOutcome::Success,
                        format!("accepted with confirmation code {confirmation_code}"),
                    );
                    tracing::info!(
                        "[veriledger] ✓ Invoice {} accepted by authority ({})",
                        record.invoice_id,
                        confirmation_code
                    );
                    return Ok(record);
                }
                Ok(AuthorityOutcome::Rejected {
                    reason_code,
                    description,
                }) => {
                    self.log(
                        &record.invoice_id,
                        LogAction::Submit,
                        LogOutcome::Success,
                        format!("exchange {correlation_id} delivered a verdict"),
                    );
                    record.state = next_state(record.state, SubmissionEvent::AuthorityRejected)?;
                    record.authority_response = Some(AuthorityResponse::Rejected {
                        reason_code: reason_code.clone(),
                        description: description.clone(),
                    });
                    record.updated_at = self.time_source.now();
                    self.store.put(&record)?;
                    self.log(
                        &record.invoice_id,
                        LogAction::ReceiveResponse,
                        LogOutcome::Failure,
                        format!("rejected [{reason_code}] {description}"),
                    );
                    tracing::warn!(
                        "[veriledger] Invoice {} rejected [{}]; a corrective invoice is required",
                        record.invoice_id,
                        reason_code
                    );
                    return Ok(record);
                }
                Err(err) => {
                    record.state = next_state(record.state, SubmissionEvent::TransientFailure)?;
                    record.updated_at = self.time_source.now();
                    self.store.put(&record)?;
                    self.log(
                        &record.invoice_id,
                        LogAction::Submit,
                        LogOutcome::Failure,
                        err.to_string(),
                    );
                    if tries >= self.config.retry.max_attempts {
                        tracing::warn!(
                            "[veriledger] Submission budget exhausted for {} after {} attempts; left in Error for operator resume",
                            record.invoice_id,
                            record.attempts
                        );
                        return Ok(record);
                    }
                    tokio::time::sleep(self.config.retry.delay_for(tries)).await;
                }
            }
        }
    }
}
