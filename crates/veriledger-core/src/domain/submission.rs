//! # Submission State Machine
//!
//! Pure transition table for the record lifecycle. The service applies
//! events; this module decides which transitions are legal.
//!
//! ```text
//! Pending ──SignSucceeded──▶ Signed ──Dispatch──▶ Submitted
//! Pending ──SignFailed─────▶ Pending (retry later)
//! Submitted ──AuthorityAccepted──▶ Accepted   (terminal)
//! Submitted ──AuthorityRejected──▶ Rejected   (terminal)
//! Submitted ──TransientFailure───▶ Error      (retryable)
//! Error ──Dispatch──▶ Submitted               (manual or budgeted retry)
//! ```

use crate::domain::errors::LedgerError;
use shared_types::{Hash, InvoiceId, RecordState};

/// Events applied to a record's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    SignSucceeded,
    SignFailed,
    /// A submission attempt is dispatched to the authority.
    Dispatch,
    AuthorityAccepted,
    AuthorityRejected,
    /// Network failure or timeout; the attempt may be retried.
    TransientFailure,
}

/// Next state for `(current, event)`, or an `InvalidTransition` error.
///
/// Terminal states accept no events; in particular nothing reaches
/// `Accepted` except `AuthorityAccepted` on a dispatched submission.
pub fn next_state(current: RecordState, event: SubmissionEvent) -> Result<RecordState, LedgerError> {
    use RecordState::*;
    use SubmissionEvent::*;

    let next = match (current, event) {
        (Pending, SignSucceeded) => Signed,
        (Pending, SignFailed) => Pending,
        (Signed, Dispatch) | (Error, Dispatch) => Submitted,
        (Submitted, AuthorityAccepted) => Accepted,
        (Submitted, AuthorityRejected) => Rejected,
        (Submitted, TransientFailure) => Error,
        (from, _) => {
            return Err(LedgerError::InvalidTransition {
                from: format!("{from:?}"),
                to: format!("{event:?}"),
            })
        }
    };
    Ok(next)
}

/// Stable idempotency token for one logical invoice submission.
///
/// Derived from the invoice id and content hash so every retry of the
/// same chain link presents the same token to the authority.
pub fn idempotency_token(invoice_id: &InvoiceId, content_hash: &Hash) -> String {
    format!("{}:{}", invoice_id.as_str(), hex::encode(&content_hash[..16]))
}
