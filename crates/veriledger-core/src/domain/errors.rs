//! # Domain Errors
//!
//! Error taxonomy for the ledger engine.
//!
//! ## Design Principles
//!
//! - Each variant maps to one failure class with one propagation policy
//! - Malformed input and chain violations surface synchronously
//! - Transient failures (signing, network) are retried up to a budget
//! - No panics in domain logic

use thiserror::Error;

/// Errors surfaced by the ledger engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Draft rejected before hashing. Never retried.
    #[error("Malformed draft: {reason}")]
    MalformedDraft { reason: String },

    /// Persisted chain head does not match the expected last hash
    /// (INVARIANT-1/4 violation). Fatal; the issuer is halted.
    #[error("Chain integrity violation for issuer {issuer}: expected head {expected}, found {found}")]
    ChainIntegrity {
        issuer: String,
        expected: String,
        found: String,
    },

    /// Stored chain failed linkage replay.
    #[error("Chain replay failed for issuer {issuer}: {fault}")]
    ChainVerification { issuer: String, fault: String },

    /// Appends for this issuer are halted pending operator intervention.
    #[error("Issuer {issuer} halted after a chain integrity violation; operator resume required")]
    IssuerHalted { issuer: String },

    /// Signing failed while configuration mandates a signature. Retryable.
    #[error("Signing failed: {reason}")]
    Signing { reason: String },

    /// Transport-level submission failure. Retryable with backoff.
    #[error("Network error during submission: {reason}")]
    Network { reason: String },

    /// Submission timed out. Retryable with backoff.
    #[error("Submission timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Authority returned a structured rejection. Terminal; requires a
    /// corrective invoice (INVARIANT-6).
    #[error("Authority rejected invoice: [{reason_code}] {description}")]
    AuthorityRejected {
        reason_code: String,
        description: String,
    },

    /// No record exists for this invoice.
    #[error("Record not found: {invoice_id}")]
    RecordNotFound { invoice_id: String },

    /// State machine refused a transition.
    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Record store failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Verification code rendering failure.
    #[error("Verification code encoding failed: {0}")]
    Encode(#[from] EncodeError),
}

/// Record store and audit log errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// I/O error in the backing store.
    #[error("Store I/O error: {message}")]
    Io { message: String },

    /// Stored data failed to decode.
    #[error("Store corruption: {message}")]
    Corruption { message: String },
}

/// Authority gateway failures. Both variants are retryable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorityError {
    /// Connection or protocol failure.
    #[error("Authority unreachable: {reason}")]
    Network { reason: String },

    /// No response within the configured deadline.
    #[error("Authority timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl From<AuthorityError> for LedgerError {
    fn from(err: AuthorityError) -> Self {
        match err {
            AuthorityError::Network { reason } => LedgerError::Network { reason },
            AuthorityError::Timeout { seconds } => LedgerError::Timeout { seconds },
        }
    }
}

/// Verification code encoder errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Payload cannot be represented by the encoder.
    #[error("Payload not encodable: {reason}")]
    Unencodable { reason: String },

    /// Rendering failed.
    #[error("Rendering failed: {reason}")]
    Render { reason: String },
}
