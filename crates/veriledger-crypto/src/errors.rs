//! Error types for cryptographic operations.

use thiserror::Error;

/// Cryptographic failures surfaced to the ledger engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Signing key material could not be loaded or used.
    #[error("Signing failed: {reason}")]
    SigningFailed { reason: String },

    /// Public key bytes do not form a valid point.
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Signature does not verify against the message and key.
    #[error("Signature verification failed")]
    SignatureVerificationFailed,
}
