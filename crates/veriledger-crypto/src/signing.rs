//! # Record Signing
//!
//! Digital signatures over content hashes, behind the
//! [`SignatureProvider`] capability so signing is pluggable:
//!
//! - [`NoopSigner`] — test mode, produces no signature
//! - [`Ed25519Signer`] — production mode, deterministic Ed25519

use crate::CryptoError;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use shared_types::{Hash, Signature};
use zeroize::Zeroize;

/// Capability trait for signing a content hash.
///
/// `Ok(None)` means the provider carries no signing capability; whether
/// that is acceptable is decided by configuration, not by the provider.
pub trait SignatureProvider: Send + Sync {
    /// Sign a content hash.
    fn sign(&self, content_hash: &Hash) -> Result<Option<Signature>, CryptoError>;

    /// Identifier of the signing key, for audit detail. `None` when
    /// signing is disabled.
    fn key_id(&self) -> Option<String>;
}

/// No-signature provider for test mode.
#[derive(Default, Clone, Copy)]
pub struct NoopSigner;

impl SignatureProvider for NoopSigner {
    fn sign(&self, _content_hash: &Hash) -> Result<Option<Signature>, CryptoError> {
        Ok(None)
    }

    fn key_id(&self) -> Option<String> {
        None
    }
}

/// Ed25519 keypair with zeroized secret material.
pub struct Ed25519KeyPair {
    signing_key: SigningKey,
}

impl Ed25519KeyPair {
    /// Generate a random keypair.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut rand::thread_rng()),
        }
    }

    /// Restore from a 32-byte secret seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Public key bytes.
    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Sign a message (deterministic nonce, no RNG at sign time).
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message).to_bytes()
    }

    /// Verify a signature against this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CryptoError> {
        let verifying_key = VerifyingKey::from_bytes(&self.public_key())
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        let sig = ed25519_dalek::Signature::from_bytes(signature);
        verifying_key
            .verify(message, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

impl Drop for Ed25519KeyPair {
    fn drop(&mut self) {
        let mut bytes = self.signing_key.to_bytes();
        bytes.zeroize();
    }
}

/// Keyed signature provider for production mode.
pub struct Ed25519Signer {
    keypair: Ed25519KeyPair,
    key_id: String,
}

impl Ed25519Signer {
    pub fn new(keypair: Ed25519KeyPair, key_id: impl Into<String>) -> Self {
        Self {
            keypair,
            key_id: key_id.into(),
        }
    }
}

impl SignatureProvider for Ed25519Signer {
    fn sign(&self, content_hash: &Hash) -> Result<Option<Signature>, CryptoError> {
        Ok(Some(self.keypair.sign(content_hash)))
    }

    fn key_id(&self) -> Option<String> {
        Some(self.key_id.clone())
    }
}
