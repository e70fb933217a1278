//! # Veriledger Crypto
//!
//! Hashing and signing capabilities behind swappable traits.
//!
//! ## Capabilities
//!
//! - [`HashFunction`] — content hashing for the integrity chain
//!   (SHA-256 default, BLAKE3 alternative)
//! - [`SignatureProvider`] — optional digital signature over a content
//!   hash (`NoopSigner` in test mode, `Ed25519Signer` in production)

pub mod errors;
pub mod hashing;
pub mod signing;

pub use errors::CryptoError;
pub use hashing::{hash_function_for, Blake3Hash, HashFunction, Sha256Hash};
pub use signing::{Ed25519KeyPair, Ed25519Signer, NoopSigner, SignatureProvider};
