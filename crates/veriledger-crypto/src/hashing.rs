//! # Content Hashing
//!
//! Hash functions behind the [`HashFunction`] capability trait so the
//! chain algorithm is configuration-driven and testable with fakes.
//!
//! SHA-256 is the default; BLAKE3 is available where throughput matters.

use shared_types::{Hash, HashAlgorithm};

/// Capability trait for chain content hashing.
///
/// Implementations must be deterministic and collision-resistant with a
/// 256-bit output.
pub trait HashFunction: Send + Sync {
    /// Algorithm identifier recorded on every integrity record.
    fn algorithm(&self) -> HashAlgorithm;

    /// Hash a single input.
    fn digest(&self, data: &[u8]) -> Hash;

    /// Hash multiple inputs as one message (no per-part framing; callers
    /// frame their own input).
    fn digest_many(&self, parts: &[&[u8]]) -> Hash;
}

/// SHA-256 content hashing (default).
#[derive(Default, Clone, Copy)]
pub struct Sha256Hash;

impl HashFunction for Sha256Hash {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Sha256
    }

    fn digest(&self, data: &[u8]) -> Hash {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    fn digest_many(&self, parts: &[&[u8]]) -> Hash {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize().into()
    }
}

/// BLAKE3 content hashing (256-bit output).
#[derive(Default, Clone, Copy)]
pub struct Blake3Hash;

impl HashFunction for Blake3Hash {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Blake3
    }

    fn digest(&self, data: &[u8]) -> Hash {
        *blake3::hash(data).as_bytes()
    }

    fn digest_many(&self, parts: &[&[u8]]) -> Hash {
        let mut hasher = blake3::Hasher::new();
        for part in parts {
            hasher.update(part);
        }
        *hasher.finalize().as_bytes()
    }
}

/// Resolve the configured algorithm to an implementation.
pub fn hash_function_for(algorithm: HashAlgorithm) -> Box<dyn HashFunction> {
    match algorithm {
        HashAlgorithm::Sha256 => Box::new(Sha256Hash),
        HashAlgorithm::Blake3 => Box::new(Blake3Hash),
    }
}
