//! # Hash Chain Linkage
//!
//! Chain math for tamper-evident invoice records: each record's content
//! hash commits to the previous record's hash, the canonical draft bytes
//! and its own sequence number. A single altered byte anywhere upstream
//! invalidates every later link.

use shared_types::{Hash, IntegrityRecord, EMPTY_CHAIN_SENTINEL};
use thiserror::Error;
use veriledger_crypto::HashFunction;

/// Faults detected while replaying a chain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainFault {
    /// Sequence numbers are not gapless ascending from 1.
    #[error("Sequence gap at position {position}: expected {expected}, found {found}")]
    SequenceGap {
        position: usize,
        expected: u64,
        found: u64,
    },

    /// `previous_hash` does not match the prior record's content hash.
    #[error("Broken link at sequence {sequence}: previous hash does not match prior record")]
    BrokenLink { sequence: u64 },

    /// The first record carries a previous hash.
    #[error("First record carries a previous hash")]
    DanglingHead,
}

/// Content hash of a new chain link:
/// `H(previous_or_sentinel ‖ canonical_bytes ‖ sequence_be)`.
pub fn compute_content_hash(
    hasher: &dyn HashFunction,
    previous: Option<&Hash>,
    canonical: &[u8],
    sequence_number: u64,
) -> Hash {
    let previous = previous.unwrap_or(&EMPTY_CHAIN_SENTINEL);
    hasher.digest_many(&[previous, canonical, &sequence_number.to_be_bytes()])
}

/// Replay an issuer's chain (ordered by sequence) and verify linkage and
/// sequencing. Content hashes are taken as stored; recomputation from
/// canonical bytes happens at append time.
pub fn verify_linkage(records: &[IntegrityRecord]) -> Result<(), ChainFault> {
    let mut previous: Option<&IntegrityRecord> = None;
    for (position, record) in records.iter().enumerate() {
        let expected_sequence = position as u64 + 1;
        if record.sequence_number != expected_sequence {
            return Err(ChainFault::SequenceGap {
                position,
                expected: expected_sequence,
                found: record.sequence_number,
            });
        }
        match previous {
            None => {
                if record.previous_hash.is_some() {
                    return Err(ChainFault::DanglingHead);
                }
            }
            Some(prior) => {
                if record.previous_hash != Some(prior.content_hash) {
                    return Err(ChainFault::BrokenLink {
                        sequence: record.sequence_number,
                    });
                }
            }
        }
        previous = Some(record);
    }
    Ok(())
}
