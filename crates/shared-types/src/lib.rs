//! # Shared Types
//!
//! Core entities and value types used across the Veriledger crates.
//!
//! ## Clusters
//!
//! - **Drafts**: `InvoiceDraft`, `LineItem`, `Party`, `InvoiceTotals`
//! - **Integrity**: `IntegrityRecord`, `RecordState`, `AuthorityResponse`
//! - **Audit**: `LogEntry`, `LogAction`, `LogOutcome`

pub mod entities;

pub use entities::{
    AuthorityResponse, Hash, HashAlgorithm, IntegrityRecord, InvoiceDraft, InvoiceId,
    InvoiceTotals, IssuerId, LineItem, LogAction, LogEntry, LogOutcome, Party, RecordState,
    Signature, EMPTY_CHAIN_SENTINEL,
};
