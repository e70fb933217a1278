//! # Veriledger Core
//!
//! Invoice integrity and regulatory submission engine. Every finalized
//! invoice is chained into a tamper-evident, per-issuer hash chain,
//! optionally signed, rendered as a scannable verification code, and
//! driven through a bounded-retry submission state machine against the
//! tax-authority endpoint. Every step leaves an append-only compliance
//! log row.
//!
//! ## Data Flow
//!
//! ```text
//! InvoiceDraft ──▶ Canonicalizer ──▶ Hash Chain ──▶ Signer ──▶ Verification
//!                                   (per-issuer       │            Code
//!                                    critical         ▼
//!                                    section)    Submission State Machine
//!                                                     │
//!                                                     ▼
//!                                           Authority Gateway (I/O)
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Chain Linkage | `previous_hash` of record N equals `content_hash` of record N−1 per issuer |
//! | 2 | Gapless Sequence | Sequence numbers strictly increase by 1 per issuer, starting at 1 |
//! | 3 | Idempotent Append | Re-submitting a known `invoice_id` returns the stored record, never a new link |
//! | 4 | Halt On Break | A broken head link halts appends for that issuer until operator resume |
//! | 5 | Confirmed Acceptance | No record reaches `Accepted` without an authority confirmation code |
//! | 6 | Immutable Rejection | Rejected content is never amended; corrections are new chain links |
//! | 7 | Logged Attempts | Every generate/sign/submit/response attempt writes one log row |
//! | 8 | Lock-Free Submission | Authority I/O never holds the chain-append lock |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Pure logic (canonicalization, chain math, state machine)
//! - `ports/` - Port traits (inbound API, outbound SPI)
//! - `service/` - Application service implementing the API
//! - `adapters/` - In-memory store, mock/HTTP authority, QR encoder
//!
//! ## Usage
//!
//! ```ignore
//! use veriledger_core::{LedgerConfig, LedgerDependencies, LedgerService};
//!
//! let service = LedgerService::new(deps, LedgerConfig::default());
//! let record = service.submit_invoice(draft).await?;
//! assert_eq!(record.sequence_number, 1);
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use domain::canonical::canonicalize;
pub use domain::chain::{compute_content_hash, verify_linkage, ChainFault};
pub use domain::config::{LedgerConfig, OperatingMode, RetryPolicy, SoftwareInfo};
pub use domain::errors::{AuthorityError, EncodeError, LedgerError, StoreError};
pub use domain::submission::{next_state, SubmissionEvent};
pub use domain::verification::build_verification_url;
pub use ports::inbound::{InvoiceLedgerApi, IssuerStatistics};
pub use ports::outbound::{
    AuditLog, AuthorityGateway, AuthorityOutcome, CodeEncoder, RecordStore, SubmissionRequest,
    SystemTimeSource, TimeSource,
};
pub use service::{LedgerDependencies, LedgerService};
