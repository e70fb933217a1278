//! # Core Domain Entities
//!
//! Defines the invoice-integrity entities shared by every Veriledger crate.
//!
//! ## Clusters
//!
//! - **Drafts**: immutable invoice input handed in by the upstream POS
//! - **Integrity**: the chained, tamper-evident record per invoice
//! - **Audit**: append-only compliance log rows

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use uuid::Uuid;

// =============================================================================
// CLUSTER A: VALUE TYPES
// =============================================================================

/// A 32-byte hash (SHA-256 or BLAKE3 depending on configuration).
pub type Hash = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// Sentinel linked by the first record of an issuer's chain.
///
/// Stored records use `previous_hash: None` for the first link; the sentinel
/// only participates in hashing so the first content hash is well-defined.
pub const EMPTY_CHAIN_SENTINEL: Hash = [0u8; 32];

/// Issuer tax identifier (e.g. a NIF). One hash chain exists per issuer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IssuerId(pub String);

impl IssuerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IssuerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable unique invoice identifier. Deduplication key for the whole engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InvoiceId(pub String);

impl InvoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hash algorithm identifier captured in each record at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HashAlgorithm {
    /// SHA-256 (default).
    #[default]
    Sha256,
    /// BLAKE3 (256-bit output).
    Blake3,
}

impl HashAlgorithm {
    /// Stable identifier embedded in records and audit exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha-256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }
}

// =============================================================================
// CLUSTER B: INVOICE DRAFTS (immutable input)
// =============================================================================

/// A party on an invoice (issuer or receiver).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// Tax identifier.
    pub tax_id: String,
    /// Legal name.
    pub name: String,
}

/// One invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// Tax rate as a percentage (e.g. 10.0 for 10%).
    pub tax_rate: f64,
}

impl LineItem {
    /// Taxable amount contributed by this line.
    pub fn base_amount(&self) -> f64 {
        self.quantity * self.unit_price
    }

    /// Tax amount contributed by this line.
    pub fn tax_amount(&self) -> f64 {
        self.base_amount() * self.tax_rate / 100.0
    }
}

/// Computed totals, produced upstream. Validated on ingestion, never
/// recomputed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub taxable_base: f64,
    pub tax_amount: f64,
    pub total: f64,
}

/// A finalized, immutable invoice draft handed in once by the upstream
/// system. The engine never mutates a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Stable unique identifier (deduplication key).
    pub invoice_id: InvoiceId,
    /// Human-facing series + number (e.g. "FA2026/00042").
    pub invoice_number: String,
    /// Issuing party. `issuer.tax_id` selects the hash chain.
    pub issuer: Party,
    /// Receiving party, absent for simplified invoices.
    pub receiver: Option<Party>,
    /// Ordered line items.
    pub lines: Vec<LineItem>,
    /// Upstream-computed totals.
    pub totals: InvoiceTotals,
    /// Issue date, ISO-8601 calendar date (YYYY-MM-DD).
    pub issue_date: String,
    /// Issue instant, Unix seconds.
    pub issued_at: u64,
    /// External reference (order id, table id, ...).
    pub external_reference: Option<String>,
}

impl InvoiceDraft {
    /// Issuer identifier for chain selection.
    pub fn issuer_id(&self) -> IssuerId {
        IssuerId::new(self.issuer.tax_id.clone())
    }
}

// =============================================================================
// CLUSTER C: INTEGRITY RECORDS
// =============================================================================

/// Submission lifecycle state of an integrity record.
///
/// ```text
/// Pending ──sign──▶ Signed ──submit──▶ Accepted | Rejected
///    │                 │
///    └── sign failure  └── network/timeout ──▶ Error ──retry──▶ ...
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordState {
    /// Chained but not yet signed.
    Pending,
    /// Signed (or signing waived by configuration), ready to submit.
    Signed,
    /// Submission dispatched, outcome not yet recorded.
    Submitted,
    /// Authority confirmed. Terminal.
    Accepted,
    /// Authority returned a structured rejection. Terminal.
    Rejected,
    /// Transient failure; retryable until the budget is exhausted.
    Error,
}

impl RecordState {
    /// Terminal states admit no further automatic transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RecordState::Accepted | RecordState::Rejected)
    }
}

/// Authority verdict, set only by terminal submitted outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorityResponse {
    /// Acceptance confirmation code issued by the authority.
    Accepted { confirmation_code: String },
    /// Structured rejection. The record content is never amended;
    /// a corrective invoice forms a new chain link.
    Rejected {
        reason_code: String,
        description: String,
    },
}

/// The tamper-evident record for one invoice. Created once by the chain
/// append, then mutated only through state transitions.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityRecord {
    pub invoice_id: InvoiceId,
    pub issuer_id: IssuerId,
    /// Human-facing series + number, carried for authority submissions.
    pub invoice_number: String,
    /// Monotonic, gapless per issuer, starting at 1.
    pub sequence_number: u64,
    /// H(previous ‖ canonical bytes ‖ sequence).
    pub content_hash: Hash,
    /// Content hash of the preceding record; `None` only for sequence 1.
    pub previous_hash: Option<Hash>,
    /// Present only when signing capability is enabled and succeeded.
    #[serde_as(as = "Option<Bytes>")]
    pub signature: Option<Signature>,
    /// Third-party lookup URL.
    pub verification_url: String,
    /// Scannable rendering of `verification_url` (image bytes).
    pub verification_code: Vec<u8>,
    pub state: RecordState,
    pub authority_response: Option<AuthorityResponse>,
    /// Authority submission attempts so far.
    pub attempts: u32,
    /// Stable token so a retried submission is never double-counted.
    pub idempotency_token: String,
    /// Hash algorithm captured from configuration at creation time.
    pub hash_algorithm: HashAlgorithm,
    /// Unix seconds.
    pub created_at: u64,
    pub updated_at: u64,
}

impl IntegrityRecord {
    /// Hex prefix of the content hash, used in logs and verification URLs.
    pub fn short_hash(&self) -> String {
        hex::encode(&self.content_hash[..8])
    }
}

// =============================================================================
// CLUSTER D: COMPLIANCE LOG
// =============================================================================

/// Action recorded by a compliance log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogAction {
    Generate,
    Sign,
    Submit,
    ReceiveResponse,
}

/// Outcome recorded by a compliance log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogOutcome {
    Success,
    Failure,
}

/// One append-only audit row. Immutable once written, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub entry_id: Uuid,
    pub invoice_id: InvoiceId,
    /// Ordering key within one invoice (0, 1, 2, ...).
    pub sequence: u64,
    /// Unix seconds.
    pub timestamp: u64,
    pub action: LogAction,
    pub outcome: LogOutcome,
    /// Human-readable detail for audit export.
    pub detail: String,
}
