//! # Outbound Ports (Driven SPI)
//!
//! Dependencies the ledger engine requires the host to provide. The
//! in-memory adapters live in `adapters/`; production hosts back
//! `RecordStore`/`AuditLog` with a durable store and `AuthorityGateway`
//! with the real endpoint client.

use crate::domain::errors::{AuthorityError, EncodeError, StoreError};
use async_trait::async_trait;
use shared_types::{
    Hash, IntegrityRecord, InvoiceId, IssuerId, LogAction, LogEntry, LogOutcome, Signature,
};
use uuid::Uuid;

/// Correlation ID for tracking one submission exchange.
pub type CorrelationId = Uuid;

/// Persistence for integrity records.
///
/// One record per `invoice_id`, secondarily indexed by
/// `(issuer_id, sequence_number)`. `put` is insert-or-update; records are
/// legal artifacts and are never deleted.
pub trait RecordStore: Send + Sync {
    fn get(&self, invoice_id: &InvoiceId) -> Result<Option<IntegrityRecord>, StoreError>;

    fn put(&self, record: &IntegrityRecord) -> Result<(), StoreError>;

    /// Record with the highest sequence number for `issuer`, if any.
    fn head(&self, issuer: &IssuerId) -> Result<Option<IntegrityRecord>, StoreError>;

    /// Full chain for `issuer`, ordered by sequence number.
    fn chain(&self, issuer: &IssuerId) -> Result<Vec<IntegrityRecord>, StoreError>;

    fn count(&self, issuer: &IssuerId) -> Result<u64, StoreError>;
}

/// Append-only compliance log. Rows are write-once: no update or delete
/// operation exists on this interface.
pub trait AuditLog: Send + Sync {
    /// Append one row. The adapter assigns `entry_id` and the
    /// per-invoice `sequence`, and returns the stored row.
    fn append(
        &self,
        invoice_id: &InvoiceId,
        timestamp: u64,
        action: LogAction,
        outcome: LogOutcome,
        detail: String,
    ) -> Result<LogEntry, StoreError>;

    /// Ordered rows for one invoice, replayable for audit export.
    fn entries(&self, invoice_id: &InvoiceId) -> Result<Vec<LogEntry>, StoreError>;
}

/// One submission exchange with the regulatory endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    pub correlation_id: CorrelationId,
    pub invoice_id: InvoiceId,
    pub issuer_tax_id: String,
    pub invoice_number: String,
    pub content_hash: Hash,
    pub previous_hash: Option<Hash>,
    pub signature: Option<Signature>,
    /// Stable across retries of the same chain link so the authority
    /// never double-counts a submission.
    pub idempotency_token: String,
    /// True when operating against the production endpoint.
    pub production: bool,
}

/// Authority verdict for a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorityOutcome {
    Accepted { confirmation_code: String },
    Rejected { reason_code: String, description: String },
}

/// Client for the regulatory endpoint. Transport failures surface as
/// [`AuthorityError`]; a delivered verdict (either way) is `Ok`.
#[async_trait]
pub trait AuthorityGateway: Send + Sync {
    async fn submit(&self, request: SubmissionRequest) -> Result<AuthorityOutcome, AuthorityError>;
}

/// Renders a verification URL as a scannable artifact (image bytes).
/// Must be deterministic.
pub trait CodeEncoder: Send + Sync {
    fn encode(&self, url: &str) -> Result<Vec<u8>, EncodeError>;
}

/// Abstract time for testability.
pub trait TimeSource: Send + Sync {
    /// Unix seconds.
    fn now(&self) -> u64;
}

// Shared handles delegate, so a host can keep a reference to an adapter
// it hands to the service.

impl<T: RecordStore + ?Sized> RecordStore for std::sync::Arc<T> {
    fn get(&self, invoice_id: &InvoiceId) -> Result<Option<IntegrityRecord>, StoreError> {
        (**self).get(invoice_id)
    }

    fn put(&self, record: &IntegrityRecord) -> Result<(), StoreError> {
        (**self).put(record)
    }

    fn head(&self, issuer: &IssuerId) -> Result<Option<IntegrityRecord>, StoreError> {
        (**self).head(issuer)
    }

    fn chain(&self, issuer: &IssuerId) -> Result<Vec<IntegrityRecord>, StoreError> {
        (**self).chain(issuer)
    }

    fn count(&self, issuer: &IssuerId) -> Result<u64, StoreError> {
        (**self).count(issuer)
    }
}

impl<T: AuditLog + ?Sized> AuditLog for std::sync::Arc<T> {
    fn append(
        &self,
        invoice_id: &InvoiceId,
        timestamp: u64,
        action: LogAction,
        outcome: LogOutcome,
        detail: String,
    ) -> Result<LogEntry, StoreError> {
        (**self).append(invoice_id, timestamp, action, outcome, detail)
    }

    fn entries(&self, invoice_id: &InvoiceId) -> Result<Vec<LogEntry>, StoreError> {
        (**self).entries(invoice_id)
    }
}

#[async_trait]
impl<T: AuthorityGateway + ?Sized> AuthorityGateway for std::sync::Arc<T> {
    async fn submit(&self, request: SubmissionRequest) -> Result<AuthorityOutcome, AuthorityError> {
        (**self).submit(request).await
    }
}

impl<T: CodeEncoder + ?Sized> CodeEncoder for std::sync::Arc<T> {
    fn encode(&self, url: &str) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(url)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

/// Default time source using system time.
#[derive(Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}
