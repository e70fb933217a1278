//! # In-Memory Store Adapters
//!
//! Reference implementations of [`RecordStore`] and [`AuditLog`] for unit
//! tests and development. Production hosts back these ports with a
//! durable store; the engine itself never assumes a storage technology.

use crate::domain::errors::StoreError;
use crate::ports::outbound::{AuditLog, RecordStore};
use parking_lot::RwLock;
use shared_types::{IntegrityRecord, InvoiceId, IssuerId, LogAction, LogEntry, LogOutcome};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// In-memory record store: primary map by invoice, secondary index by
/// `(issuer, sequence)` for ordered chain scans.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<InvoiceId, IntegrityRecord>>,
    by_issuer: RwLock<BTreeMap<(IssuerId, u64), InvoiceId>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get(&self, invoice_id: &InvoiceId) -> Result<Option<IntegrityRecord>, StoreError> {
        Ok(self.records.read().get(invoice_id).cloned())
    }

    fn put(&self, record: &IntegrityRecord) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let mut index = self.by_issuer.write();
        index.insert(
            (record.issuer_id.clone(), record.sequence_number),
            record.invoice_id.clone(),
        );
        records.insert(record.invoice_id.clone(), record.clone());
        Ok(())
    }

    fn head(&self, issuer: &IssuerId) -> Result<Option<IntegrityRecord>, StoreError> {
        let index = self.by_issuer.read();
        let records = self.records.read();
        let last = index
            .range((issuer.clone(), 0)..=(issuer.clone(), u64::MAX))
            .next_back();
        match last {
            Some((_, invoice_id)) => {
                let record = records.get(invoice_id).cloned().ok_or(StoreError::Corruption {
                    message: format!("index points at missing record {invoice_id}"),
                })?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn chain(&self, issuer: &IssuerId) -> Result<Vec<IntegrityRecord>, StoreError> {
        let index = self.by_issuer.read();
        let records = self.records.read();
        index
            .range((issuer.clone(), 0)..=(issuer.clone(), u64::MAX))
            .map(|(_, invoice_id)| {
                records.get(invoice_id).cloned().ok_or(StoreError::Corruption {
                    message: format!("index points at missing record {invoice_id}"),
                })
            })
            .collect()
    }

    fn count(&self, issuer: &IssuerId) -> Result<u64, StoreError> {
        let index = self.by_issuer.read();
        Ok(index
            .range((issuer.clone(), 0)..=(issuer.clone(), u64::MAX))
            .count() as u64)
    }
}

/// In-memory append-only audit log.
#[derive(Default)]
pub struct InMemoryAuditLog {
    entries: RwLock<HashMap<InvoiceId, Vec<LogEntry>>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuditLog for InMemoryAuditLog {
    fn append(
        &self,
        invoice_id: &InvoiceId,
        timestamp: u64,
        action: LogAction,
        outcome: LogOutcome,
        detail: String,
    ) -> Result<LogEntry, StoreError> {
        let mut entries = self.entries.write();
        let rows = entries.entry(invoice_id.clone()).or_default();
        let entry = LogEntry {
            entry_id: Uuid::new_v4(),
            invoice_id: invoice_id.clone(),
            sequence: rows.len() as u64,
            timestamp,
            action,
            outcome,
            detail,
        };
        rows.push(entry.clone());
        Ok(entry)
    }

    fn entries(&self, invoice_id: &InvoiceId) -> Result<Vec<LogEntry>, StoreError> {
        Ok(self
            .entries
            .read()
            .get(invoice_id)
            .cloned()
            .unwrap_or_default())
    }
}
