//! Record store and audit log adapters.

mod memory;

pub use memory::{InMemoryAuditLog, InMemoryRecordStore};
