//! Adapter implementations of the outbound ports.

pub mod authority;
pub mod encoder;
pub mod infra;
pub mod store;

pub use authority::MockAuthorityGateway;
#[cfg(feature = "http")]
pub use authority::{HttpAuthorityConfig, HttpAuthorityGateway};
#[cfg(feature = "qr")]
pub use encoder::QrSvgEncoder;
pub use encoder::PassthroughEncoder;
pub use infra::MockTimeSource;
pub use store::{InMemoryAuditLog, InMemoryRecordStore};
