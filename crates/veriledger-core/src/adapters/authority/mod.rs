//! Authority gateway adapters.

#[cfg(feature = "http")]
mod http;
mod mock;

#[cfg(feature = "http")]
pub use http::{HttpAuthorityConfig, HttpAuthorityGateway};
pub use mock::MockAuthorityGateway;
