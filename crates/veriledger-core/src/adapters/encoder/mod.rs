//! Verification code encoder adapters.

mod passthrough;
#[cfg(feature = "qr")]
mod qr;

pub use passthrough::PassthroughEncoder;
#[cfg(feature = "qr")]
pub use qr::QrSvgEncoder;
