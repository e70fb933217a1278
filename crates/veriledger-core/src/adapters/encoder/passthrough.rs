//! # Passthrough Encoder
//!
//! Test encoder whose output is the URL bytes themselves, so decoding is
//! the identity function. Lets tests assert the round-trip property
//! without a scanner.

use crate::domain::errors::EncodeError;
use crate::ports::outbound::CodeEncoder;

#[derive(Default, Clone, Copy)]
pub struct PassthroughEncoder;

impl CodeEncoder for PassthroughEncoder {
    fn encode(&self, url: &str) -> Result<Vec<u8>, EncodeError> {
        Ok(url.as_bytes().to_vec())
    }
}
