//! Port traits: the inbound API other modules drive, and the outbound
//! SPI the host wires adapters into.

pub mod inbound;
pub mod outbound;
