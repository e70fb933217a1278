//! # QR Code Encoder
//!
//! Renders a verification URL as an SVG QR code. Deterministic: the same
//! URL always produces identical bytes.

use crate::domain::errors::EncodeError;
use crate::ports::outbound::CodeEncoder;
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

/// QR renderer producing SVG image bytes.
#[derive(Default, Clone, Copy)]
pub struct QrSvgEncoder;

impl CodeEncoder for QrSvgEncoder {
    fn encode(&self, url: &str) -> Result<Vec<u8>, EncodeError> {
        let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::M).map_err(|e| {
            EncodeError::Unencodable {
                reason: e.to_string(),
            }
        })?;
        let image = code
            .render()
            .min_dimensions(240, 240)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build();
        Ok(image.into_bytes())
    }
}
