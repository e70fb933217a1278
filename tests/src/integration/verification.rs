//! # Verification Artifact Scenarios
//!
//! The verification URL and its scannable rendering.

#[cfg(test)]
mod tests {
    use crate::{draft, harness};
    use veriledger_core::adapters::QrSvgEncoder;
    use veriledger_core::{build_verification_url, CodeEncoder, LedgerConfig};

    #[tokio::test]
    async fn test_code_bytes_decode_back_to_the_url() {
        // The harness uses the passthrough encoder, whose decoding is the
        // identity function.
        let h = harness();
        let record = h.ledger.submit_invoice(draft("inv-1", "E1", 100.0)).await.unwrap();

        let decoded = std::str::from_utf8(&record.verification_code).unwrap();
        assert_eq!(decoded, record.verification_url);
    }

    #[tokio::test]
    async fn test_url_embeds_invoice_facts() {
        let h = harness();
        let record = h.ledger.submit_invoice(draft("inv-7", "B12345678", 123.45)).await.unwrap();

        let url = &record.verification_url;
        assert!(url.contains("nif=B12345678"));
        assert!(url.contains("fecha=2026-08-06"));
        assert!(url.contains("importe=123.45"));
        assert!(url.contains(&format!("huella={}", record.short_hash())));
    }

    #[test]
    fn test_url_building_is_pure() {
        let config = LedgerConfig::default();
        let d = draft("inv-1", "E1", 10.0);
        let hash = [0x1D; 32];

        let first = build_verification_url(&d, &hash, &config);
        let second = build_verification_url(&d, &hash, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_qr_rendering_is_deterministic_svg() {
        let config = LedgerConfig::default();
        let url = build_verification_url(&draft("inv-1", "E1", 10.0), &[0x1D; 32], &config);

        let encoder = QrSvgEncoder;
        let first = encoder.encode(&url).unwrap();
        let second = encoder.encode(&url).unwrap();
        assert_eq!(first, second);
        assert!(String::from_utf8(first).unwrap().contains("<svg"));
    }

    #[tokio::test]
    async fn test_distinct_invoices_get_distinct_artifacts() {
        let h = harness();
        let a = h.ledger.submit_invoice(draft("inv-a", "E1", 10.0)).await.unwrap();
        let b = h.ledger.submit_invoice(draft("inv-b", "E1", 10.0)).await.unwrap();

        assert_ne!(a.verification_url, b.verification_url);
        assert_ne!(a.verification_code, b.verification_code);
    }
}
