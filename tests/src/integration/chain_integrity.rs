//! # Chain Integrity Scenarios
//!
//! Linkage, gapless sequencing and tamper detection across the full
//! service stack.

#[cfg(test)]
mod tests {
    use crate::{draft, harness};
    use shared_types::IssuerId;
    use veriledger_core::{LedgerError, RecordStore as _};

    #[tokio::test]
    async fn test_sequential_submissions_link() {
        let h = harness();
        let a = h.ledger.submit_invoice(draft("inv-a", "E1", 100.0)).await.unwrap();
        let b = h.ledger.submit_invoice(draft("inv-b", "E1", 50.0)).await.unwrap();

        assert_eq!(b.previous_hash, Some(a.content_hash));
        assert_eq!(b.sequence_number, a.sequence_number + 1);
    }

    #[tokio::test]
    async fn test_long_chain_is_gapless_and_replayable() {
        let h = harness();
        let issuer = IssuerId::new("E1");

        for i in 1..=25 {
            h.ledger
                .submit_invoice(draft(&format!("inv-{i}"), "E1", i as f64))
                .await
                .unwrap();
        }

        let chain: Vec<_> = h.ledger.get_chain_for_issuer(&issuer).unwrap().collect();
        assert_eq!(chain.len(), 25);
        for (index, record) in chain.iter().enumerate() {
            assert_eq!(record.sequence_number, index as u64 + 1);
            if index > 0 {
                assert_eq!(
                    record.previous_hash,
                    Some(chain[index - 1].content_hash),
                    "link broken at sequence {}",
                    record.sequence_number
                );
            }
        }
        h.ledger.verify_issuer_chain(&issuer).unwrap();
    }

    #[tokio::test]
    async fn test_first_record_has_no_previous_hash() {
        let h = harness();
        let record = h.ledger.submit_invoice(draft("inv-1", "E1", 10.0)).await.unwrap();
        assert_eq!(record.previous_hash, None);
        assert_eq!(record.sequence_number, 1);
    }

    #[tokio::test]
    async fn test_idempotent_replay_never_extends_the_chain() {
        let h = harness();
        let issuer = IssuerId::new("E1");

        let original = h.ledger.submit_invoice(draft("inv-1", "E1", 42.0)).await.unwrap();
        for _ in 0..5 {
            let replay = h.ledger.submit_invoice(draft("inv-1", "E1", 42.0)).await.unwrap();
            assert_eq!(replay, original);
        }
        assert_eq!(h.store.count(&issuer).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_tampered_mid_chain_record_is_detected_on_replay() {
        let h = harness();
        let issuer = IssuerId::new("E1");

        for i in 1..=5 {
            h.ledger
                .submit_invoice(draft(&format!("inv-{i}"), "E1", i as f64))
                .await
                .unwrap();
        }
        h.ledger.verify_issuer_chain(&issuer).unwrap();

        // Flip one bit in the third record's content hash, behind the
        // engine's back.
        let mut tampered = h
            .store
            .get(&shared_types::InvoiceId::new("inv-3"))
            .unwrap()
            .unwrap();
        tampered.content_hash[0] ^= 0x01;
        h.store.put(&tampered).unwrap();

        let err = h.ledger.verify_issuer_chain(&issuer).unwrap_err();
        assert!(matches!(err, LedgerError::ChainVerification { .. }));
    }

    #[tokio::test]
    async fn test_tampered_head_halts_appends_for_that_issuer_only() {
        let h = harness();

        let head = h.ledger.submit_invoice(draft("inv-1", "E1", 10.0)).await.unwrap();
        let mut tampered = head;
        tampered.content_hash = [0x42; 32];
        h.store.put(&tampered).unwrap();

        let err = h.ledger.submit_invoice(draft("inv-2", "E1", 20.0)).await.unwrap_err();
        assert!(matches!(err, LedgerError::ChainIntegrity { .. }));
        let err = h.ledger.submit_invoice(draft("inv-3", "E1", 30.0)).await.unwrap_err();
        assert!(matches!(err, LedgerError::IssuerHalted { .. }));

        // An unrelated issuer keeps appending.
        h.ledger.submit_invoice(draft("other-1", "E2", 5.0)).await.unwrap();
    }

    #[tokio::test]
    async fn test_operator_resume_reopens_the_chain() {
        let h = harness();
        let issuer = IssuerId::new("E1");

        let head = h.ledger.submit_invoice(draft("inv-1", "E1", 10.0)).await.unwrap();
        let mut tampered = head;
        tampered.content_hash = [0x42; 32];
        h.store.put(&tampered).unwrap();

        assert!(h.ledger.submit_invoice(draft("inv-2", "E1", 20.0)).await.is_err());

        h.ledger.resume_issuer(&issuer).unwrap();
        let next = h.ledger.submit_invoice(draft("inv-2", "E1", 20.0)).await.unwrap();
        assert_eq!(next.previous_hash, Some([0x42; 32]));
        assert_eq!(next.sequence_number, 2);
    }
}
