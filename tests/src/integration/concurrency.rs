//! # Concurrency Scenarios
//!
//! Chain appends are serialized per issuer; issuers proceed in parallel.

#[cfg(test)]
mod tests {
    use crate::{draft, harness};
    use shared_types::IssuerId;
    use std::collections::HashSet;
    use veriledger_core::RecordStore as _;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_for_one_issuer() {
        let h = harness();
        let n = 16;

        let mut handles = Vec::new();
        for i in 0..n {
            let ledger = h.ledger.clone();
            handles.push(tokio::spawn(async move {
                ledger
                    .submit_invoice(draft(&format!("inv-{i}"), "E1", (i + 1) as f64))
                    .await
            }));
        }

        let mut sequences = HashSet::new();
        for handle in handles {
            let record = handle.await.unwrap().unwrap();
            assert!(
                sequences.insert(record.sequence_number),
                "duplicate sequence {}",
                record.sequence_number
            );
        }

        let issuer = IssuerId::new("E1");
        assert_eq!(sequences.len(), n);
        assert_eq!(h.store.count(&issuer).unwrap(), n as u64);
        assert_eq!(
            *sequences.iter().max().unwrap(),
            n as u64,
            "sequences must be gapless up to {n}"
        );
        h.ledger.verify_issuer_chain(&issuer).unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_issuers_do_not_interfere() {
        let h = harness();
        let issuers = ["E1", "E2", "E3", "E4"];
        let per_issuer = 6;

        let mut handles = Vec::new();
        for issuer in issuers {
            for i in 0..per_issuer {
                let ledger = h.ledger.clone();
                handles.push(tokio::spawn(async move {
                    ledger
                        .submit_invoice(draft(&format!("{issuer}-inv-{i}"), issuer, 9.99))
                        .await
                }));
            }
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        for issuer in issuers {
            let issuer = IssuerId::new(issuer);
            assert_eq!(h.store.count(&issuer).unwrap(), per_issuer as u64);
            h.ledger.verify_issuer_chain(&issuer).unwrap();
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_replay_of_same_invoice_creates_one_link() {
        let h = harness();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let ledger = h.ledger.clone();
            handles.push(tokio::spawn(async move {
                ledger.submit_invoice(draft("inv-1", "E1", 100.0)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(h.store.count(&IssuerId::new("E1")).unwrap(), 1);
    }
}
