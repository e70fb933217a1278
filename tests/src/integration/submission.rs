//! # Submission Scenarios
//!
//! Authority flows end to end: retry budgets, terminal rejections,
//! idempotency tokens and the compliance trail.

#[cfg(test)]
mod tests {
    use crate::{draft, fast_config, harness, harness_with, init_tracing};
    use shared_types::{AuthorityResponse, LogAction, LogOutcome, RecordState};
    use veriledger_core::adapters::MockAuthorityGateway;
    use veriledger_core::{AuthorityError, AuthorityOutcome};

    #[tokio::test]
    async fn test_accept_flow_records_confirmation() {
        init_tracing();
        let h = harness();
        let record = h.ledger.submit_invoice(draft("inv-1", "E1", 100.0)).await.unwrap();

        assert_eq!(record.state, RecordState::Accepted);
        match &record.authority_response {
            Some(AuthorityResponse::Accepted { confirmation_code }) => {
                assert!(!confirmation_code.is_empty());
            }
            other => panic!("expected acceptance, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_three_timeouts_then_acceptance() {
        let authority = MockAuthorityGateway::with_script(vec![
            Err(AuthorityError::Timeout { seconds: 30 }),
            Err(AuthorityError::Timeout { seconds: 30 }),
            Err(AuthorityError::Timeout { seconds: 30 }),
        ]);
        let h = harness_with(authority, fast_config());
        let record = h.ledger.submit_invoice(draft("inv-1", "E1", 100.0)).await.unwrap();

        assert_eq!(record.state, RecordState::Accepted);
        assert_eq!(record.attempts, 4);

        let submit_rows: Vec<_> = h
            .ledger
            .get_logs(&record.invoice_id)
            .unwrap()
            .filter(|e| e.action == LogAction::Submit)
            .collect();
        assert_eq!(submit_rows.len(), 4);
        assert_eq!(
            submit_rows.iter().filter(|e| e.outcome == LogOutcome::Failure).count(),
            3
        );
    }

    #[tokio::test]
    async fn test_idempotency_token_is_stable_across_retries() {
        let authority = MockAuthorityGateway::with_script(vec![
            Err(AuthorityError::Network {
                reason: "connection reset".to_string(),
            }),
            Err(AuthorityError::Timeout { seconds: 30 }),
        ]);
        let h = harness_with(authority, fast_config());
        let record = h.ledger.submit_invoice(draft("inv-1", "E1", 100.0)).await.unwrap();
        assert_eq!(record.state, RecordState::Accepted);

        let requests = h.authority.received();
        assert_eq!(requests.len(), 3);
        assert!(requests
            .iter()
            .all(|r| r.idempotency_token == requests[0].idempotency_token));
        // Correlation ids are fresh per exchange.
        assert_ne!(requests[0].correlation_id, requests[1].correlation_id);
    }

    #[tokio::test]
    async fn test_rejection_requires_corrective_invoice() {
        let authority = MockAuthorityGateway::with_script(vec![Ok(AuthorityOutcome::Rejected {
            reason_code: "R-4102".to_string(),
            description: "receiver tax id unknown".to_string(),
        })]);
        let h = harness_with(authority, fast_config());

        let rejected = h.ledger.submit_invoice(draft("inv-1", "E1", 100.0)).await.unwrap();
        assert_eq!(rejected.state, RecordState::Rejected);

        let response_rows: Vec<_> = h
            .ledger
            .get_logs(&rejected.invoice_id)
            .unwrap()
            .filter(|e| e.action == LogAction::ReceiveResponse)
            .collect();
        assert_eq!(response_rows.len(), 1);
        assert_eq!(response_rows[0].outcome, LogOutcome::Failure);
        assert!(response_rows[0].detail.contains("R-4102"));

        let corrective = h.ledger.submit_invoice(draft("inv-1R", "E1", 100.0)).await.unwrap();
        assert_eq!(corrective.state, RecordState::Accepted);
        assert_eq!(corrective.previous_hash, Some(rejected.content_hash));
    }

    #[tokio::test]
    async fn test_exhausted_budget_surfaces_error_and_resumes() {
        let mut config = fast_config();
        config.retry.max_attempts = 2;
        let authority = MockAuthorityGateway::with_script(vec![
            Err(AuthorityError::Timeout { seconds: 30 }),
            Err(AuthorityError::Timeout { seconds: 30 }),
            Err(AuthorityError::Timeout { seconds: 30 }),
        ]);
        let h = harness_with(authority, config);

        let record = h.ledger.submit_invoice(draft("inv-1", "E1", 100.0)).await.unwrap();
        assert_eq!(record.state, RecordState::Error);
        assert_eq!(record.attempts, 2);

        // First manual resume burns the last scripted timeout, then the
        // authority accepts.
        let resumed = h.ledger.retry_submission(&record.invoice_id).await.unwrap();
        assert_eq!(resumed.state, RecordState::Accepted);
        assert_eq!(resumed.attempts, 4);
    }

    #[tokio::test]
    async fn test_statistics_reflect_outcomes() {
        let authority = MockAuthorityGateway::with_script(vec![
            Ok(AuthorityOutcome::Rejected {
                reason_code: "R1".to_string(),
                description: "bad".to_string(),
            }),
            Err(AuthorityError::Timeout { seconds: 30 }),
            Err(AuthorityError::Timeout { seconds: 30 }),
            Err(AuthorityError::Timeout { seconds: 30 }),
            Err(AuthorityError::Timeout { seconds: 30 }),
            Err(AuthorityError::Timeout { seconds: 30 }),
        ]);
        let mut config = fast_config();
        config.retry.max_attempts = 5;
        let h = harness_with(authority, config);
        let issuer = shared_types::IssuerId::new("E1");

        // First invoice: rejected. Second: exhausts the 5 remaining
        // timeouts and lands in Error. Third: accepted.
        h.ledger.submit_invoice(draft("inv-1", "E1", 10.0)).await.unwrap();
        h.ledger.submit_invoice(draft("inv-2", "E1", 20.0)).await.unwrap();
        h.ledger.submit_invoice(draft("inv-3", "E1", 30.0)).await.unwrap();

        let stats = h.ledger.get_statistics(&issuer).unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.error, 1);
        assert_eq!(stats.accepted, 1);
    }

    #[tokio::test]
    async fn test_production_mode_submits_signed_records() {
        use std::sync::Arc;
        use veriledger_core::adapters::{
            InMemoryAuditLog, InMemoryRecordStore, MockTimeSource, PassthroughEncoder,
        };
        use veriledger_core::{LedgerDependencies, LedgerService, OperatingMode};
        use veriledger_crypto::{Ed25519KeyPair, Ed25519Signer};

        let seed = [0x33; 32];
        let authority = Arc::new(MockAuthorityGateway::accepting());
        let mut config = fast_config();
        config.mode = OperatingMode::Production;
        config.signing_mandatory = true;

        let ledger = LedgerService::new(
            LedgerDependencies {
                store: Arc::new(InMemoryRecordStore::new()),
                audit: Arc::new(InMemoryAuditLog::new()),
                authority: authority.clone(),
                signer: Ed25519Signer::new(Ed25519KeyPair::from_seed(seed), "pos-1"),
                encoder: PassthroughEncoder,
                time_source: MockTimeSource::new(1_700_000_000),
            },
            config,
        );

        let record = ledger.submit_invoice(draft("inv-1", "E1", 100.0)).await.unwrap();
        assert_eq!(record.state, RecordState::Accepted);

        let signature = record.signature.expect("production records are signed");
        Ed25519KeyPair::from_seed(seed)
            .verify(&record.content_hash, &signature)
            .unwrap();

        let requests = authority.received();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].production);
        assert_eq!(requests[0].signature, Some(signature));
    }

    #[tokio::test]
    async fn test_audit_export_is_replayable_json() {
        let h = harness();
        let record = h.ledger.submit_invoice(draft("inv-1", "E1", 100.0)).await.unwrap();

        let export = h.ledger.export_audit_json(&record.invoice_id).unwrap();
        let rows: Vec<serde_json::Value> = export
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(rows.len(), 4);
        let actions: Vec<&str> = rows.iter().map(|r| r["action"].as_str().unwrap()).collect();
        assert_eq!(actions, vec!["Generate", "Sign", "Submit", "ReceiveResponse"]);
        // Sequences within the invoice are dense and ordered.
        let sequences: Vec<u64> = rows.iter().map(|r| r["sequence"].as_u64().unwrap()).collect();
        assert_eq!(sequences, vec![0, 1, 2, 3]);
    }
}
