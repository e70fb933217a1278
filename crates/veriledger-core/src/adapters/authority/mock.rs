//! # Mock Authority Gateway
//!
//! Scriptable gateway for tests and development: either replays a fixed
//! script of outcomes, or accepts everything with generated confirmation
//! codes. Records every request it receives so tests can assert on
//! idempotency tokens and payload stability.

use crate::domain::errors::AuthorityError;
use crate::ports::outbound::{AuthorityGateway, AuthorityOutcome, SubmissionRequest};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Scriptable in-memory authority.
#[derive(Default)]
pub struct MockAuthorityGateway {
    script: Mutex<VecDeque<Result<AuthorityOutcome, AuthorityError>>>,
    requests: Mutex<Vec<SubmissionRequest>>,
}

impl MockAuthorityGateway {
    /// Gateway that accepts every submission.
    pub fn accepting() -> Self {
        Self::default()
    }

    /// Gateway that replays `outcomes` in order, then accepts.
    pub fn with_script(outcomes: Vec<Result<AuthorityOutcome, AuthorityError>>) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, in order.
    pub fn received(&self) -> Vec<SubmissionRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl AuthorityGateway for MockAuthorityGateway {
    async fn submit(&self, request: SubmissionRequest) -> Result<AuthorityOutcome, AuthorityError> {
        let scripted = self.script.lock().pop_front();
        let invoice_id = request.invoice_id.clone();
        self.requests.lock().push(request);

        match scripted {
            Some(outcome) => outcome,
            None => Ok(AuthorityOutcome::Accepted {
                confirmation_code: format!("OK-{invoice_id}"),
            }),
        }
    }
}
