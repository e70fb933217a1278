//! # HTTP Authority Gateway
//!
//! JSON-over-HTTP client for the configured regulatory endpoint.
//! Transport failures and timeouts map to retryable [`AuthorityError`]s;
//! a delivered verdict (acceptance or structured rejection) is `Ok`.

use crate::domain::errors::AuthorityError;
use crate::ports::outbound::{AuthorityGateway, AuthorityOutcome, SubmissionRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoint configuration.
#[derive(Debug, Clone)]
pub struct HttpAuthorityConfig {
    pub endpoint_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpAuthorityConfig {
    fn default() -> Self {
        Self {
            endpoint_url: "https://authority.example/submissions".to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Wire payload for one submission.
#[derive(Debug, Serialize)]
struct SubmitPayload {
    correlation_id: String,
    invoice_id: String,
    issuer_tax_id: String,
    invoice_number: String,
    content_hash: String,
    previous_hash: Option<String>,
    signature: Option<String>,
    idempotency_token: String,
    production: bool,
}

/// Wire response from the endpoint.
#[derive(Debug, Deserialize)]
struct SubmitResponse {
    status: String,
    confirmation_code: Option<String>,
    reason_code: Option<String>,
    description: Option<String>,
}

/// HTTP client for the regulatory endpoint.
pub struct HttpAuthorityGateway {
    client: Client,
    config: HttpAuthorityConfig,
}

impl HttpAuthorityGateway {
    pub fn new(config: HttpAuthorityConfig) -> Result<Self, AuthorityError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| AuthorityError::Network {
                reason: e.to_string(),
            })?;
        Ok(Self { client, config })
    }

    fn payload(request: &SubmissionRequest) -> SubmitPayload {
        SubmitPayload {
            correlation_id: request.correlation_id.to_string(),
            invoice_id: request.invoice_id.to_string(),
            issuer_tax_id: request.issuer_tax_id.clone(),
            invoice_number: request.invoice_number.clone(),
            content_hash: hex::encode(request.content_hash),
            previous_hash: request.previous_hash.map(hex::encode),
            signature: request.signature.map(hex::encode),
            idempotency_token: request.idempotency_token.clone(),
            production: request.production,
        }
    }
}

#[async_trait]
impl AuthorityGateway for HttpAuthorityGateway {
    async fn submit(&self, request: SubmissionRequest) -> Result<AuthorityOutcome, AuthorityError> {
        let payload = Self::payload(&request);

        let response = self
            .client
            .post(&self.config.endpoint_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AuthorityError::Timeout {
                        seconds: self.config.request_timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    AuthorityError::Network {
                        reason: format!("cannot connect to {}", self.config.endpoint_url),
                    }
                } else {
                    AuthorityError::Network {
                        reason: e.to_string(),
                    }
                }
            })?;

        // 5xx means the authority itself is degraded: retryable.
        if response.status().is_server_error() {
            return Err(AuthorityError::Network {
                reason: format!("authority returned {}", response.status()),
            });
        }

        let body: SubmitResponse = response.json().await.map_err(|e| AuthorityError::Network {
            reason: format!("unparseable authority response: {e}"),
        })?;

        match body.status.as_str() {
            "accepted" => Ok(AuthorityOutcome::Accepted {
                confirmation_code: body.confirmation_code.unwrap_or_default(),
            }),
            "rejected" => Ok(AuthorityOutcome::Rejected {
                reason_code: body.reason_code.unwrap_or_else(|| "unknown".to_string()),
                description: body.description.unwrap_or_default(),
            }),
            other => Err(AuthorityError::Network {
                reason: format!("unknown authority status {other:?}"),
            }),
        }
    }
}
