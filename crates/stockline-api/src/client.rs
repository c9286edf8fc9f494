//! # GraphQL Client
//!
//! The one fetch capability everything else is built on.
//!
//! ## The Fetch Seam
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Fetch Boundary                                   │
//! │                                                                         │
//! │  ReportingService ──┐                                                   │
//! │  SessionStore ──────┼──► dyn Fetch ──► GraphqlClient ──► remote API     │
//! │  InventoryService ──┘        │                                          │
//! │                              └───────► test fakes (no network)          │
//! │                                                                         │
//! │  fetch(query, variables) -> Result<data, ApiError>                      │
//! │                                                                         │
//! │  One request, one response, one error. No retry, no backoff, no         │
//! │  caching: a failed fetch is surfaced once and the caller decides        │
//! │  what its fallback is.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `{data, errors}` envelope is unwrapped here: server-reported GraphQL
//! errors are joined into a single human-readable message, and callers only
//! ever see the `data` object.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

// =============================================================================
// Fetch Capability
// =============================================================================

/// Object-safe fetch capability: execute one GraphQL document with
/// variables, get the `data` object back.
///
/// Services hold `Arc<dyn Fetch>` so tests can substitute an in-memory
/// fake for the HTTP client.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, query: &str, variables: Value) -> ApiResult<Value>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// GraphQL-over-HTTP client.
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    bearer_token: Option<String>,
}

impl GraphqlClient {
    /// Creates a client from a validated configuration.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;

        Ok(GraphqlClient {
            http,
            endpoint: config.endpoint.clone(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    /// Replaces the bearer token for subsequent requests (e.g. after login).
    pub fn set_bearer_token(&mut self, token: Option<String>) {
        self.bearer_token = token;
    }
}

#[async_trait]
impl Fetch for GraphqlClient {
    async fn fetch(&self, query: &str, variables: Value) -> ApiResult<Value> {
        debug!(endpoint = %self.endpoint, "Executing GraphQL query");

        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        let envelope: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        unwrap_envelope(envelope)
    }
}

// =============================================================================
// Envelope Handling
// =============================================================================

/// Unwraps a `{data, errors}` GraphQL envelope.
///
/// A non-empty `errors` array wins over any partial `data`: all server
/// messages join into one `ApiError::GraphQl` line.
fn unwrap_envelope(envelope: Value) -> ApiResult<Value> {
    if let Some(errors) = envelope.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let message = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; ");
            let message = if message.is_empty() {
                "Unknown API error".to_string()
            } else {
                message
            };
            return Err(ApiError::GraphQl { message });
        }
    }

    match envelope.get("data") {
        Some(data) if !data.is_null() => Ok(data.clone()),
        _ => Err(ApiError::MissingData("data".into())),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
