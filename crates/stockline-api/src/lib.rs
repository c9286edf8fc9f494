//! # stockline-api: Remote API Boundary for Stockline
//!
//! This crate owns every interaction with the remote GraphQL API and the
//! one piece of shared mutable state (the session snapshot). All derivation
//! logic lives in `stockline-core`; this crate fetches, joins and delegates.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      API Boundary Architecture                          │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ReportingService│  │  SessionStore  │  │   InventoryService     │    │
//! │  │                │  │                │  │                        │    │
//! │  │ day/month/year │  │ me() + perms   │  │ low-stock & expiry     │    │
//! │  │ fan-out/join,  │  │ snapshot with  │  │ feeds + local stock    │    │
//! │  │ ordered by day │  │ wholesale swap │  │ classification         │    │
//! │  └───────┬────────┘  └───────┬────────┘  └───────────┬────────────┘    │
//! │          │                   │                       │                 │
//! │          └───────────────────┼───────────────────────┘                 │
//! │                              ▼                                         │
//! │                     ┌─────────────────┐                                │
//! │                     │   dyn Fetch     │  one capability:               │
//! │                     │ (GraphqlClient) │  fetch(query, variables)       │
//! │                     └────────┬────────┘                                │
//! │                              │ HTTPS POST {query, variables}           │
//! │                              ▼                                         │
//! │                     Remote GraphQL API                                 │
//! │                                                                        │
//! │  FAILURE DOCTRINE:                                                     │
//! │  • One fetch, one error, surfaced once — never retried                 │
//! │  • Session loads fail CLOSED (empty snapshot)                          │
//! │  • Fan-out days fail SOFT (day reads as "no report")                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - The `Fetch` capability and its HTTP implementation
//! - [`config`] - Endpoint, timeouts, fan-out bound, alert thresholds
//! - [`error`] - API error types
//! - [`inventory`] - Alert feeds + stock classification
//! - [`queries`] - GraphQL documents and typed extraction
//! - [`reporting`] - Profit dashboard fetch composition
//! - [`session`] - User/permission snapshot with atomic replace
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stockline_api::{ApiConfig, GraphqlClient, ReportingService, SessionStore};
//!
//! let config = ApiConfig::load_or_default(None);
//! let client: Arc<dyn stockline_api::Fetch> = Arc::new(GraphqlClient::new(&config)?);
//!
//! let session = SessionStore::new(client.clone());
//! session.load().await;
//!
//! if session.can_view("REPORTS").await {
//!     let reporting = ReportingService::new(client.clone(), &config);
//!     let week = reporting.week_series("2024-05-07").await?;
//!     println!("7-day net: {}", week.iter().map(|r| r.net_profit).sum::<f64>());
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod inventory;
pub mod queries;
pub mod reporting;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{Fetch, GraphqlClient};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use inventory::{BatchStatusRow, InventoryService};
pub use reporting::ReportingService;
pub use session::{SessionSnapshot, SessionStore};
