//! # stockline-core: Pure Derivation Logic for Stockline
//!
//! This crate is the **heart** of Stockline. It turns raw transactional
//! snapshots fetched from the remote API (daily sales reports, expenses,
//! stock batches, permission records) into derived, read-only view-models:
//! profit rows, rolling trend series, top-product rankings, expense
//! breakdowns, stock statuses and capability answers.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Stockline Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation Layer (TypeScript)                 │   │
//! │  │    Dashboard ──► Reports UI ──► Inventory UI ──► Admin UI       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               stockline-api (remote boundary)                   │   │
//! │  │    GraphQL fetches, fan-out/join, session snapshot              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ stockline-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌──────────┐ │   │
//! │  │  │  dates  │ │  money  │ │  stock  │ │  perms   │ │ reports  │ │   │
//! │  │  │ buckets │ │  folds  │ │ status  │ │ resolve  │ │ profit   │ │   │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └──────────┘ └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - API entity snapshots (DailySalesReport, Expense, etc.)
//! - [`dates`] - ISO date bucketing utilities
//! - [`money`] - Monetary fold helpers (f64 semantics)
//! - [`stock`] - Stock status classifier
//! - [`permissions`] - Role/module capability resolution
//! - [`reports`] - Profit aggregation and rankings
//! - [`error`] - Precondition-violation error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No Clock**: "today" is always an explicit parameter passed by the caller
//! 3. **Missing Data Is Not An Error**: absent reports, categories and
//!    permission records resolve to defined fallbacks (0, "Other", false)
//! 4. **Float Money**: currency amounts are `f64` end to end, exactly as the
//!    remote API reports them; rounding is a presentation concern
//!
//! ## Example Usage
//!
//! ```rust
//! use stockline_core::reports::{day_profit_row, ProfitRow};
//!
//! // No sales report fetched for the day, one 8.00 expense recorded
//! let expenses = vec![stockline_core::types::Expense {
//!     id: "e1".into(),
//!     date: "2024-05-03".into(),
//!     description: None,
//!     amount: 8.0,
//!     payment_method: "CASH".into(),
//!     created_at: "2024-05-03T10:00:00Z".into(),
//!     created_by: None,
//!     category: None,
//! }];
//!
//! let row: ProfitRow = day_profit_row("2024-05-03", None, &expenses);
//! assert_eq!(row.gross_profit, 0.0);
//! assert_eq!(row.net_profit, -8.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dates;
pub mod error;
pub mod money;
pub mod permissions;
pub mod reports;
pub mod stock;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockline_core::ProfitRow` instead of
// `use stockline_core::reports::ProfitRow`

pub use error::{CoreError, CoreResult};
pub use permissions::{Action, PermissionSet};
pub use reports::{ExpenseBucket, ProfitRow, ProfitSummary, TopProduct};
pub use stock::StockStatus;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Near-expiry horizon for the stock classifier, in calendar months.
///
/// ## Business Reason
/// Batches expiring within this window are flagged `NearExpiry` so the shop
/// can discount or rotate them before write-off. Calendar-month addition with
/// end-of-month clamping, not a fixed day count.
///
/// ## Note
/// This horizon and [`DEFAULT_EXPIRY_ALERT_DAYS`] are intentionally separate
/// thresholds: the classifier drives sale-screen gating while the alert feed
/// drives the notification panel, and the two screens ship with different
/// windows. Unifying them is a product decision, not a code one.
pub const NEAR_EXPIRY_MONTHS: u32 = 3;

/// Default day window for the server-side expiry alert feed.
pub const DEFAULT_EXPIRY_ALERT_DAYS: u32 = 30;

/// How many products the "top products" ranking returns.
pub const TOP_PRODUCTS_LIMIT: usize = 10;

/// How many category buckets the expense breakdown returns.
pub const EXPENSE_BREAKDOWN_LIMIT: usize = 7;

/// Module name granted every capability implicitly: users holding this role
/// bypass all per-module permission records.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Fallback bucket label for expenses whose category is absent.
pub const OTHER_CATEGORY_LABEL: &str = "Other";
