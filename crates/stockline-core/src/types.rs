//! # API Entity Snapshots
//!
//! Immutable snapshots of entities fetched from the remote API. This crate
//! never persists or mutates them — it only derives new read-only
//! view-models from them.
//!
//! ## Wire Surface
//! Field names serialize in camelCase because the remote GraphQL schema is
//! the authoritative contract (`dailySalesReport`, `myPermissions`, …). The
//! same structs are exported to TypeScript for the presentation layer, so
//! the three surfaces (server, this crate, UI) can never drift apart.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Snapshot Types                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │ DailySalesReport │  │     Expense      │  │    StockBatch        │  │
//! │  │  ──────────────  │  │  ──────────────  │  │  ──────────────────  │  │
//! │  │  date (ISO)      │  │  date (ISO)      │  │  batch_id            │  │
//! │  │  total amounts   │  │  amount          │  │  expiry_date (ISO)   │  │
//! │  │  items[]         │  │  category?       │  │  qty_on_hand         │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │   CurrentUser    │  │  UserPermission  │  │  LowStockAlert /     │  │
//! │  │  roles[]         │  │  module + 4 caps │  │  ExpiryAlert         │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dates And Money
//! Calendar dates travel as ISO `YYYY-MM-DD` strings exactly as received;
//! parsing (with the epoch fallback for malformed input) happens at the one
//! site that needs a real date, never during deserialization. Currency
//! amounts are `f64`, matching the float semantics of the source system.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// User & Permissions
// =============================================================================

/// The authenticated user, as returned by the `me` query.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CurrentUser {
    /// Server-issued opaque identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Login email.
    pub email: String,

    /// Role names attached to this user. Presence of "ADMIN" grants every
    /// capability on every module.
    pub roles: Vec<String>,
}

/// One per-module capability record, as returned by `myPermissions`.
///
/// Module names are uppercase by server convention, but consumers must not
/// rely on that: resolution re-normalizes on every comparison.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserPermission {
    /// Functional area this record governs (e.g. "SALES", "INVENTORY").
    pub module: String,

    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

// =============================================================================
// Sales Reports
// =============================================================================

/// One product line inside a daily sales report.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailySalesReportItem {
    pub product_id: String,
    pub sku: String,
    pub product_name: String,

    /// Units sold that day. Non-negative in well-formed data.
    pub quantity_sold: f64,

    pub sales_amount: f64,
    pub cost_amount: f64,

    /// Sales minus cost for this line. Signed: loss-making lines are negative.
    pub profit_amount: f64,
}

/// Per-day sales report, as returned by `dailySalesReport(date)`.
///
/// One per calendar date; never cached — callers re-fetch per query.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailySalesReport {
    /// ISO calendar date this report covers.
    pub date: String,

    pub total_sales_amount: f64,
    pub total_cost_amount: f64,

    /// Gross profit for the day (sales minus cost of goods).
    pub total_profit_amount: f64,

    /// Per-product lines, in server order.
    pub items: Vec<DailySalesReportItem>,
}

// =============================================================================
// Expenses
// =============================================================================

/// An expense category reference.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExpenseCategory {
    pub id: String,
    pub name: String,
    pub active: bool,
}

/// A recorded operating expense.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Expense {
    pub id: String,

    /// ISO calendar date the expense applies to (not the creation instant).
    pub date: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Non-negative currency amount.
    pub amount: f64,

    pub payment_method: String,

    /// Creation timestamp (RFC 3339), informational only.
    pub created_at: String,

    #[serde(default)]
    pub created_by: Option<String>,

    /// Absent category buckets under the "Other" label in breakdowns.
    #[serde(default)]
    pub category: Option<ExpenseCategory>,
}

// =============================================================================
// Inventory
// =============================================================================

/// An on-hand stock batch at a location.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockBatch {
    pub batch_id: String,
    pub location: String,

    /// ISO expiry date. Malformed values classify as epoch (see
    /// [`crate::stock`]) — source data is not defensively scrubbed.
    pub expiry_date: String,

    /// On-hand quantity. May be negative in source data; not clamped here.
    pub qty_on_hand: f64,
}

/// A low-stock alert row, as returned by `lowStockBatchAlerts(threshold)`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LowStockAlert {
    pub batch_id: String,
    pub location: String,
    pub qty_on_hand: f64,
    pub threshold: i64,
}

/// An expiry alert row, as returned by `expiryAlerts(days)`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExpiryAlert {
    pub product_id: String,
    pub sku: String,
    pub product_name: String,
    pub batch_id: String,
    pub batch_number: String,
    pub expiry_date: String,
    pub qty_on_hand: f64,

    /// Days until expiry as computed by the server. Negative when already
    /// expired.
    pub days_to_expiry: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_wire_names() {
        let json = r#"{
            "module": "SALES",
            "canView": true,
            "canCreate": false,
            "canEdit": false,
            "canDelete": false
        }"#;
        let perm: UserPermission = serde_json::from_str(json).unwrap();
        assert_eq!(perm.module, "SALES");
        assert!(perm.can_view);
        assert!(!perm.can_delete);
    }

    #[test]
    fn test_expense_optional_fields_default() {
        let json = r#"{
            "id": "e1",
            "date": "2024-05-03",
            "amount": 8.0,
            "paymentMethod": "CASH",
            "createdAt": "2024-05-03T10:00:00Z"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert!(expense.description.is_none());
        assert!(expense.category.is_none());
        assert!(expense.created_by.is_none());
    }
}
