//! # Query Contracts
//!
//! The GraphQL documents this client issues, plus typed extraction into
//! core snapshot types. Field names here are the authoritative external
//! contract — they must match the server schema character for character.
//!
//! ## Contract Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Query Contracts                                   │
//! │                                                                         │
//! │  dailySalesReport(date)        → Option<DailySalesReport>  (nullable)   │
//! │  expenses(filter)              → Vec<Expense>                           │
//! │  me()                          → Option<CurrentUser>       (nullable)   │
//! │  myPermissions()               → Vec<UserPermission>                    │
//! │  lowStockBatchAlerts(threshold)→ Vec<LowStockAlert>                     │
//! │  expiryAlerts(days)            → Vec<ExpiryAlert>                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A null `me` or `dailySalesReport` is expected data ("not logged in",
//! "no sales that day") and decodes to `None`; a root field missing
//! entirely is a broken contract and surfaces as `ApiError::MissingData`.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use stockline_core::types::{
    CurrentUser, DailySalesReport, Expense, ExpiryAlert, LowStockAlert, UserPermission,
};

use crate::client::Fetch;
use crate::error::{ApiError, ApiResult};

// =============================================================================
// Query Documents
// =============================================================================

pub const DAILY_SALES_REPORT_QUERY: &str = r#"
query DailySalesReport($date: Date!) {
  dailySalesReport(date: $date) {
    date
    totalSalesAmount
    totalCostAmount
    totalProfitAmount
    items {
      productId
      sku
      productName
      quantitySold
      salesAmount
      costAmount
      profitAmount
    }
  }
}
"#;

pub const EXPENSES_QUERY: &str = r#"
query Expenses($filter: ExpenseFilter) {
  expenses(filter: $filter) {
    id
    date
    description
    amount
    paymentMethod
    createdAt
    createdBy
    category {
      id
      name
      active
    }
  }
}
"#;

pub const ME_QUERY: &str = r#"
query Me {
  me {
    id
    name
    email
    roles
  }
}
"#;

pub const MY_PERMISSIONS_QUERY: &str = r#"
query MyPermissions {
  myPermissions {
    module
    canView
    canCreate
    canEdit
    canDelete
  }
}
"#;

pub const LOW_STOCK_BATCH_ALERTS_QUERY: &str = r#"
query LowStockBatchAlerts($threshold: Int!) {
  lowStockBatchAlerts(threshold: $threshold) {
    batchId
    location
    qtyOnHand
    threshold
  }
}
"#;

pub const EXPIRY_ALERTS_QUERY: &str = r#"
query ExpiryAlerts($days: Int!) {
  expiryAlerts(days: $days) {
    productId
    sku
    productName
    batchId
    batchNumber
    expiryDate
    qtyOnHand
    daysToExpiry
  }
}
"#;

// =============================================================================
// Extraction
// =============================================================================

/// Pulls one root field out of a `data` object and decodes it.
fn field<T: DeserializeOwned>(data: Value, name: &str) -> ApiResult<T> {
    let value = data
        .get(name)
        .cloned()
        .ok_or_else(|| ApiError::MissingData(name.to_string()))?;
    Ok(serde_json::from_value(value)?)
}

// =============================================================================
// Typed Operations
// =============================================================================

/// Fetches the sales report for one calendar date. `None` means no sales
/// were recorded that day.
pub async fn daily_sales_report(fetch: &dyn Fetch, date: &str) -> ApiResult<Option<DailySalesReport>> {
    let data = fetch
        .fetch(DAILY_SALES_REPORT_QUERY, json!({ "date": date }))
        .await?;
    field(data, "dailySalesReport")
}

/// Fetches the expenses recorded exactly on `date`.
pub async fn expenses_on(fetch: &dyn Fetch, date: &str) -> ApiResult<Vec<Expense>> {
    let data = fetch
        .fetch(EXPENSES_QUERY, json!({ "filter": { "date": date } }))
        .await?;
    field(data, "expenses")
}

/// Fetches the expenses recorded in `[from, to]` inclusive with a single
/// ranged query.
pub async fn expenses_between(fetch: &dyn Fetch, from: &str, to: &str) -> ApiResult<Vec<Expense>> {
    let data = fetch
        .fetch(EXPENSES_QUERY, json!({ "filter": { "from": from, "to": to } }))
        .await?;
    field(data, "expenses")
}

/// Fetches the authenticated user. `None` means no valid session.
pub async fn me(fetch: &dyn Fetch) -> ApiResult<Option<CurrentUser>> {
    let data = fetch.fetch(ME_QUERY, json!({})).await?;
    field(data, "me")
}

/// Fetches the per-module permission records of the current user.
pub async fn my_permissions(fetch: &dyn Fetch) -> ApiResult<Vec<UserPermission>> {
    let data = fetch.fetch(MY_PERMISSIONS_QUERY, json!({})).await?;
    field(data, "myPermissions")
}

/// Fetches batches at or below the quantity threshold.
pub async fn low_stock_batch_alerts(fetch: &dyn Fetch, threshold: i64) -> ApiResult<Vec<LowStockAlert>> {
    let data = fetch
        .fetch(LOW_STOCK_BATCH_ALERTS_QUERY, json!({ "threshold": threshold }))
        .await?;
    field(data, "lowStockBatchAlerts")
}

/// Fetches batches expiring within the next `days` days.
pub async fn expiry_alerts(fetch: &dyn Fetch, days: u32) -> ApiResult<Vec<ExpiryAlert>> {
    let data = fetch
        .fetch(EXPIRY_ALERTS_QUERY, json!({ "days": days }))
        .await?;
    field(data, "expiryAlerts")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Fake fetch answering each query document with a canned `data` object.
    struct CannedFetch {
        data: Value,
    }

    #[async_trait]
    impl Fetch for CannedFetch {
        async fn fetch(&self, _query: &str, _variables: Value) -> ApiResult<Value> {
            Ok(self.data.clone())
        }
    }

    #[tokio::test]
    async fn test_daily_sales_report_decodes() {
        let fetch = CannedFetch {
            data: json!({
                "dailySalesReport": {
                    "date": "2024-05-07",
                    "totalSalesAmount": 120.0,
                    "totalCostAmount": 80.0,
                    "totalProfitAmount": 40.0,
                    "items": [{
                        "productId": "p1",
                        "sku": "SKU-1",
                        "productName": "Widget",
                        "quantitySold": 4.0,
                        "salesAmount": 120.0,
                        "costAmount": 80.0,
                        "profitAmount": 40.0
                    }]
                }
            }),
        };

        let report = daily_sales_report(&fetch, "2024-05-07").await.unwrap().unwrap();
        assert_eq!(report.date, "2024-05-07");
        assert_eq!(report.total_profit_amount, 40.0);
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].sku, "SKU-1");
    }

    #[tokio::test]
    async fn test_null_report_is_none_not_error() {
        let fetch = CannedFetch {
            data: json!({ "dailySalesReport": null }),
        };
        let report = daily_sales_report(&fetch, "2024-05-07").await.unwrap();
        assert!(report.is_none());
    }

    #[tokio::test]
    async fn test_missing_root_field_is_contract_break() {
        let fetch = CannedFetch { data: json!({}) };
        let err = daily_sales_report(&fetch, "2024-05-07").await.unwrap_err();
        assert!(matches!(err, ApiError::MissingData(ref f) if f == "dailySalesReport"));
    }

    #[tokio::test]
    async fn test_me_null_means_anonymous() {
        let fetch = CannedFetch { data: json!({ "me": null }) };
        assert!(me(&fetch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_permissions_decode() {
        let fetch = CannedFetch {
            data: json!({
                "myPermissions": [{
                    "module": "SALES",
                    "canView": true,
                    "canCreate": true,
                    "canEdit": false,
                    "canDelete": false
                }]
            }),
        };
        let perms = my_permissions(&fetch).await.unwrap();
        assert_eq!(perms.len(), 1);
        assert_eq!(perms[0].module, "SALES");
        assert!(perms[0].can_create);
    }

    #[tokio::test]
    async fn test_expiry_alerts_decode() {
        let fetch = CannedFetch {
            data: json!({
                "expiryAlerts": [{
                    "productId": "p1",
                    "sku": "SKU-1",
                    "productName": "Yogurt",
                    "batchId": "b1",
                    "batchNumber": "B-100",
                    "expiryDate": "2024-06-01",
                    "qtyOnHand": 12.0,
                    "daysToExpiry": 25
                }]
            }),
        };
        let alerts = expiry_alerts(&fetch, 30).await.unwrap();
        assert_eq!(alerts[0].batch_number, "B-100");
        assert_eq!(alerts[0].days_to_expiry, 25);
    }
}
