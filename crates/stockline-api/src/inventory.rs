//! # Inventory Service
//!
//! Alert-feed passthroughs plus client-side stock classification.
//!
//! The server computes the alert feeds (who is low, who expires soon); the
//! client computes the sale-screen status locally so the two can disagree
//! only in threshold, never in data. The classifier's "today" is supplied
//! by the caller — this service never reads the clock on its own.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use stockline_core::stock::{classify, StockStatus};
use stockline_core::types::{ExpiryAlert, LowStockAlert};

use crate::client::Fetch;
use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::queries;

// =============================================================================
// View-Models
// =============================================================================

/// An expiry alert row joined with its locally derived sale-screen status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStatusRow {
    pub alert: ExpiryAlert,
    pub status: StockStatus,
}

// =============================================================================
// Service
// =============================================================================

/// Thin fetch wrapper for the alert contracts.
pub struct InventoryService {
    fetch: Arc<dyn Fetch>,
    expiry_alert_days: u32,
    low_stock_threshold: i64,
}

impl InventoryService {
    pub fn new(fetch: Arc<dyn Fetch>, config: &ApiConfig) -> Self {
        InventoryService {
            fetch,
            expiry_alert_days: config.expiry_alert_days,
            low_stock_threshold: config.low_stock_threshold,
        }
    }

    /// Batches at or below the configured quantity threshold.
    pub async fn low_stock_alerts(&self) -> ApiResult<Vec<LowStockAlert>> {
        queries::low_stock_batch_alerts(self.fetch.as_ref(), self.low_stock_threshold).await
    }

    /// Batches expiring within the configured day window.
    pub async fn expiry_alerts(&self) -> ApiResult<Vec<ExpiryAlert>> {
        queries::expiry_alerts(self.fetch.as_ref(), self.expiry_alert_days).await
    }

    /// Expiry alerts joined with the local classifier verdict for `today`.
    ///
    /// The feed window (days, server-side) and the near-expiry horizon
    /// (calendar months, client-side) are distinct thresholds, so a row can
    /// legitimately sit in the feed while still classifying `SellAllowed`.
    pub async fn expiring_stock_statuses(&self, today: NaiveDate) -> ApiResult<Vec<BatchStatusRow>> {
        let alerts = self.expiry_alerts().await?;

        Ok(alerts
            .into_iter()
            .map(|alert| {
                let status = classify(alert.qty_on_hand, &alert.expiry_date, today);
                BatchStatusRow { alert, status }
            })
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
