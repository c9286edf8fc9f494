//! # Stock Status Classifier
//!
//! Derives a sale-screen status for a stock batch from its on-hand quantity
//! and expiry date relative to an explicit "today".
//!
//! ## Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Classification Order                                │
//! │                                                                         │
//! │  qty_on_hand <= 0 ──────────────────────────────► OutOfStock            │
//! │        │ else                                                           │
//! │        ▼                                                                │
//! │  expiry < today ────────────────────────────────► Expired               │
//! │        │ else                                                           │
//! │        ▼                                                                │
//! │  expiry <= today + 3 calendar months ───────────► NearExpiry            │
//! │        │ else                                                           │
//! │        ▼                                                                │
//! │                                                    SellAllowed          │
//! │                                                                         │
//! │  The quantity check dominates: an expired batch with zero stock is      │
//! │  OutOfStock, not Expired.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Malformed Expiry Dates
//! An unparsable expiry date classifies as the epoch (1970-01-01), which
//! yields `Expired` for any positive stock. That is the source system's
//! behavior for dirty batch data, reproduced deliberately: a batch whose
//! expiry cannot be read must never be sellable.
//!
//! The 3-month horizon is calendar-month addition with end-of-month
//! clamping (Jan 31 → Apr 30), not a fixed 90-day window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dates::{add_months, parse_iso_or_epoch};
use crate::types::StockBatch;
use crate::NEAR_EXPIRY_MONTHS;

// =============================================================================
// Status
// =============================================================================

/// Sale-screen status of a stock batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StockStatus {
    /// Nothing on hand (zero or negative quantity).
    OutOfStock,
    /// Expiry date is strictly before today.
    Expired,
    /// Expires within the near-expiry horizon.
    NearExpiry,
    /// In stock and comfortably inside its shelf life.
    SellAllowed,
}

impl StockStatus {
    /// Whether this status permits the batch to appear on the sale screen.
    pub fn is_sellable(&self) -> bool {
        matches!(self, StockStatus::NearExpiry | StockStatus::SellAllowed)
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::OutOfStock => write!(f, "out of stock"),
            StockStatus::Expired => write!(f, "expired"),
            StockStatus::NearExpiry => write!(f, "near expiry"),
            StockStatus::SellAllowed => write!(f, "sell allowed"),
        }
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Classifies a batch from its raw fields.
///
/// `today` is the caller's wall-clock date truncated to a calendar day; this
/// crate never reads the clock itself.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use stockline_core::stock::{classify, StockStatus};
///
/// let today = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();
/// assert_eq!(classify(0.0, "2030-01-01", today), StockStatus::OutOfStock);
/// assert_eq!(classify(5.0, "2024-05-06", today), StockStatus::Expired);
/// assert_eq!(classify(5.0, "2024-07-07", today), StockStatus::NearExpiry);
/// assert_eq!(classify(5.0, "2024-09-08", today), StockStatus::SellAllowed);
/// ```
pub fn classify(qty_on_hand: f64, expiry_date_iso: &str, today: NaiveDate) -> StockStatus {
    if qty_on_hand <= 0.0 {
        return StockStatus::OutOfStock;
    }

    let expiry = parse_iso_or_epoch(expiry_date_iso);
    if expiry < today {
        return StockStatus::Expired;
    }

    let horizon = add_months(today, NEAR_EXPIRY_MONTHS);
    if expiry <= horizon {
        return StockStatus::NearExpiry;
    }

    StockStatus::SellAllowed
}

/// Classifies a [`StockBatch`] snapshot.
pub fn classify_batch(batch: &StockBatch, today: NaiveDate) -> StockStatus {
    classify(batch.qty_on_hand, &batch.expiry_date, today)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::{add_days_iso, to_iso_date};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 7).unwrap()
    }

    #[test]
    fn test_zero_stock_dominates_expiry() {
        // Long-dated, zero stock
        assert_eq!(classify(0.0, "2030-01-01", today()), StockStatus::OutOfStock);
        // Already expired AND zero stock: quantity check wins
        assert_eq!(classify(0.0, "2020-01-01", today()), StockStatus::OutOfStock);
        // Negative source quantity is still out of stock
        assert_eq!(classify(-2.0, "2030-01-01", today()), StockStatus::OutOfStock);
    }

    #[test]
    fn test_expired_yesterday() {
        let yesterday = add_days_iso(&to_iso_date(today()), -1);
        assert_eq!(classify(5.0, &yesterday, today()), StockStatus::Expired);
    }

    #[test]
    fn test_expiring_today_is_near_expiry() {
        // Not strictly before today, but inside the horizon
        let iso = to_iso_date(today());
        assert_eq!(classify(5.0, &iso, today()), StockStatus::NearExpiry);
    }

    #[test]
    fn test_two_months_out_is_near_expiry() {
        let expiry = to_iso_date(add_months(today(), 2));
        assert_eq!(classify(5.0, &expiry, today()), StockStatus::NearExpiry);
    }

    #[test]
    fn test_exact_horizon_is_near_expiry() {
        // Boundary is inclusive
        let expiry = to_iso_date(add_months(today(), NEAR_EXPIRY_MONTHS));
        assert_eq!(classify(5.0, &expiry, today()), StockStatus::NearExpiry);
    }

    #[test]
    fn test_four_months_out_is_sell_allowed() {
        let expiry = to_iso_date(add_months(today(), 4));
        assert_eq!(classify(5.0, &expiry, today()), StockStatus::SellAllowed);
    }

    #[test]
    fn test_unparsable_expiry_classifies_as_expired() {
        assert_eq!(classify(5.0, "soon", today()), StockStatus::Expired);
        assert_eq!(classify(5.0, "", today()), StockStatus::Expired);
        // ...unless there is no stock, which still dominates
        assert_eq!(classify(0.0, "soon", today()), StockStatus::OutOfStock);
    }

    #[test]
    fn test_classify_batch_delegates() {
        let batch = StockBatch {
            batch_id: "b1".into(),
            location: "main".into(),
            expiry_date: "2024-05-01".into(),
            qty_on_hand: 3.0,
        };
        assert_eq!(classify_batch(&batch, today()), StockStatus::Expired);
    }

    #[test]
    fn test_is_sellable() {
        assert!(!StockStatus::OutOfStock.is_sellable());
        assert!(!StockStatus::Expired.is_sellable());
        assert!(StockStatus::NearExpiry.is_sellable());
        assert!(StockStatus::SellAllowed.is_sellable());
    }
}
