//! # Reporting Service
//!
//! Fetch composition for the profit dashboards: issues the per-day report
//! and expense queries, then hands the collected snapshots to the pure
//! aggregator in `stockline-core`.
//!
//! ## Fan-Out / Join
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Month / Year / Week Aggregation                         │
//! │                                                                         │
//! │  day dates ──► stream::iter ──► buffered(max_concurrent_fetches)        │
//! │                                      │                                  │
//! │     dailySalesReport(d1) ──┐         │  results come back INDEXED BY    │
//! │     dailySalesReport(d2) ──┼── join ─┤  POSITION: completion order      │
//! │     dailySalesReport(dN) ──┘         │  never reorders rows             │
//! │                                      ▼                                  │
//! │     expenses(from, to) ── ONE ranged query for the whole span           │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │              stockline_core::reports::{month,year,...}_profit_rows      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy (named, asserted by tests)
//! - Single-fetch operations (`day_report`, `top_products`,
//!   `expense_breakdown`): the error surfaces to the caller, once.
//! - Per-day report fetches inside a fan-out: `report_or_missing` — a failed
//!   day degrades to "no report" (gross 0) with a warning, so one bad day
//!   never blocks a 365-day aggregate.
//! - The ranged expenses fetch backs every row of an aggregate, so its
//!   failure fails the whole operation.
//!
//! Aggregation calls own no mutable state: each returns a self-consistent
//! result for exactly the range requested, so superseded requests can only
//! race in the caller's own view handling.

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, warn};

use stockline_core::reports::{
    self, ExpenseBucket, ProfitRow, TopProduct,
};
use stockline_core::types::DailySalesReport;
use stockline_core::{dates, EXPENSE_BREAKDOWN_LIMIT, TOP_PRODUCTS_LIMIT};

use crate::client::Fetch;
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::queries;

// =============================================================================
// Service
// =============================================================================

/// Composes remote fetches with the pure report aggregator.
pub struct ReportingService {
    fetch: Arc<dyn Fetch>,
    max_concurrent_fetches: usize,
}

impl ReportingService {
    /// Creates a service using the configured fan-out bound.
    pub fn new(fetch: Arc<dyn Fetch>, config: &ApiConfig) -> Self {
        ReportingService {
            fetch,
            max_concurrent_fetches: config.max_concurrent_fetches.max(1),
        }
    }

    // =========================================================================
    // Single-Day Operations
    // =========================================================================

    /// Profit row for one calendar date. Errors surface directly: a single
    /// fetch has a single error channel.
    pub async fn day_report(&self, date: &str) -> ApiResult<ProfitRow> {
        let report = queries::daily_sales_report(self.fetch.as_ref(), date).await?;
        let expenses = queries::expenses_on(self.fetch.as_ref(), date).await?;
        Ok(reports::day_profit_row(date, report.as_ref(), &expenses))
    }

    /// Top products by quantity for one day's report.
    pub async fn top_products(&self, date: &str) -> ApiResult<Vec<TopProduct>> {
        let report = queries::daily_sales_report(self.fetch.as_ref(), date).await?;
        let items = report.map(|r| r.items).unwrap_or_default();
        Ok(reports::top_products(&items, TOP_PRODUCTS_LIMIT))
    }

    /// Category breakdown of one day's expenses.
    pub async fn expense_breakdown(&self, date: &str) -> ApiResult<Vec<ExpenseBucket>> {
        let expenses = queries::expenses_on(self.fetch.as_ref(), date).await?;
        Ok(reports::expense_breakdown(&expenses, EXPENSE_BREAKDOWN_LIMIT))
    }

    // =========================================================================
    // Ranged Aggregations
    // =========================================================================

    /// One profit row per calendar day of (year, month).
    pub async fn month_report(&self, year: i32, month: u32) -> ApiResult<Vec<ProfitRow>> {
        if !(1..=12).contains(&month) {
            return Err(ApiError::InvalidRequest(format!(
                "Month {month} is out of range (expected 1..=12)"
            )));
        }

        let from = dates::start_of_month(year, month);
        let to = dates::end_of_month(year, month);

        let day_dates: Vec<String> = (1..=dates::days_in_month(year, month))
            .map(|day| format!("{year:04}-{month:02}-{day:02}"))
            .collect();

        let reports_found = self.fetch_reports_ordered(day_dates).await;
        let expenses = queries::expenses_between(self.fetch.as_ref(), &from, &to).await?;

        Ok(reports::month_profit_rows(year, month, &reports_found, &expenses)?)
    }

    /// One profit row per calendar month of `year` (12 rows).
    pub async fn year_report(&self, year: i32) -> ApiResult<Vec<ProfitRow>> {
        let from = format!("{year:04}-01-01");
        let to = format!("{year:04}-12-31");

        let day_dates: Vec<String> = (1..=12u32)
            .flat_map(|month| {
                (1..=dates::days_in_month(year, month))
                    .map(move |day| format!("{year:04}-{month:02}-{day:02}"))
            })
            .collect();

        debug!(year, fetches = day_dates.len(), "Starting year aggregation fan-out");

        let reports_found = self.fetch_reports_ordered(day_dates).await;
        let expenses = queries::expenses_between(self.fetch.as_ref(), &from, &to).await?;

        Ok(reports::year_profit_rows(year, &reports_found, &expenses))
    }

    /// Rolling 7-day series ending at `anchor` (inclusive).
    pub async fn week_series(&self, anchor: &str) -> ApiResult<Vec<ProfitRow>> {
        let from = dates::add_days_iso(anchor, -6);

        let day_dates: Vec<String> = (-6..=0i64)
            .map(|offset| dates::add_days_iso(anchor, offset))
            .collect();

        let reports_found = self.fetch_reports_ordered(day_dates).await;
        let expenses = queries::expenses_between(self.fetch.as_ref(), &from, anchor).await?;

        Ok(reports::rolling_week(anchor, &reports_found, &expenses))
    }

    // =========================================================================
    // Fan-Out Plumbing
    // =========================================================================

    /// Fetches daily reports for the given dates with bounded concurrency.
    ///
    /// `buffered` yields results in input order regardless of completion
    /// order, and the `collect` is the join barrier: every fetch has
    /// resolved before any combining happens. Days whose fetch failed are
    /// absent from the result (the `report_or_missing` policy).
    async fn fetch_reports_ordered(&self, day_dates: Vec<String>) -> Vec<DailySalesReport> {
        let fetched: Vec<Option<DailySalesReport>> = stream::iter(day_dates)
            .map(|date| {
                let fetch = Arc::clone(&self.fetch);
                async move { report_or_missing(fetch.as_ref(), &date).await }
            })
            .buffered(self.max_concurrent_fetches)
            .collect()
            .await;

        fetched.into_iter().flatten().collect()
    }
}

/// Named fallback policy for per-day report fetches inside a fan-out:
/// failure means "no report that day", never a failed aggregate.
async fn report_or_missing(fetch: &dyn Fetch, date: &str) -> Option<DailySalesReport> {
    match queries::daily_sales_report(fetch, date).await {
        Ok(report) => report,
        Err(e) => {
            warn!(date, error = %e, "Daily report fetch failed - treating day as missing");
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
