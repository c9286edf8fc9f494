//! # Report Aggregator
//!
//! Composes per-day sales reports and expense records into time-bucketed
//! profit view-models: single-day rows, month and year tables, the rolling
//! 7-day trend series, top-product rankings and expense breakdowns.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Aggregation Pipeline                                │
//! │                                                                         │
//! │  DailySalesReport[] ──┐                                                 │
//! │                       ├──► day_profit_row ──────► ProfitRow             │
//! │  Expense[] ───────────┘         │                                       │
//! │                                 ├──► month_profit_rows (1 row/day)      │
//! │                                 ├──► year_profit_rows  (12 rows)        │
//! │                                 └──► rolling_week      (7 rows)         │
//! │                                                                         │
//! │  DailySalesReportItem[] ──► top_products      (desc qty, stable ties)   │
//! │  Expense[] ─────────────► expense_breakdown  (desc sum, "Other" bucket) │
//! │                                                                         │
//! │  net_profit = gross_profit - expenses, ALWAYS recomputed in the row     │
//! │  constructor, never stored independently                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure over already-fetched collections: no hidden
//! state, no I/O, no clock. Absent data is a fallback value (gross 0, empty
//! bucket), never an error; the only `Err` is a structurally impossible
//! request (month outside 1..=12).
//!
//! Date-range membership uses lexicographic comparison of ISO strings,
//! which is equivalent to chronological order for well-formed `YYYY-MM-DD`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dates::{add_days_iso, days_in_month, end_of_month, start_of_month};
use crate::error::{CoreError, CoreResult};
use crate::money::sum_by;
use crate::types::{DailySalesReport, DailySalesReportItem, Expense};
use crate::OTHER_CATEGORY_LABEL;

// =============================================================================
// Derived Row Types
// =============================================================================

/// One profit row of a report table: a labeled date range with its gross
/// profit, expenses and derived net.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfitRow {
    /// Display label: the ISO date for day rows, `YYYY-MM` for month rows.
    pub label: String,

    /// First day of the range (inclusive), ISO.
    pub from: String,

    /// Last day of the range (inclusive), ISO.
    pub to: String,

    /// Sales revenue minus cost of goods over the range.
    pub gross_profit: f64,

    /// Operating expenses recorded in the range.
    pub expenses: f64,

    /// `gross_profit - expenses`. Derived in the constructor; rows carry no
    /// independently stored net.
    pub net_profit: f64,
}

impl ProfitRow {
    /// Builds a row, deriving `net_profit`.
    pub fn new(
        label: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        gross_profit: f64,
        expenses: f64,
    ) -> Self {
        ProfitRow {
            label: label.into(),
            from: from.into(),
            to: to.into(),
            gross_profit,
            expenses,
            net_profit: gross_profit - expenses,
        }
    }
}

/// Recomputed totals over a row collection. Never cached alongside the rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfitSummary {
    pub total_gross_profit: f64,
    pub total_expenses: f64,
    pub total_net_profit: f64,
}

impl ProfitSummary {
    /// Sums a row set. An empty set totals to zeros.
    pub fn of(rows: &[ProfitRow]) -> Self {
        ProfitSummary {
            total_gross_profit: sum_by(rows, |r| r.gross_profit),
            total_expenses: sum_by(rows, |r| r.expenses),
            total_net_profit: sum_by(rows, |r| r.net_profit),
        }
    }
}

/// One entry of the top-products-by-quantity ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TopProduct {
    pub product_id: String,
    pub sku: String,
    pub product_name: String,
    pub quantity_sold: f64,
    pub sales_amount: f64,
}

/// One category bucket of the expense breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExpenseBucket {
    /// Category name, or "Other" when the expense carried no category.
    pub category: String,
    pub amount: f64,
}

// =============================================================================
// Day / Month / Year Rows
// =============================================================================

/// Sum of expense amounts recorded exactly on `date`.
fn expenses_on(date: &str, expenses: &[Expense]) -> f64 {
    expenses
        .iter()
        .filter(|e| e.date == date)
        .map(|e| e.amount)
        .sum()
}

/// Sum of expense amounts with `from <= date <= to` (ISO string range).
fn expenses_between(from: &str, to: &str, expenses: &[Expense]) -> f64 {
    expenses
        .iter()
        .filter(|e| e.date.as_str() >= from && e.date.as_str() <= to)
        .map(|e| e.amount)
        .sum()
}

/// Single-day profit row.
///
/// Gross profit is the day report's `totalProfitAmount`, or 0 when no report
/// is available for that date; expenses are summed over records dated
/// exactly `date`.
pub fn day_profit_row(date: &str, report: Option<&DailySalesReport>, expenses: &[Expense]) -> ProfitRow {
    let gross = report.map(|r| r.total_profit_amount).unwrap_or(0.0);
    ProfitRow::new(date, date, date, gross, expenses_on(date, expenses))
}

/// One profit row per calendar day of (year, month), ascending.
///
/// The row count always equals [`days_in_month`] for the pair — leap years
/// included. `reports` is looked up by exact date; days with no report get
/// gross 0. A month outside 1..=12 is a precondition violation and the only
/// error this module produces.
pub fn month_profit_rows(
    year: i32,
    month: u32,
    reports: &[DailySalesReport],
    expenses: &[Expense],
) -> CoreResult<Vec<ProfitRow>> {
    if !(1..=12).contains(&month) {
        return Err(CoreError::MonthOutOfRange(month));
    }

    let rows = (1..=days_in_month(year, month))
        .map(|day| {
            let date = format!("{year:04}-{month:02}-{day:02}");
            let report = reports.iter().find(|r| r.date == date);
            day_profit_row(&date, report, expenses)
        })
        .collect();

    Ok(rows)
}

/// One profit row per calendar month of `year` (12 rows).
///
/// A month's gross profit is the sum of its per-day report gross profits;
/// its expenses are the sum of amounts dated inside
/// `[start_of_month, end_of_month]` inclusive.
pub fn year_profit_rows(year: i32, reports: &[DailySalesReport], expenses: &[Expense]) -> Vec<ProfitRow> {
    (1..=12u32)
        .map(|month| {
            let from = start_of_month(year, month);
            let to = end_of_month(year, month);
            let gross: f64 = reports
                .iter()
                .filter(|r| r.date.as_str() >= from.as_str() && r.date.as_str() <= to.as_str())
                .map(|r| r.total_profit_amount)
                .sum();
            let spent = expenses_between(&from, &to, expenses);
            ProfitRow::new(format!("{year:04}-{month:02}"), from, to, gross, spent)
        })
        .collect()
}

/// Rolling 7-day series: one row per day of `[anchor-6 ..= anchor]`,
/// labeled by ISO date, in date order. Drives the trend visualization.
pub fn rolling_week(anchor: &str, reports: &[DailySalesReport], expenses: &[Expense]) -> Vec<ProfitRow> {
    (-6..=0i64)
        .map(|offset| {
            let date = add_days_iso(anchor, offset);
            let report = reports.iter().find(|r| r.date == date);
            day_profit_row(&date, report, expenses)
        })
        .collect()
}

// =============================================================================
// Rankings & Breakdowns
// =============================================================================

/// Top `limit` products by quantity sold, descending.
///
/// The sort is stable: lines with equal quantities keep their original
/// report order. Pass [`crate::TOP_PRODUCTS_LIMIT`] for the standard
/// dashboard cut.
pub fn top_products(items: &[DailySalesReportItem], limit: usize) -> Vec<TopProduct> {
    let mut ranked: Vec<&DailySalesReportItem> = items.iter().collect();
    ranked.sort_by(|a, b| b.quantity_sold.total_cmp(&a.quantity_sold));

    ranked
        .into_iter()
        .take(limit)
        .map(|item| TopProduct {
            product_id: item.product_id.clone(),
            sku: item.sku.clone(),
            product_name: item.product_name.clone(),
            quantity_sold: item.quantity_sold,
            sales_amount: item.sales_amount,
        })
        .collect()
}

/// Groups a day's expenses by category name and returns the top `limit`
/// buckets by summed amount, descending.
///
/// Expenses with no category (or a blank category name) land in the
/// "Other" bucket. Buckets with equal sums keep first-appearance order.
/// Pass [`crate::EXPENSE_BREAKDOWN_LIMIT`] for the standard dashboard cut.
pub fn expense_breakdown(expenses: &[Expense], limit: usize) -> Vec<ExpenseBucket> {
    let mut buckets: Vec<ExpenseBucket> = Vec::new();

    for expense in expenses {
        let label = expense
            .category
            .as_ref()
            .map(|c| c.name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(OTHER_CATEGORY_LABEL);

        match buckets.iter_mut().find(|b| b.category == label) {
            Some(bucket) => bucket.amount += expense.amount,
            None => buckets.push(ExpenseBucket {
                category: label.to_string(),
                amount: expense.amount,
            }),
        }
    }

    buckets.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    buckets.truncate(limit);
    buckets
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExpenseCategory;
    use crate::{EXPENSE_BREAKDOWN_LIMIT, TOP_PRODUCTS_LIMIT};

    fn report(date: &str, profit: f64) -> DailySalesReport {
        DailySalesReport {
            date: date.to_string(),
            total_sales_amount: profit * 3.0,
            total_cost_amount: profit * 2.0,
            total_profit_amount: profit,
            items: vec![],
        }
    }

    fn item(name: &str, qty: f64) -> DailySalesReportItem {
        DailySalesReportItem {
            product_id: format!("p-{name}"),
            sku: format!("SKU-{name}"),
            product_name: name.to_string(),
            quantity_sold: qty,
            sales_amount: qty * 2.0,
            cost_amount: qty,
            profit_amount: qty,
        }
    }

    fn expense(date: &str, amount: f64, category: Option<&str>) -> Expense {
        Expense {
            id: format!("e-{date}-{amount}"),
            date: date.to_string(),
            description: None,
            amount,
            payment_method: "CASH".to_string(),
            created_at: format!("{date}T09:00:00Z"),
            created_by: None,
            category: category.map(|name| ExpenseCategory {
                id: format!("c-{name}"),
                name: name.to_string(),
                active: true,
            }),
        }
    }

    #[test]
    fn test_day_row_without_report_defaults_gross_to_zero() {
        let expenses = vec![expense("2024-05-03", 8.0, None)];
        let row = day_profit_row("2024-05-03", None, &expenses);
        assert_eq!(row.gross_profit, 0.0);
        assert_eq!(row.expenses, 8.0);
        assert_eq!(row.net_profit, -8.0);
    }

    #[test]
    fn test_day_row_ignores_other_dates_expenses() {
        let expenses = vec![expense("2024-05-02", 8.0, None), expense("2024-05-03", 5.0, None)];
        let row = day_profit_row("2024-05-03", Some(&report("2024-05-03", 20.0)), &expenses);
        assert_eq!(row.expenses, 5.0);
        assert_eq!(row.net_profit, 15.0);
    }

    #[test]
    fn test_net_profit_always_derived() {
        let row = ProfitRow::new("x", "2024-05-01", "2024-05-01", 30.0, 12.5);
        assert_eq!(row.net_profit, 17.5);
    }

    #[test]
    fn test_month_rows_count_and_last_date() {
        for (year, month) in [(2024, 2), (2023, 2), (2024, 5), (2024, 12)] {
            let rows = month_profit_rows(year, month, &[], &[]).unwrap();
            assert_eq!(rows.len() as u32, days_in_month(year, month));
            assert_eq!(rows.last().unwrap().to, end_of_month(year, month));
            // Ascending day order
            assert_eq!(rows[0].from, start_of_month(year, month));
        }
    }

    #[test]
    fn test_month_rows_rejects_invalid_month() {
        assert_eq!(
            month_profit_rows(2024, 0, &[], &[]),
            Err(CoreError::MonthOutOfRange(0))
        );
        assert_eq!(
            month_profit_rows(2024, 13, &[], &[]),
            Err(CoreError::MonthOutOfRange(13))
        );
    }

    #[test]
    fn test_month_rows_pick_up_reports_and_expenses() {
        let reports = vec![report("2024-05-02", 40.0)];
        let expenses = vec![expense("2024-05-02", 15.0, None)];
        let rows = month_profit_rows(2024, 5, &reports, &expenses).unwrap();
        assert_eq!(rows[1].gross_profit, 40.0);
        assert_eq!(rows[1].net_profit, 25.0);
        assert_eq!(rows[0].gross_profit, 0.0);
    }

    #[test]
    fn test_rolling_week_scenario() {
        // Reports for 2024-05-01..07, expense of 8 on the 3rd
        let profits = [10.0, 20.0, 15.0, 0.0, 5.0, 30.0, 12.0];
        let reports: Vec<DailySalesReport> = profits
            .iter()
            .enumerate()
            .map(|(i, p)| report(&format!("2024-05-0{}", i + 1), *p))
            .collect();
        let expenses = vec![expense("2024-05-03", 8.0, None)];

        let rows = rolling_week("2024-05-07", &reports, &expenses);
        assert_eq!(rows.len(), 7);
        let nets: Vec<f64> = rows.iter().map(|r| r.net_profit).collect();
        assert_eq!(nets, vec![10.0, 20.0, 7.0, 0.0, 5.0, 30.0, 12.0]);
        assert_eq!(rows[0].label, "2024-05-01");
        assert_eq!(rows[6].label, "2024-05-07");
    }

    #[test]
    fn test_year_rows_are_twelve_and_bucket_by_month() {
        let reports = vec![
            report("2024-01-10", 100.0),
            report("2024-01-20", 50.0),
            report("2024-02-29", 30.0),
        ];
        let expenses = vec![
            expense("2024-01-05", 40.0, None),
            expense("2024-02-01", 10.0, None),
            expense("2023-12-31", 999.0, None), // outside the year
        ];

        let rows = year_profit_rows(2024, &reports, &expenses);
        assert_eq!(rows.len(), 12);

        assert_eq!(rows[0].label, "2024-01");
        assert_eq!(rows[0].from, "2024-01-01");
        assert_eq!(rows[0].to, "2024-01-31");
        assert_eq!(rows[0].gross_profit, 150.0);
        assert_eq!(rows[0].net_profit, 110.0);

        assert_eq!(rows[1].to, "2024-02-29"); // leap year
        assert_eq!(rows[1].gross_profit, 30.0);
        assert_eq!(rows[1].expenses, 10.0);

        // Months with no data are zero rows, not missing rows
        assert_eq!(rows[11].gross_profit, 0.0);
        assert_eq!(rows[11].expenses, 0.0);
    }

    #[test]
    fn test_summary_recomputes_totals() {
        let rows = vec![
            ProfitRow::new("a", "2024-05-01", "2024-05-01", 10.0, 2.0),
            ProfitRow::new("b", "2024-05-02", "2024-05-02", 20.0, 5.0),
        ];
        let summary = ProfitSummary::of(&rows);
        assert_eq!(summary.total_gross_profit, 30.0);
        assert_eq!(summary.total_expenses, 7.0);
        assert_eq!(summary.total_net_profit, 23.0);

        let empty = ProfitSummary::of(&[]);
        assert_eq!(empty.total_net_profit, 0.0);
    }

    #[test]
    fn test_top_products_descending_with_stable_ties() {
        let items = vec![item("A", 5.0), item("B", 9.0), item("C", 9.0)];
        let top = top_products(&items, 2);
        // Both qty-9 items outrank qty-5; the tie keeps input order (B first)
        let names: Vec<&str> = top.iter().map(|t| t.product_name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_top_products_limit_and_empty() {
        let items = vec![item("A", 5.0), item("B", 9.0)];
        assert_eq!(top_products(&items, 10).len(), 2);
        assert!(top_products(&[], TOP_PRODUCTS_LIMIT).is_empty());
    }

    #[test]
    fn test_expense_breakdown_groups_and_falls_back_to_other() {
        let expenses = vec![
            expense("2024-05-03", 100.0, Some("Rent")),
            expense("2024-05-03", 50.0, Some("Rent")),
            expense("2024-05-03", 20.0, None),
        ];
        let buckets = expense_breakdown(&expenses, EXPENSE_BREAKDOWN_LIMIT);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].category, "Rent");
        assert_eq!(buckets[0].amount, 150.0);
        assert_eq!(buckets[1].category, "Other");
        assert_eq!(buckets[1].amount, 20.0);
    }

    #[test]
    fn test_expense_breakdown_blank_name_is_other() {
        let expenses = vec![expense("2024-05-03", 5.0, Some("  "))];
        let buckets = expense_breakdown(&expenses, 7);
        assert_eq!(buckets[0].category, "Other");
    }

    #[test]
    fn test_expense_breakdown_truncates_to_limit() {
        let expenses: Vec<Expense> = (0..10)
            .map(|i| expense("2024-05-03", 10.0 + i as f64, Some(&format!("Cat{i}"))))
            .collect();
        let buckets = expense_breakdown(&expenses, 7);
        assert_eq!(buckets.len(), 7);
        // Descending by amount
        assert_eq!(buckets[0].category, "Cat9");
    }
}
