//! # Dashboard CLI
//!
//! Exercises a live endpoint end to end and prints today's dashboard.
//!
//! ## Usage
//! ```bash
//! # Against the default local endpoint
//! cargo run -p stockline-api --bin dashboard
//!
//! # Against a real deployment
//! STOCKLINE_ENDPOINT=https://api.example.com/graphql \
//! STOCKLINE_TOKEN=eyJhbGciOi... \
//! cargo run -p stockline-api --bin dashboard
//! ```
//!
//! Prints the session identity, today's profit row, the rolling 7-day
//! series, top products, the expense breakdown and both alert feeds.

use std::sync::Arc;

use chrono::Local;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stockline_core::dates::to_iso_date;
use stockline_core::reports::ProfitSummary;
use stockline_api::{
    ApiConfig, ApiResult, Fetch, GraphqlClient, InventoryService, ReportingService, SessionStore,
};

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ApiConfig::load_or_default(None);
    info!(endpoint = %config.endpoint, "Starting dashboard");

    let client: Arc<dyn Fetch> = Arc::new(GraphqlClient::new(&config)?);

    let session = SessionStore::new(Arc::clone(&client));
    session.load().await;

    let snapshot = session.snapshot().await;
    match &snapshot.user {
        Some(user) => println!("Signed in as {} <{}>", user.name, user.email),
        None => println!("Anonymous session (no identity, no permissions)"),
    }

    if !snapshot.permissions.can_view("REPORTS") {
        println!("This account may not view reports.");
        return Ok(());
    }

    let today = to_iso_date(Local::now().date_naive());
    let reporting = ReportingService::new(Arc::clone(&client), &config);

    // Today's profit row
    let row = reporting.day_report(&today).await?;
    println!();
    println!("Today ({})", row.label);
    println!("  gross {:>10.2}", row.gross_profit);
    println!("  spent {:>10.2}", row.expenses);
    println!("  net   {:>10.2}", row.net_profit);

    // Rolling week
    let week = reporting.week_series(&today).await?;
    let summary = ProfitSummary::of(&week);
    println!();
    println!("Last 7 days (net {:.2})", summary.total_net_profit);
    for day in &week {
        println!("  {}  {:>10.2}", day.label, day.net_profit);
    }

    // Top products
    let top = reporting.top_products(&today).await?;
    println!();
    println!("Top products today");
    if top.is_empty() {
        println!("  (no sales yet)");
    }
    for (rank, product) in top.iter().enumerate() {
        println!(
            "  {:>2}. {} x{} ({:.2})",
            rank + 1,
            product.product_name,
            product.quantity_sold,
            product.sales_amount
        );
    }

    // Expense breakdown
    let buckets = reporting.expense_breakdown(&today).await?;
    println!();
    println!("Expenses today");
    if buckets.is_empty() {
        println!("  (none recorded)");
    }
    for bucket in &buckets {
        println!("  {:<16} {:>10.2}", bucket.category, bucket.amount);
    }

    // Alert feeds
    let inventory = InventoryService::new(Arc::clone(&client), &config);

    let low = inventory.low_stock_alerts().await?;
    println!();
    println!("Low stock ({} batches)", low.len());
    for alert in low.iter().take(10) {
        println!("  {} @ {}  qty {}", alert.batch_id, alert.location, alert.qty_on_hand);
    }

    let statuses = inventory
        .expiring_stock_statuses(Local::now().date_naive())
        .await?;
    println!();
    println!("Expiring soon ({} batches)", statuses.len());
    for row in statuses.iter().take(10) {
        println!(
            "  {} {}  expires {}  [{}]",
            row.alert.sku, row.alert.batch_number, row.alert.expiry_date, row.status
        );
    }

    Ok(())
}
