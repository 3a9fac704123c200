//! # Report Commands
//!
//! Sales reports and stored-order lookups. Each command has a fetch half
//! (hits the store) and a `format_*` half (pure, returns display lines) so the
//! same data can be printed as text or as JSON.

use chrono::{Local, NaiveDate};
use tracing::debug;

use bistro_core::validation::parse_date;
use bistro_core::{DailySales, LifetimeTotals, Order, Receipt, SalesSummary};
use bistro_db::Database;

use crate::error::CommandResult;
use crate::state::AppConfig;

/// Days covered by the quick report on the order screen.
pub const DEFAULT_RECENT_DAYS: i64 = 7;

// =============================================================================
// Recent days
// =============================================================================

pub async fn recent_sales(db: &Database, days: i64) -> CommandResult<Vec<DailySales>> {
    debug!(days, "recent_sales command");
    Ok(db.reports().recent_daily_sales(days).await?)
}

/// ```text
/// Sales Report (Last 7 Days)
///
/// 2024-03-09: $30.00 (2 orders)
/// ```
pub fn format_recent(days: &[DailySales], requested: i64, config: &AppConfig) -> Vec<String> {
    if days.is_empty() {
        return vec!["No orders yet.".to_string()];
    }

    let mut out = vec![
        format!("Sales Report (Last {} Days)", requested),
        String::new(),
    ];
    out.extend(days.iter().map(|d| {
        format!(
            "{}: {} ({} orders)",
            d.date,
            config.format_currency(d.total_sales.cents()),
            d.order_count
        )
    }));
    out
}

// =============================================================================
// Date range summary
// =============================================================================

/// Parses `from`/`to` (YYYY-MM-DD) and builds the summary.
pub async fn sales_summary(db: &Database, from: &str, to: &str) -> CommandResult<SalesSummary> {
    let start = parse_date(from)?;
    let end = parse_date(to)?;
    debug!(%start, %end, "sales_summary command");

    Ok(db.reports().sales_summary(start, end).await?)
}

pub fn format_summary(summary: &SalesSummary, config: &AppConfig) -> Vec<String> {
    if summary.daily.is_empty() {
        return vec!["No orders in this period.".to_string()];
    }

    let mut out = vec![
        format!("{:<12} {:>10} {:>7} {:>10}", "Date", "Sales", "Orders", "Average"),
    ];
    for day in &summary.daily {
        out.push(format!(
            "{:<12} {:>10} {:>7} {:>10}",
            day.date.to_string(),
            config.format_currency(day.total_sales.cents()),
            day.order_count,
            config.format_currency(day.average_order_value.cents())
        ));
    }

    out.push(String::new());
    out.push("Top items:".to_string());
    for (rank, item) in summary.top_items.iter().enumerate() {
        out.push(format!("{}. {} x{}", rank + 1, item.item_name, item.quantity));
    }
    out
}

// =============================================================================
// Lifetime
// =============================================================================

pub async fn lifetime(db: &Database) -> CommandResult<LifetimeTotals> {
    Ok(db.reports().lifetime_totals().await?)
}

pub fn format_lifetime(totals: &LifetimeTotals, config: &AppConfig) -> Vec<String> {
    vec![
        format!("Orders: {}", totals.order_count),
        format!("Sales: {}", config.format_currency(totals.total_sales.cents())),
        format!(
            "Average order: {}",
            config.format_currency(totals.average_order_value.cents())
        ),
    ]
}

// =============================================================================
// Stored orders
// =============================================================================

/// Orders on `date` (today when omitted), newest first.
pub async fn orders_on(db: &Database, date: Option<&str>) -> CommandResult<(NaiveDate, Vec<Order>)> {
    let date = match date {
        Some(text) => parse_date(text)?,
        None => Local::now().date_naive(),
    };

    let orders = db.orders().orders_for_date(date).await?;
    Ok((date, orders))
}

/// Each order as its reprinted receipt.
pub fn format_orders(date: NaiveDate, orders: &[Order], config: &AppConfig) -> Vec<String> {
    if orders.is_empty() {
        return vec![format!("No orders on {}.", date)];
    }

    let mut out = Vec::new();
    for (i, order) in orders.iter().enumerate() {
        if i > 0 {
            out.push("-".repeat(32));
        }
        out.extend(Receipt::from_order(order).text_lines(&config.currency_symbol));
    }
    out
}

pub async fn delete_order(db: &Database, id: i64) -> CommandResult<()> {
    debug!(id, "delete_order command");
    Ok(db.orders().delete(id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use bistro_core::receipt::RECEIPT_DATE_FORMAT;
    use bistro_core::{Money, NewOrder, NewOrderItem, OrderType, PaymentMethod};
    use bistro_db::DbConfig;
    use chrono::NaiveDateTime;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn place(db: &Database, when: &str, total_cents: i64) -> i64 {
        let order = NewOrder {
            order_type: OrderType::DineIn,
            subtotal: Money::from_cents(total_cents),
            gst: Money::zero(),
            discount: Money::zero(),
            total: Money::from_cents(total_cents),
            payment_method: PaymentMethod::Cash,
            placed_at: NaiveDateTime::parse_from_str(when, RECEIPT_DATE_FORMAT).unwrap(),
            items: vec![NewOrderItem {
                item_name: "Tea".to_string(),
                quantity: 1,
                unit_price: Money::from_cents(total_cents),
            }],
        };
        db.orders().save_order(&order).await.unwrap()
    }

    #[tokio::test]
    async fn test_recent_report_text() {
        let db = test_db().await;
        let config = AppConfig::default();

        let empty = recent_sales(&db, DEFAULT_RECENT_DAYS).await.unwrap();
        assert_eq!(format_recent(&empty, 7, &config), vec!["No orders yet."]);

        place(&db, "2024-03-09 10:00:00", 1000).await;
        place(&db, "2024-03-09 12:00:00", 2000).await;
        place(&db, "2024-03-08 12:00:00", 250).await;

        let days = recent_sales(&db, DEFAULT_RECENT_DAYS).await.unwrap();
        assert_eq!(
            format_recent(&days, 7, &config),
            vec![
                "Sales Report (Last 7 Days)",
                "",
                "2024-03-09: $30.00 (2 orders)",
                "2024-03-08: $2.50 (1 orders)",
            ]
        );
    }

    #[tokio::test]
    async fn test_summary_rejects_bad_dates() {
        let db = test_db().await;

        let err = sales_summary(&db, "03/09/2024", "2024-03-10").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = sales_summary(&db, "2024-03-10", "2024-03-01").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_summary_text() {
        let db = test_db().await;
        place(&db, "2024-03-09 10:00:00", 1000).await;

        let summary = sales_summary(&db, "2024-03-01", "2024-03-31").await.unwrap();
        let lines = format_summary(&summary, &AppConfig::default());

        assert!(lines[1].starts_with("2024-03-09"));
        assert!(lines.contains(&"1. Tea x1".to_string()));
    }

    #[tokio::test]
    async fn test_lifetime_text() {
        let db = test_db().await;
        place(&db, "2024-03-09 10:00:00", 1000).await;
        place(&db, "2024-03-10 10:00:00", 501).await;

        let totals = lifetime(&db).await.unwrap();
        assert_eq!(
            format_lifetime(&totals, &AppConfig::default()),
            vec!["Orders: 2", "Sales: $15.01", "Average order: $7.51"]
        );
    }

    #[tokio::test]
    async fn test_orders_on_date_and_delete() {
        let db = test_db().await;
        let config = AppConfig::default();
        let id = place(&db, "2024-03-09 10:00:00", 250).await;

        let (date, orders) = orders_on(&db, Some("2024-03-09")).await.unwrap();
        assert_eq!(orders.len(), 1);
        let text = format_orders(date, &orders, &config);
        assert_eq!(text[0], format!("Order #{}", id));
        assert!(text.contains(&"Tea x1 @ $2.50 = $2.50".to_string()));

        delete_order(&db, id).await.unwrap();
        let (date, orders) = orders_on(&db, Some("2024-03-09")).await.unwrap();
        assert_eq!(format_orders(date, &orders, &config), vec!["No orders on 2024-03-09."]);

        let err = delete_order(&db, id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
