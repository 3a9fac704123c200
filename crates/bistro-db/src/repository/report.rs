//! # Report Repository
//!
//! Read-only sales aggregates.
//!
//! | Report | Grouping | Order |
//! |---|---|---|
//! | `sales_summary(start, end)` | per day, plus top items | newest day first |
//! | `recent_daily_sales(days)` | per day | newest day first |
//! | `lifetime_totals()` | whole table | - |
//!
//! Averages are computed from the cent totals, rounding half up.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::order::DAY_FORMAT;
use bistro_core::validation::{validate_date_range, validate_days};
use bistro_core::{DailySales, LifetimeTotals, Money, SalesSummary, TopItem, TOP_ITEMS_LIMIT};

#[derive(Debug, sqlx::FromRow)]
struct DailyRow {
    day: String,
    total_sales: f64,
    order_count: i64,
}

impl DailyRow {
    fn into_daily_sales(self) -> DbResult<DailySales> {
        let date = NaiveDate::parse_from_str(&self.day, DAY_FORMAT)
            .map_err(|e| DbError::InvalidData(format!("bad order day '{}': {}", self.day, e)))?;
        let total_sales = Money::from_amount(self.total_sales);

        Ok(DailySales {
            date,
            total_sales,
            order_count: self.order_count,
            average_order_value: average(total_sales, self.order_count),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TopItemRow {
    item_name: String,
    quantity: i64,
}

fn average(total: Money, count: i64) -> Money {
    if count <= 0 {
        return Money::zero();
    }
    let cents = total.cents();
    let half = count / 2;
    let rounded = if cents >= 0 {
        (cents + half) / count
    } else {
        (cents - half) / count
    };
    Money::from_cents(rounded)
}

/// Repository for sales reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Per-day totals and the best sellers between `start` and `end`
    /// (both inclusive).
    pub async fn sales_summary(&self, start: NaiveDate, end: NaiveDate) -> DbResult<SalesSummary> {
        validate_date_range(start, end)?;

        let start = start.format(DAY_FORMAT).to_string();
        let end = end.format(DAY_FORMAT).to_string();

        let rows: Vec<DailyRow> = sqlx::query_as(
            r#"
            SELECT DATE(order_date) AS day,
                   SUM(total)       AS total_sales,
                   COUNT(*)         AS order_count
            FROM orders
            WHERE DATE(order_date) BETWEEN ?1 AND ?2
            GROUP BY DATE(order_date)
            ORDER BY day DESC
            "#,
        )
        .bind(&start)
        .bind(&end)
        .fetch_all(&self.pool)
        .await?;

        let top: Vec<TopItemRow> = sqlx::query_as(
            r#"
            SELECT item_name, SUM(quantity) AS quantity
            FROM order_items
            WHERE order_id IN (
                SELECT id FROM orders
                WHERE DATE(order_date) BETWEEN ?1 AND ?2
            )
            GROUP BY item_name
            ORDER BY quantity DESC, item_name
            LIMIT ?3
            "#,
        )
        .bind(&start)
        .bind(&end)
        .bind(TOP_ITEMS_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        debug!(%start, %end, days = rows.len(), "Built sales summary");

        Ok(SalesSummary {
            daily: rows
                .into_iter()
                .map(DailyRow::into_daily_sales)
                .collect::<DbResult<Vec<_>>>()?,
            top_items: top
                .into_iter()
                .map(|row| TopItem {
                    item_name: row.item_name,
                    quantity: row.quantity,
                })
                .collect(),
        })
    }

    /// The latest `days` days that have orders, newest first.
    pub async fn recent_daily_sales(&self, days: i64) -> DbResult<Vec<DailySales>> {
        validate_days(days)?;

        let rows: Vec<DailyRow> = sqlx::query_as(
            r#"
            SELECT DATE(order_date) AS day,
                   SUM(total)       AS total_sales,
                   COUNT(*)         AS order_count
            FROM orders
            GROUP BY DATE(order_date)
            ORDER BY day DESC
            LIMIT ?1
            "#,
        )
        .bind(days)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DailyRow::into_daily_sales).collect()
    }

    /// All-time order count, sales and average. Zero on an empty store.
    pub async fn lifetime_totals(&self) -> DbResult<LifetimeTotals> {
        let (order_count, total_sales): (i64, f64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(total), 0.0) FROM orders",
        )
        .fetch_one(&self.pool)
        .await?;

        let total_sales = Money::from_amount(total_sales);
        Ok(LifetimeTotals {
            order_count,
            total_sales,
            average_order_value: average(total_sales, order_count),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use bistro_core::receipt::RECEIPT_DATE_FORMAT;
    use bistro_core::{NewOrder, NewOrderItem, OrderType, PaymentMethod};
    use chrono::NaiveDateTime;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DAY_FORMAT).unwrap()
    }

    async fn place(db: &Database, when: &str, total_cents: i64, items: &[(&str, i64)]) {
        let order = NewOrder {
            order_type: OrderType::Takeaway,
            subtotal: Money::from_cents(total_cents),
            gst: Money::zero(),
            discount: Money::zero(),
            total: Money::from_cents(total_cents),
            payment_method: PaymentMethod::Card,
            placed_at: NaiveDateTime::parse_from_str(when, RECEIPT_DATE_FORMAT).unwrap(),
            items: items
                .iter()
                .map(|(name, qty)| NewOrderItem {
                    item_name: name.to_string(),
                    quantity: *qty,
                    unit_price: Money::from_cents(100),
                })
                .collect(),
        };
        db.orders().save_order(&order).await.unwrap();
    }

    #[test]
    fn test_average_rounds_half_up() {
        assert_eq!(average(Money::from_cents(1000), 3).cents(), 333);
        assert_eq!(average(Money::from_cents(1001), 2).cents(), 501);
        assert_eq!(average(Money::from_cents(500), 0), Money::zero());
    }

    #[tokio::test]
    async fn test_lifetime_totals_empty_store() {
        let db = test_db().await;
        let totals = db.reports().lifetime_totals().await.unwrap();
        assert_eq!(totals, LifetimeTotals::default());
    }

    #[tokio::test]
    async fn test_lifetime_totals() {
        let db = test_db().await;
        place(&db, "2024-03-08 10:00:00", 2210, &[("Pizza", 2)]).await;
        place(&db, "2024-03-09 11:00:00", 525, &[("Burger", 1)]).await;

        let totals = db.reports().lifetime_totals().await.unwrap();
        assert_eq!(totals.order_count, 2);
        assert_eq!(totals.total_sales.cents(), 2735);
        assert_eq!(totals.average_order_value.cents(), 1368);
    }

    #[tokio::test]
    async fn test_sales_summary() {
        let db = test_db().await;
        place(&db, "2024-03-07 12:00:00", 9999, &[("Tea", 50)]).await;
        place(&db, "2024-03-08 10:00:00", 1000, &[("Pizza", 2), ("Coke", 1)]).await;
        place(&db, "2024-03-09 09:00:00", 2000, &[("Pizza", 1), ("Tea", 3)]).await;
        place(&db, "2024-03-09 20:00:00", 1000, &[("Coke", 4)]).await;

        let summary = db
            .reports()
            .sales_summary(day("2024-03-08"), day("2024-03-09"))
            .await
            .unwrap();

        assert_eq!(summary.daily.len(), 2);
        assert_eq!(summary.daily[0].date, day("2024-03-09"));
        assert_eq!(summary.daily[0].order_count, 2);
        assert_eq!(summary.daily[0].total_sales.cents(), 3000);
        assert_eq!(summary.daily[0].average_order_value.cents(), 1500);
        assert_eq!(summary.daily[1].date, day("2024-03-08"));

        let top: Vec<(&str, i64)> = summary
            .top_items
            .iter()
            .map(|t| (t.item_name.as_str(), t.quantity))
            .collect();
        // Tea on 03-07 is outside the range
        assert_eq!(top, vec![("Coke", 5), ("Pizza", 3), ("Tea", 3)]);
    }

    #[tokio::test]
    async fn test_top_items_limited_to_five() {
        let db = test_db().await;
        let names = ["A", "B", "C", "D", "E", "F", "G"];
        let items: Vec<(&str, i64)> = names.iter().enumerate().map(|(i, n)| (*n, i as i64 + 1)).collect();
        place(&db, "2024-03-09 09:00:00", 1000, &items).await;

        let summary = db
            .reports()
            .sales_summary(day("2024-03-09"), day("2024-03-09"))
            .await
            .unwrap();

        assert_eq!(summary.top_items.len(), TOP_ITEMS_LIMIT as usize);
        assert_eq!(summary.top_items[0].item_name, "G");
    }

    #[tokio::test]
    async fn test_sales_summary_empty_and_invalid_range() {
        let db = test_db().await;
        let summary = db
            .reports()
            .sales_summary(day("2024-01-01"), day("2024-01-31"))
            .await
            .unwrap();
        assert_eq!(summary, SalesSummary::default());

        let err = db
            .reports()
            .sales_summary(day("2024-02-01"), day("2024-01-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidData(_)));
    }

    #[tokio::test]
    async fn test_recent_daily_sales() {
        let db = test_db().await;
        place(&db, "2024-03-01 10:00:00", 100, &[("Tea", 1)]).await;
        place(&db, "2024-03-05 10:00:00", 200, &[("Tea", 1)]).await;
        place(&db, "2024-03-09 10:00:00", 300, &[("Tea", 1)]).await;

        let recent = db.reports().recent_daily_sales(2).await.unwrap();
        let dates: Vec<NaiveDate> = recent.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![day("2024-03-09"), day("2024-03-05")]);
    }
}
