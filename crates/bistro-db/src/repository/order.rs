//! # Order Repository
//!
//! Database operations for billed orders and their items.
//!
//! ## Saving an Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      save_order() transaction                           │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    INSERT INTO orders ...          → order_id (last_insert_rowid)      │
//! │    INSERT INTO order_items ... ×N  (order_id, name, qty, price)        │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Any failure ──► ROLLBACK: neither the order nor any item survives     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deleting an order removes its items through `ON DELETE CASCADE`.

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, error, info};

use crate::error::{DbError, DbResult};
use bistro_core::receipt::RECEIPT_DATE_FORMAT;
use bistro_core::{Money, NewOrder, Order, OrderItem, OrderType, PaymentMethod};

/// Date format used by `DATE(order_date)` comparisons.
pub(crate) const DAY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    order_type: OrderType,
    subtotal: f64,
    gst: f64,
    discount: f64,
    total: f64,
    payment_method: PaymentMethod,
    order_date: String,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    item_name: String,
    quantity: i64,
    price: f64,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            id: row.id,
            order_id: row.order_id,
            item_name: row.item_name,
            quantity: row.quantity,
            unit_price: Money::from_amount(row.price),
        }
    }
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> DbResult<Order> {
        let placed_at = NaiveDateTime::parse_from_str(&self.order_date, RECEIPT_DATE_FORMAT)
            .map_err(|e| {
                DbError::InvalidData(format!(
                    "order {} has unreadable order_date '{}': {}",
                    self.id, self.order_date, e
                ))
            })?;

        Ok(Order {
            id: self.id,
            order_type: self.order_type,
            subtotal: Money::from_amount(self.subtotal),
            gst: Money::from_amount(self.gst),
            discount: Money::from_amount(self.discount),
            total: Money::from_amount(self.total),
            payment_method: self.payment_method,
            placed_at,
            items,
        })
    }
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Stores an order and all its items atomically.
    ///
    /// ## Returns
    /// * `Ok(id)` - The generated order id
    /// * `Err(DbError::InvalidData)` - The order has no items
    /// * `Err(DbError::ConstraintViolation)` - e.g. an item with quantity 0;
    ///   nothing was written
    pub async fn save_order(&self, order: &NewOrder) -> DbResult<i64> {
        if order.items.is_empty() {
            return Err(DbError::InvalidData("order has no items".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        match insert_order(&mut *tx, order).await {
            Ok(order_id) => {
                tx.commit()
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

                info!(
                    order_id,
                    items = order.items.len(),
                    total = %order.total,
                    "Order saved"
                );
                Ok(order_id)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(error = %rollback_err, "Failed to roll back order transaction");
                }
                error!(error = %e, "Order not saved, transaction rolled back");
                Err(e)
            }
        }
    }

    /// Orders placed on `date`, newest first, each with its items.
    ///
    /// A date without orders yields an empty vector.
    pub async fn orders_for_date(&self, date: NaiveDate) -> DbResult<Vec<Order>> {
        let day = date.format(DAY_FORMAT).to_string();

        let rows: Vec<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, order_type, subtotal, gst, discount, total, payment_method, order_date
            FROM orders
            WHERE DATE(order_date) = ?1
            ORDER BY order_date DESC, id DESC
            "#,
        )
        .bind(&day)
        .fetch_all(&self.pool)
        .await?;

        debug!(date = %day, count = rows.len(), "Loaded orders for date");

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.items_for(row.id).await?;
            orders.push(row.into_order(items)?);
        }

        Ok(orders)
    }

    /// Gets an order with its items.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, order_type, subtotal, gst, discount, total, payment_method, order_date
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let items = self.items_for(row.id).await?;
                Ok(Some(row.into_order(items)?))
            }
            None => Ok(None),
        }
    }

    /// Deletes an order; its items go with it.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting order");

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        info!(id, "Order deleted");
        Ok(())
    }

    /// Counts stored orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn items_for(&self, order_id: i64) -> DbResult<Vec<OrderItem>> {
        let rows: Vec<OrderItemRow> = sqlx::query_as(
            r#"
            SELECT id, order_id, item_name, quantity, price
            FROM order_items
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderItem::from).collect())
    }
}

async fn insert_order(conn: &mut SqliteConnection, order: &NewOrder) -> DbResult<i64> {
    let placed_at = order.placed_at.format(RECEIPT_DATE_FORMAT).to_string();

    let result = sqlx::query(
        r#"
        INSERT INTO orders (
            order_type, subtotal, gst, discount, total, payment_method, order_date
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(order.order_type)
    .bind(order.subtotal.to_amount())
    .bind(order.gst.to_amount())
    .bind(order.discount.to_amount())
    .bind(order.total.to_amount())
    .bind(order.payment_method)
    .bind(&placed_at)
    .execute(&mut *conn)
    .await?;

    let order_id = result.last_insert_rowid();

    for item in &order.items {
        debug!(order_id, item = %item.item_name, quantity = item.quantity, "Inserting order item");

        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, item_name, quantity, price)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(order_id)
        .bind(&item.item_name)
        .bind(item.quantity)
        .bind(item.unit_price.to_amount())
        .execute(&mut *conn)
        .await?;
    }

    Ok(order_id)
}
