//! # Menu Repository
//!
//! Database operations for menu items.
//!
//! ## Key Operations
//! - Seeding the default menu on a fresh store
//! - Loading the menu for the order screen
//! - Administrator inserts
//!
//! Prices and GST are REAL columns; they become [`Money`] and [`TaxRate`]
//! here and nowhere else.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use bistro_core::validation::validate_new_menu_item;
use bistro_core::{MenuItem, Money, NewMenuItem, TaxRate, DEFAULT_GST_BPS};

/// The menu inserted into an empty store: (name, category, price in cents).
/// Every item carries [`DEFAULT_GST_BPS`].
pub const DEFAULT_MENU: &[(&str, &str, i64)] = &[
    ("Pizza", "Food", 1000),
    ("Burger", "Food", 500),
    ("Coke", "Beverage", 200),
    ("Salad", "Food", 400),
    ("Pasta", "Food", 800),
    ("Sandwich", "Food", 600),
    ("Coffee", "Beverage", 300),
    ("Tea", "Beverage", 250),
    ("Ice Cream", "Dessert", 450),
    ("Juice", "Beverage", 350),
];

#[derive(Debug, sqlx::FromRow)]
struct MenuRow {
    id: i64,
    item_name: String,
    category: String,
    price: f64,
    gst: f64,
}

impl From<MenuRow> for MenuItem {
    fn from(row: MenuRow) -> Self {
        MenuItem {
            id: row.id,
            name: row.item_name,
            category: row.category,
            price: Money::from_amount(row.price),
            gst_rate: TaxRate::from_percentage(row.gst),
        }
    }
}

/// Repository for menu database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = MenuRepository::new(pool);
///
/// repo.seed_if_empty().await?;
/// let menu = repo.load_menu().await?;
/// ```
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Inserts [`DEFAULT_MENU`] when the menu table is empty.
    ///
    /// ## Returns
    /// Number of rows inserted: 10 on a fresh store, 0 afterwards.
    pub async fn seed_if_empty(&self) -> DbResult<usize> {
        let existing = self.count().await?;
        if existing > 0 {
            debug!(existing, "Menu already populated, skipping seed");
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        for (name, category, price_cents) in DEFAULT_MENU {
            sqlx::query("INSERT INTO menu (item_name, category, price, gst) VALUES (?1, ?2, ?3, ?4)")
                .bind(*name)
                .bind(*category)
                .bind(Money::from_cents(*price_cents).to_amount())
                .bind(TaxRate::from_bps(DEFAULT_GST_BPS).percentage())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        info!(items = DEFAULT_MENU.len(), "Seeded default menu");
        Ok(DEFAULT_MENU.len())
    }

    /// Returns all menu items ordered by category then name.
    pub async fn load_menu(&self) -> DbResult<Vec<MenuItem>> {
        let rows: Vec<MenuRow> = sqlx::query_as(
            r#"
            SELECT id, item_name, category, price, gst
            FROM menu
            ORDER BY category, item_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded menu");
        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    /// Adds a menu item.
    ///
    /// ## Returns
    /// * `Ok(MenuItem)` - Stored item with its generated id
    /// * `Err(DbError::InvalidData)` - Blank name, non-positive price, ...
    /// * `Err(DbError::UniqueViolation)` - Name already on the menu
    pub async fn insert(&self, item: &NewMenuItem) -> DbResult<MenuItem> {
        validate_new_menu_item(item)?;

        let name = item.name.trim().to_string();
        let category = item.category.trim().to_string();
        debug!(name = %name, "Inserting menu item");

        let result = sqlx::query(
            "INSERT INTO menu (item_name, category, price, gst) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&name)
        .bind(&category)
        .bind(item.price.to_amount())
        .bind(item.gst_rate.percentage())
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, name.clone()),
            other => other,
        })?;

        Ok(MenuItem {
            id: result.last_insert_rowid(),
            name,
            category,
            price: item.price,
            gst_rate: item.gst_rate,
        })
    }

    /// Counts menu items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
