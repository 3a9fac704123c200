//! # Menu Commands

use tracing::{debug, info};

use bistro_core::{MenuItem, Money, NewMenuItem, TaxRate};
use bistro_db::Database;

use crate::error::CommandResult;
use crate::state::AppConfig;

pub async fn list_menu(db: &Database) -> CommandResult<Vec<MenuItem>> {
    debug!("list_menu command");
    Ok(db.menu().load_menu().await?)
}

/// Adds an item; `price` and `gst_percent` are as typed (10.00, 5).
///
/// A GST outside 0 to 100 percent is rejected, never stored as zero.
pub async fn add_menu_item(
    db: &Database,
    name: &str,
    category: &str,
    price: f64,
    gst_percent: f64,
) -> CommandResult<MenuItem> {
    let gst_rate = TaxRate::try_from_percentage(gst_percent)?;
    let item = NewMenuItem::new(name, category, Money::from_amount(price), gst_rate);

    let stored = db.menu().insert(&item).await?;
    info!(id = stored.id, name = %stored.name, "Menu item added");
    Ok(stored)
}

/// Numbered menu lines; the number can be typed instead of the name.
///
/// ```text
///  1. Coffee       Beverage      $3.00  GST 5%
/// ```
pub fn format_menu(items: &[MenuItem], config: &AppConfig) -> Vec<String> {
    if items.is_empty() {
        return vec!["The menu is empty.".to_string()];
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                "{:>2}. {:<12} {:<10} {:>8}  GST {}%",
                i + 1,
                item.name,
                item.category,
                config.format_currency(item.price.cents()),
                item.gst_rate.percentage()
            )
        })
        .collect()
}
