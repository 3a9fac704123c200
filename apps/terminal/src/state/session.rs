//! # Order Session
//!
//! The order being taken at the till.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Order Session                                   │
//! │                                                                         │
//! │   ┌──────────────┐  add / remove / clear / discount  ┌──────────────┐  │
//! │   │   Building   │ ─────────────────────────────────►│ RenderModel  │  │
//! │   │   (draft)    │                                    └──────────────┘  │
//! │   └──────┬───────┘                                                      │
//! │          │ finalize(type, payment, discount)                            │
//! │          ▼                                                              │
//! │   ┌──────────────┐   save_order (one transaction)   ┌──────────────┐   │
//! │   │  Finalized   │ ────────────────────────────────►│   Receipt    │   │
//! │   └──────┬───────┘                                  └──────────────┘   │
//! │          │ success: cleared          failure: lines kept               │
//! │          ▼                                                              │
//! │   Building (empty)                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation returns the [`RenderModel`] the screen should show next.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::Serialize;
use tracing::{debug, info, warn};

use bistro_core::{
    CoreError, DiscountAdjustment, MenuItem, Money, NewOrder, OrderDraft, OrderTotals, OrderType,
    PaymentMethod, Receipt,
};
use bistro_db::Database;

use crate::error::CommandResult;

/// One row of the order list as shown on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderLine {
    /// 1-based position, as typed in `remove <n>`
    pub number: usize,
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Everything the screen needs after a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    pub lines: Vec<RenderLine>,
    pub subtotal: Money,
    pub gst: Money,
    pub discount: Money,
    pub total: Money,
    pub discount_adjustment: Option<DiscountAdjustment>,
}

impl RenderModel {
    fn from_totals(totals: &OrderTotals) -> Self {
        let lines = totals
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| RenderLine {
                number: i + 1,
                item_name: line.item_name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.line_subtotal(),
            })
            .collect();

        RenderModel {
            lines,
            subtotal: totals.subtotal,
            gst: totals.gst,
            discount: totals.discount,
            total: totals.total,
            discount_adjustment: totals.discount_adjustment,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The in-progress order plus the menu it is taken from.
pub struct OrderSession {
    db: Database,
    catalog: Vec<MenuItem>,
    draft: OrderDraft,
    discount_input: String,
}

impl OrderSession {
    /// Opens a session with the current menu.
    pub async fn new(db: Database) -> CommandResult<Self> {
        let catalog = db.menu().load_menu().await?;
        debug!(items = catalog.len(), "Order session opened");

        Ok(OrderSession {
            db,
            catalog,
            draft: OrderDraft::new(),
            discount_input: String::new(),
        })
    }

    /// Re-reads the menu from the store. Lines already taken keep their prices.
    pub async fn reload_menu(&mut self) -> CommandResult<usize> {
        self.catalog = self.db.menu().load_menu().await?;
        Ok(self.catalog.len())
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn catalog(&self) -> &[MenuItem] {
        &self.catalog
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn discount_input(&self) -> &str {
        &self.discount_input
    }

    /// Adds one of `name`, or bumps the quantity of its line.
    ///
    /// An exact name wins; otherwise the name must match exactly one item
    /// ignoring case. An unknown or ambiguous name leaves the order as is.
    pub fn add_item(&mut self, name: &str) -> CommandResult<RenderModel> {
        let wanted = name.trim();
        let item = match self.catalog.iter().find(|item| item.name == wanted) {
            Some(item) => item,
            None => {
                let mut matches = self
                    .catalog
                    .iter()
                    .filter(|item| item.name.eq_ignore_ascii_case(wanted));
                match (matches.next(), matches.next()) {
                    (Some(item), None) => item,
                    (Some(_), Some(_)) => {
                        return Err(CoreError::AmbiguousItem(wanted.to_string()).into())
                    }
                    (None, _) => return Err(CoreError::ItemNotFound(wanted.to_string()).into()),
                }
            }
        };

        self.draft.add_item(item, 1)?;
        debug!(item = %item.name, lines = self.draft.len(), "Item added");
        Ok(self.render())
    }

    /// Removes the selected line (0-based). `None` means no selection.
    pub fn remove_item(&mut self, index: Option<usize>) -> CommandResult<RenderModel> {
        let removed = self.draft.remove_line(index)?;
        debug!(item = %removed.item_name, "Line removed");
        Ok(self.render())
    }

    /// Empties the order and resets the discount.
    pub fn clear(&mut self) -> RenderModel {
        self.draft.clear();
        self.discount_input.clear();
        self.render()
    }

    /// Replaces the discount text; malformed text is shown as a notice.
    pub fn set_discount(&mut self, input: &str) -> RenderModel {
        self.discount_input = input.trim().to_string();
        self.render()
    }

    /// Current lines and totals, without changing anything.
    pub fn render(&self) -> RenderModel {
        RenderModel::from_totals(&self.draft.totals(&self.discount_input))
    }

    /// Stores the order and returns its receipt.
    ///
    /// ## Behavior
    /// - No lines: `EmptyOrder` warning, nothing stored
    /// - Store failure: error returned, lines and discount kept
    /// - Success: the session is cleared
    pub async fn finalize(
        &mut self,
        order_type: OrderType,
        payment_method: PaymentMethod,
        discount_input: &str,
    ) -> CommandResult<Receipt> {
        if self.draft.is_empty() {
            return Err(CoreError::EmptyOrder.into());
        }

        let totals = self.draft.totals(discount_input);
        if let Some(adjustment) = totals.discount_adjustment {
            warn!(?adjustment, input = %discount_input, "Discount adjusted");
        }

        let placed_at = now_to_the_second();
        let order = NewOrder {
            order_type,
            subtotal: totals.subtotal,
            gst: totals.gst,
            discount: totals.discount,
            total: totals.total,
            payment_method,
            placed_at,
            items: totals.order_items(),
        };

        let order_id = self.db.orders().save_order(&order).await?;

        info!(
            order_id,
            total = %totals.total,
            items = order.items.len(),
            %order_type,
            %payment_method,
            "Order billed"
        );

        let receipt = Receipt::new(order_id, order_type, payment_method, placed_at, &totals);
        self.clear();
        Ok(receipt)
    }
}

/// Local wall-clock time without the sub-second part, so the stored row and
/// the printed receipt read the same.
fn now_to_the_second() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
