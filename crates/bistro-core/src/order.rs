//! # Order Draft
//!
//! The in-progress order on the order screen.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operator Action          Draft Method             State Change         │
//! │  ───────────────          ────────────             ────────────         │
//! │                                                                         │
//! │  Pick menu item ─────────► add_item() ───────────► qty += 1 or push    │
//! │                                                                         │
//! │  Remove line ────────────► remove_line(Some(i)) ─► lines.remove(i)     │
//! │                                                                         │
//! │  Clear ──────────────────► clear() ──────────────► lines.clear()       │
//! │                                                                         │
//! │  Show totals ────────────► totals(discount) ─────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failing operation leaves the draft exactly as it was.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::totals::{calculate_totals_with_input, OrderTotals, PricedLine};
use crate::types::{MenuItem, TaxRate};
use crate::validation::{validate_gst_rate, validate_price_ceiling, validate_quantity};
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_LINES};

/// A line of the draft.
///
/// Price and GST rate are frozen when the line is created, so a menu reload
/// mid-order does not change what the customer was quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub gst_rate: TaxRate,
}

impl OrderLine {
    pub fn from_menu_item(item: &MenuItem, quantity: i64) -> Self {
        OrderLine {
            item_name: item.name.clone(),
            quantity,
            unit_price: item.price,
            gst_rate: item.gst_rate,
        }
    }

    /// unit_price × quantity
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    fn priced(&self) -> PricedLine {
        PricedLine::new(
            self.item_name.clone(),
            self.quantity,
            self.unit_price,
            self.gst_rate,
        )
    }
}

/// The order being built.
///
/// ## Invariants
/// - Lines are unique by `item_name` (adding the same item increases quantity)
/// - Every quantity is in `1..=MAX_ITEM_QUANTITY`
/// - At most `MAX_ORDER_LINES` lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    lines: Vec<OrderLine>,
}

impl OrderDraft {
    pub fn new() -> Self {
        OrderDraft { lines: Vec::new() }
    }

    /// Adds `quantity` of a menu item, merging into an existing line.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::{Money, MenuItem, OrderDraft, TaxRate};
    ///
    /// let pizza = MenuItem {
    ///     id: 1,
    ///     name: "Pizza".to_string(),
    ///     category: "Food".to_string(),
    ///     price: Money::from_cents(1000),
    ///     gst_rate: TaxRate::from_bps(500),
    /// };
    ///
    /// let mut draft = OrderDraft::new();
    /// draft.add_item(&pizza, 1).unwrap();
    /// draft.add_item(&pizza, 1).unwrap();
    ///
    /// assert_eq!(draft.len(), 1);
    /// assert_eq!(draft.lines()[0].quantity, 2);
    /// ```
    pub fn add_item(&mut self, item: &MenuItem, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;
        validate_price_ceiling(item.price)?;
        validate_gst_rate(item.gst_rate)?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_name == item.name) {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY
                || line.unit_price.checked_multiply_quantity(new_qty).is_none()
            {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.lines.len() >= MAX_ORDER_LINES {
            return Err(CoreError::OrderTooLarge {
                max: MAX_ORDER_LINES,
            });
        }

        self.lines.push(OrderLine::from_menu_item(item, quantity));
        Ok(())
    }

    /// Removes the selected line (0-based) and returns it.
    ///
    /// `None` means nothing was selected.
    pub fn remove_line(&mut self, index: Option<usize>) -> CoreResult<OrderLine> {
        let index = index.ok_or(CoreError::NoLineSelected)?;

        if index >= self.lines.len() {
            // reported 1-based, as shown on screen
            return Err(CoreError::LineNotFound {
                index: index + 1,
                len: self.lines.len(),
            });
        }

        Ok(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The lines in calculator form.
    pub fn priced_lines(&self) -> Vec<PricedLine> {
        self.lines.iter().map(OrderLine::priced).collect()
    }

    /// Live totals for the given discount text.
    pub fn totals(&self, discount_input: &str) -> OrderTotals {
        calculate_totals_with_input(&self.priced_lines(), discount_input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn menu_item(id: i64, name: &str, price_cents: i64) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            category: "Food".to_string(),
            price: Money::from_cents(price_cents),
            gst_rate: TaxRate::from_bps(500),
        }
    }

    #[test]
    fn test_add_same_item_merges() {
        let mut draft = OrderDraft::new();
        let pizza = menu_item(1, "Pizza", 1000);

        draft.add_item(&pizza, 1).unwrap();
        draft.add_item(&pizza, 1).unwrap();

        assert_eq!(draft.len(), 1);
        assert_eq!(draft.lines()[0].quantity, 2);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut draft = OrderDraft::new();
        draft.add_item(&menu_item(1, "Pizza", 1000), 1).unwrap();
        draft.add_item(&menu_item(2, "Coke", 200), 1).unwrap();
        draft.add_item(&menu_item(1, "Pizza", 1000), 1).unwrap();

        let names: Vec<&str> = draft.lines().iter().map(|l| l.item_name.as_str()).collect();
        assert_eq!(names, vec!["Pizza", "Coke"]);
    }

    #[test]
    fn test_price_snapshot() {
        let mut draft = OrderDraft::new();
        let mut pizza = menu_item(1, "Pizza", 1000);
        draft.add_item(&pizza, 1).unwrap();

        pizza.price = Money::from_cents(1200);
        draft.add_item(&pizza, 1).unwrap();

        assert_eq!(draft.lines()[0].unit_price.cents(), 1000);
        assert_eq!(draft.lines()[0].line_total().cents(), 2000);
    }

    #[test]
    fn test_quantity_limit() {
        let mut draft = OrderDraft::new();
        let coke = menu_item(1, "Coke", 200);

        draft.add_item(&coke, MAX_ITEM_QUANTITY).unwrap();
        let err = draft.add_item(&coke, 1).unwrap_err();

        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
        assert_eq!(draft.lines()[0].quantity, MAX_ITEM_QUANTITY);
        assert!(draft.add_item(&menu_item(2, "Tea", 250), 0).is_err());
    }

    #[test]
    fn test_overpriced_item_rejected() {
        let mut draft = OrderDraft::new();
        let gold = menu_item(1, "Gold", i64::MAX);

        let err = draft.add_item(&gold, 1).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::AmountTooLarge { .. })
        ));
        assert!(draft.is_empty());

        let mut odd_rate = menu_item(2, "Odd", 100);
        odd_rate.gst_rate = TaxRate::from_bps(u32::MAX);
        assert!(draft.add_item(&odd_rate, 1).is_err());
        assert!(draft.is_empty());
    }

    #[test]
    fn test_largest_order_does_not_overflow() {
        let mut draft = OrderDraft::new();
        for i in 0..MAX_ORDER_LINES {
            let mut item = menu_item(i as i64, &format!("Dish {}", i), crate::MAX_PRICE_CENTS);
            item.gst_rate = TaxRate::from_bps(crate::MAX_GST_BPS);
            draft.add_item(&item, MAX_ITEM_QUANTITY).unwrap();
        }

        let totals = draft.totals("");
        let subtotal = crate::MAX_PRICE_CENTS * MAX_ITEM_QUANTITY * MAX_ORDER_LINES as i64;
        assert_eq!(totals.subtotal.cents(), subtotal);
        assert_eq!(totals.gst.cents(), subtotal);
        assert_eq!(totals.total.cents(), subtotal * 2);
    }

    #[test]
    fn test_line_limit() {
        let mut draft = OrderDraft::new();
        for i in 0..MAX_ORDER_LINES {
            draft
                .add_item(&menu_item(i as i64, &format!("Dish {}", i), 100), 1)
                .unwrap();
        }

        let err = draft.add_item(&menu_item(999, "One More", 100), 1).unwrap_err();
        assert_eq!(err, CoreError::OrderTooLarge { max: MAX_ORDER_LINES });
        assert_eq!(draft.len(), MAX_ORDER_LINES);
    }

    #[test]
    fn test_remove_line() {
        let mut draft = OrderDraft::new();
        draft.add_item(&menu_item(1, "Pizza", 1000), 1).unwrap();
        draft.add_item(&menu_item(2, "Coke", 200), 1).unwrap();

        let removed = draft.remove_line(Some(0)).unwrap();
        assert_eq!(removed.item_name, "Pizza");
        assert_eq!(draft.lines()[0].item_name, "Coke");
    }

    #[test]
    fn test_remove_without_selection() {
        let mut draft = OrderDraft::new();
        draft.add_item(&menu_item(1, "Pizza", 1000), 1).unwrap();

        assert_eq!(draft.remove_line(None), Err(CoreError::NoLineSelected));
        assert_eq!(
            draft.remove_line(Some(5)),
            Err(CoreError::LineNotFound { index: 6, len: 1 })
        );
        assert_eq!(draft.len(), 1);
    }

    #[test]
    fn test_totals_and_clear() {
        let mut draft = OrderDraft::new();
        let pizza = menu_item(1, "Pizza", 1000);
        draft.add_item(&pizza, 2).unwrap();
        draft.add_item(&menu_item(2, "Coke", 200), 1).unwrap();

        let totals = draft.totals("1.00");
        assert_eq!(totals.subtotal.cents(), 2200);
        assert_eq!(totals.gst.cents(), 110);
        assert_eq!(totals.total.cents(), 2210);
        assert_eq!(totals.line_total(0), Some(Money::from_cents(2000)));

        draft.clear();
        assert!(draft.is_empty());
        assert_eq!(draft.totals("").total, Money::zero());
    }
}
