//! # Receipt
//!
//! The bill handed to the customer after an order is stored.
//!
//! ```text
//! Order #42
//! Type: Dine-In
//! Date: 2024-03-09 19:45:12
//!
//! Items:
//! Pizza x2 @ $10.00 = $20.00
//! Coke x1 @ $2.00 = $2.00
//!
//! Subtotal: $22.00
//! GST: $1.10
//! Discount: $1.00
//! Total: $22.10
//! Payment: Cash
//! ```

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::totals::OrderTotals;
use crate::types::{Order, OrderType, PaymentMethod};

/// Timestamp format shared by receipts and the `orders.order_date` column.
pub const RECEIPT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One item line of a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub order_id: i64,
    pub order_type: OrderType,
    pub placed_at: NaiveDateTime,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub gst: Money,
    pub discount: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
}

impl Receipt {
    /// Builds the receipt of a freshly stored order.
    pub fn new(
        order_id: i64,
        order_type: OrderType,
        payment_method: PaymentMethod,
        placed_at: NaiveDateTime,
        totals: &OrderTotals,
    ) -> Self {
        let lines = totals
            .lines
            .iter()
            .map(|line| ReceiptLine {
                item_name: line.item_name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.line_subtotal(),
            })
            .collect();

        Receipt {
            order_id,
            order_type,
            placed_at,
            lines,
            subtotal: totals.subtotal,
            gst: totals.gst,
            discount: totals.discount,
            total: totals.total,
            payment_method,
        }
    }

    /// Rebuilds the receipt of a stored order (reprint).
    pub fn from_order(order: &Order) -> Self {
        let lines = order
            .items
            .iter()
            .map(|item| ReceiptLine {
                item_name: item.item_name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: item.line_total(),
            })
            .collect();

        Receipt {
            order_id: order.id,
            order_type: order.order_type,
            placed_at: order.placed_at,
            lines,
            subtotal: order.subtotal,
            gst: order.gst,
            discount: order.discount,
            total: order.total,
            payment_method: order.payment_method,
        }
    }

    /// The receipt as text lines, amounts prefixed with `symbol`.
    pub fn text_lines(&self, symbol: &str) -> Vec<String> {
        let mut out = vec![
            format!("Order #{}", self.order_id),
            format!("Type: {}", self.order_type),
            format!("Date: {}", self.placed_at.format(RECEIPT_DATE_FORMAT)),
            String::new(),
            "Items:".to_string(),
        ];

        for line in &self.lines {
            out.push(format!(
                "{} x{} @ {} = {}",
                line.item_name,
                line.quantity,
                line.unit_price.format_with(symbol),
                line.line_total.format_with(symbol)
            ));
        }

        out.push(String::new());
        out.push(format!("Subtotal: {}", self.subtotal.format_with(symbol)));
        out.push(format!("GST: {}", self.gst.format_with(symbol)));
        out.push(format!("Discount: {}", self.discount.format_with(symbol)));
        out.push(format!("Total: {}", self.total.format_with(symbol)));
        out.push(format!("Payment: {}", self.payment_method));
        out
    }

    /// Newline-joined receipt text.
    pub fn to_text(&self, symbol: &str) -> String {
        self.text_lines(symbol).join("\n")
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text("$"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::totals::{calculate_totals, PricedLine};
    use crate::types::{OrderItem, TaxRate};
    use chrono::NaiveDate;

    fn placed_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(19, 45, 12)
            .unwrap()
    }

    fn sample_totals() -> OrderTotals {
        let lines = vec![
            PricedLine::new("Pizza", 2, Money::from_cents(1000), TaxRate::from_bps(500)),
            PricedLine::new("Coke", 1, Money::from_cents(200), TaxRate::from_bps(500)),
        ];
        calculate_totals(&lines, Money::from_cents(100))
    }

    #[test]
    fn test_receipt_text() {
        let receipt = Receipt::new(
            42,
            OrderType::DineIn,
            PaymentMethod::Cash,
            placed_at(),
            &sample_totals(),
        );

        let expected = "Order #42\n\
                        Type: Dine-In\n\
                        Date: 2024-03-09 19:45:12\n\
                        \n\
                        Items:\n\
                        Pizza x2 @ $10.00 = $20.00\n\
                        Coke x1 @ $2.00 = $2.00\n\
                        \n\
                        Subtotal: $22.00\n\
                        GST: $1.10\n\
                        Discount: $1.00\n\
                        Total: $22.10\n\
                        Payment: Cash";
        assert_eq!(receipt.to_string(), expected);
    }

    #[test]
    fn test_custom_currency_symbol() {
        let receipt = Receipt::new(
            7,
            OrderType::Takeaway,
            PaymentMethod::Upi,
            placed_at(),
            &sample_totals(),
        );
        let lines = receipt.text_lines("₹");

        assert_eq!(lines[1], "Type: Takeaway");
        assert_eq!(lines[5], "Pizza x2 @ ₹10.00 = ₹20.00");
        assert_eq!(lines.last().unwrap(), "Payment: UPI");
    }

    #[test]
    fn test_reprint_from_stored_order() {
        let order = Order {
            id: 3,
            order_type: OrderType::DineIn,
            subtotal: Money::from_cents(500),
            gst: Money::from_cents(25),
            discount: Money::zero(),
            total: Money::from_cents(525),
            payment_method: PaymentMethod::Card,
            placed_at: placed_at(),
            items: vec![OrderItem {
                id: 1,
                order_id: 3,
                item_name: "Burger".to_string(),
                quantity: 1,
                unit_price: Money::from_cents(500),
            }],
        };

        let text = Receipt::from_order(&order).to_string();
        assert!(text.starts_with("Order #3\n"));
        assert!(text.contains("Burger x1 @ $5.00 = $5.00"));
        assert!(text.contains("Total: $5.25"));
    }
}
