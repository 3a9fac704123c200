//! # Order Totals
//!
//! Turns priced lines and a discount into subtotal, GST and total.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each line:   line_subtotal = unit_price × quantity                │
//! │                   gst_acc      += line_subtotal × bps   (exact, i128)  │
//! │                                                                         │
//! │  subtotal = Σ line_subtotal                                            │
//! │  gst      = round_half_up(gst_acc / 10000)      ← rounded ONCE         │
//! │  discount = clamp(raw_discount, 0, subtotal + gst)                     │
//! │  total    = subtotal + gst - discount                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed discounts never fail: they are normalized and reported through
//! [`DiscountAdjustment`] so the order screen can mention it.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{NewOrderItem, TaxRate};

// =============================================================================
// Inputs
// =============================================================================

/// One line of an order with the price data needed for totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub gst_rate: TaxRate,
}

impl PricedLine {
    pub fn new(
        item_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
        gst_rate: TaxRate,
    ) -> Self {
        PricedLine {
            item_name: item_name.into(),
            quantity,
            unit_price,
            gst_rate,
        }
    }

    /// unit_price × quantity
    #[inline]
    pub fn line_subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// Why the discount that was applied differs from what was typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountAdjustment {
    /// Input was not a number; zero applied.
    Unparsable,
    /// Input was below zero; zero applied.
    Negative,
    /// Input exceeded subtotal + GST; the ceiling was applied.
    Capped,
}

/// A discount typed by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountInput {
    /// Flat amount; zero for a percentage.
    pub amount: Money,
    /// `N%` input in basis points of the subtotal.
    pub percent_bps: Option<i64>,
    /// Set when the text could not be read as a number.
    pub unparsable: bool,
}

impl DiscountInput {
    fn flat(amount: Money) -> Self {
        DiscountInput {
            amount,
            percent_bps: None,
            unparsable: false,
        }
    }

    fn unparsable() -> Self {
        DiscountInput {
            unparsable: true,
            ..DiscountInput::flat(Money::zero())
        }
    }

    /// The discount in cents for an order with this subtotal.
    pub fn resolve(&self, subtotal: Money) -> Money {
        match self.percent_bps {
            Some(bps) => discount_for_percentage(subtotal, bps),
            None => self.amount,
        }
    }
}

/// Parses operator text into a discount.
///
/// - blank → zero
/// - `N%` → N percent of the subtotal
/// - not a finite number → zero, flagged unparsable
/// - otherwise rounded to the nearest cent (sign kept; clamping happens in
///   [`calculate_totals`])
///
/// ## Example
/// ```rust
/// use bistro_core::money::Money;
/// use bistro_core::totals::parse_discount;
///
/// assert_eq!(parse_discount("1.5").amount.cents(), 150);
/// assert_eq!(parse_discount("").amount.cents(), 0);
/// assert_eq!(parse_discount("10%").resolve(Money::from_cents(2200)).cents(), 220);
/// assert!(parse_discount("ten").unparsable);
/// ```
pub fn parse_discount(input: &str) -> DiscountInput {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return DiscountInput::flat(Money::zero());
    }

    if let Some(number) = trimmed.strip_suffix('%') {
        return match number.trim().parse::<f64>() {
            Ok(pct) if pct.is_finite() => DiscountInput {
                percent_bps: Some((pct * 100.0).round() as i64),
                ..DiscountInput::flat(Money::zero())
            },
            _ => DiscountInput::unparsable(),
        };
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => DiscountInput::flat(Money::from_amount(value)),
        _ => DiscountInput::unparsable(),
    }
}

/// `percent_bps` of `subtotal`, rounded half away from zero to the cent.
///
/// ## Example
/// ```rust
/// use bistro_core::money::Money;
/// use bistro_core::totals::discount_for_percentage;
///
/// assert_eq!(discount_for_percentage(Money::from_cents(2200), 1000).cents(), 220);
/// assert_eq!(discount_for_percentage(Money::from_cents(250), 500).cents(), 13);
/// ```
pub fn discount_for_percentage(subtotal: Money, percent_bps: i64) -> Money {
    let acc = subtotal.cents() as i128 * percent_bps as i128;
    let cents = if acc >= 0 {
        (acc + 5000) / 10000
    } else {
        (acc - 5000) / 10000
    };
    let cents = i64::try_from(cents).unwrap_or(if cents < 0 { i64::MIN } else { i64::MAX });
    Money::from_cents(cents)
}

// =============================================================================
// Output
// =============================================================================

/// Result of a totals calculation.
///
/// ## Invariants
/// - `total == subtotal + gst - discount`
/// - `0 <= discount <= subtotal + gst`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub gst: Money,
    pub discount: Money,
    pub total: Money,
    pub discount_adjustment: Option<DiscountAdjustment>,
    /// Lines normalized for persistence.
    pub lines: Vec<PricedLine>,
}

impl OrderTotals {
    /// Totals of an empty order.
    pub fn empty() -> Self {
        OrderTotals {
            subtotal: Money::zero(),
            gst: Money::zero(),
            discount: Money::zero(),
            total: Money::zero(),
            discount_adjustment: None,
            lines: Vec::new(),
        }
    }

    /// subtotal + gst, the most that can be discounted.
    #[inline]
    pub fn before_discount(&self) -> Money {
        self.subtotal + self.gst
    }

    /// unit_price × quantity of line `index`, if it exists.
    pub fn line_total(&self, index: usize) -> Option<Money> {
        self.lines.get(index).map(PricedLine::line_subtotal)
    }

    /// The rows written to `order_items`.
    pub fn order_items(&self) -> Vec<NewOrderItem> {
        self.lines
            .iter()
            .map(|line| NewOrderItem {
                item_name: line.item_name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect()
    }
}

// =============================================================================
// Calculation
// =============================================================================

/// Calculates subtotal, GST, discount and total for an order.
///
/// ## Example
/// ```rust
/// use bistro_core::money::Money;
/// use bistro_core::totals::{calculate_totals, PricedLine};
/// use bistro_core::types::TaxRate;
///
/// let lines = vec![
///     PricedLine::new("Pizza", 2, Money::from_cents(1000), TaxRate::from_bps(500)),
///     PricedLine::new("Coke", 1, Money::from_cents(200), TaxRate::from_bps(500)),
/// ];
///
/// let totals = calculate_totals(&lines, Money::from_cents(100_000));
/// assert_eq!(totals.discount.cents(), 2210);
/// assert_eq!(totals.total.cents(), 0);
/// ```
pub fn calculate_totals(lines: &[PricedLine], raw_discount: Money) -> OrderTotals {
    let mut subtotal = Money::zero();
    // cents × bps, divided by 10000 once at the end
    let mut gst_acc: i128 = 0;

    for line in lines {
        let line_subtotal = line.line_subtotal();
        subtotal += line_subtotal;
        gst_acc += line_subtotal.cents() as i128 * line.gst_rate.bps() as i128;
    }

    let gst = Money::from_cents(((gst_acc + 5000) / 10000) as i64);
    let ceiling = subtotal + gst;

    let discount = raw_discount.clamp(Money::zero(), ceiling);
    let discount_adjustment = if raw_discount.is_negative() {
        Some(DiscountAdjustment::Negative)
    } else if raw_discount > ceiling {
        Some(DiscountAdjustment::Capped)
    } else {
        None
    };

    OrderTotals {
        subtotal,
        gst,
        discount,
        total: ceiling - discount,
        discount_adjustment,
        lines: lines.to_vec(),
    }
}

/// Parses the operator's discount text and calculates totals.
pub fn calculate_totals_with_input(lines: &[PricedLine], discount_input: &str) -> OrderTotals {
    let parsed = parse_discount(discount_input);
    let subtotal: Money = lines.iter().map(PricedLine::line_subtotal).sum();
    let mut totals = calculate_totals(lines, parsed.resolve(subtotal));
    if parsed.unparsable {
        totals.discount_adjustment = Some(DiscountAdjustment::Unparsable);
    }
    totals
}

// =============================================================================
// Unit Tests
// =============================================================================
