//! # Domain Types
//!
//! Core domain types used throughout Bistro POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │      Order      │   │    OrderItem    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (unique)  │   │  id (rowid)     │   │  order_id (FK)  │       │
//! │  │  category       │   │  order_type     │   │  item_name      │       │
//! │  │  price          │   │  totals         │   │  quantity       │       │
//! │  │  gst_rate       │   │  payment_method │   │  unit_price     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │   OrderType     │   │ PaymentMethod   │       │
//! │  │  bps (u32)      │   │  Dine-In        │   │  Cash           │       │
//! │  │  500 = 5%       │   │  Takeaway       │   │  Card / UPI     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// GST rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5% (the default restaurant GST slab)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a stored percentage. Negative or non-finite
    /// input is treated as zero.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return TaxRate::zero();
        }
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Creates a tax rate from a typed percentage, rejecting anything outside
    /// 0% to 100%.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::types::TaxRate;
    ///
    /// assert_eq!(TaxRate::try_from_percentage(5.0).unwrap().bps(), 500);
    /// assert!(TaxRate::try_from_percentage(-5.0).is_err());
    /// assert!(TaxRate::try_from_percentage(f64::NAN).is_err());
    /// ```
    pub fn try_from_percentage(pct: f64) -> Result<Self, ValidationError> {
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return Err(ValidationError::OutOfRange {
                field: "gst".to_string(),
                min: 0,
                max: 100,
            });
        }
        Ok(TaxRate((pct * 100.0).round() as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display and storage).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A dish or drink on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Row id in the `menu` table.
    pub id: i64,

    /// Display name, unique across the menu.
    pub name: String,

    /// Grouping used to order the menu (Food, Beverage, ...).
    pub category: String,

    /// Price of one unit.
    pub price: Money,

    /// GST applied to this item.
    pub gst_rate: TaxRate,
}

/// A menu item that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub gst_rate: TaxRate,
}

impl NewMenuItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
        gst_rate: TaxRate,
    ) -> Self {
        NewMenuItem {
            name: name.into(),
            category: category.into(),
            price,
            gst_rate,
        }
    }
}

// =============================================================================
// Order Type
// =============================================================================

/// Where the food is eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum OrderType {
    #[serde(rename = "Dine-In")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Dine-In"))]
    DineIn,
    #[serde(rename = "Takeaway")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Takeaway"))]
    Takeaway,
}

impl OrderType {
    /// The label stored in the `orders.order_type` column.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderType::DineIn => "Dine-In",
            OrderType::Takeaway => "Takeaway",
        }
    }
}

impl Default for OrderType {
    fn default() -> Self {
        OrderType::DineIn
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `Dine-In`, `dinein`, `dine_in`, `takeaway`, ... in any case.
impl FromStr for OrderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "dinein" => Ok(OrderType::DineIn),
            "takeaway" => Ok(OrderType::Takeaway),
            _ => Err(ValidationError::NotAllowed {
                field: "order type".to_string(),
                allowed: vec!["Dine-In".to_string(), "Takeaway".to_string()],
            }),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the bill was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum PaymentMethod {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Cash"))]
    Cash,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Card"))]
    Card,
    #[serde(rename = "UPI")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "UPI"))]
    Upi,
}

impl PaymentMethod {
    /// The label stored in the `orders.payment_method` column.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            _ => Err(ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: vec!["Cash".to_string(), "Card".to_string(), "UPI".to_string()],
            }),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A billed order. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_type: OrderType,
    pub subtotal: Money,
    pub gst: Money,
    pub discount: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    /// Local wall-clock time the bill was generated.
    pub placed_at: NaiveDateTime,
    pub items: Vec<OrderItem>,
}

/// A line of a billed order.
/// Uses snapshot pattern: the unit price is frozen at time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Money,
}

impl OrderItem {
    /// Line total before GST (unit_price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// An order ready to be written by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub order_type: OrderType,
    pub subtotal: Money,
    pub gst: Money,
    pub discount: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub placed_at: NaiveDateTime,
    pub items: Vec<NewOrderItem>,
}

/// A line of an order that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Money,
}

// =============================================================================
// Reports
// =============================================================================

/// Sales aggregated over one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub total_sales: Money,
    pub order_count: i64,
    pub average_order_value: Money,
}

/// Quantity sold of one menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopItem {
    pub item_name: String,
    pub quantity: i64,
}

/// Per-day sales plus best sellers over a date range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Newest day first.
    pub daily: Vec<DailySales>,
    /// Highest quantity first, at most [`crate::TOP_ITEMS_LIMIT`] entries.
    pub top_items: Vec<TopItem>,
}

/// All-time figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LifetimeTotals {
    pub order_count: i64,
    pub total_sales: Money,
    pub average_order_value: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
