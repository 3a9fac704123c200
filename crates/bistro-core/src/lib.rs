//! # bistro-core: Pure Business Logic for Bistro POS
//!
//! This crate contains all business logic of the restaurant till as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/terminal (`bistro` binary)                 │   │
//! │  │    Order screen ──► Order Session ──► Reports                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  totals   │  │   order   │  │   │
//! │  │   │ MenuItem  │  │   Money   │  │ GST math  │  │OrderDraft │  │   │
//! │  │   │   Order   │  │  TaxRate  │  │ discount  │  │  Receipt  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TERMINAL • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  bistro-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Order, OrderItem, report records)
//! - [`money`] - Money type with integer arithmetic
//! - [`totals`] - Subtotal / GST / discount / total calculation
//! - [`order`] - The in-progress order draft
//! - [`receipt`] - Human-readable bill
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::money::Money;
//! use bistro_core::totals::{calculate_totals, PricedLine};
//! use bistro_core::types::TaxRate;
//!
//! let lines = vec![
//!     PricedLine::new("Pizza", 2, Money::from_cents(1000), TaxRate::from_bps(500)),
//!     PricedLine::new("Coke", 1, Money::from_cents(200), TaxRate::from_bps(500)),
//! ];
//! let totals = calculate_totals(&lines, Money::from_cents(100));
//!
//! assert_eq!(totals.subtotal.cents(), 2200);
//! assert_eq!(totals.gst.cents(), 110);
//! assert_eq!(totals.total.cents(), 2210);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod order;
pub mod receipt;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use order::{OrderDraft, OrderLine};
pub use receipt::Receipt;
pub use totals::{
    calculate_totals, discount_for_percentage, parse_discount, DiscountAdjustment, OrderTotals,
    PricedLine,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single order.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of a single menu item in one order.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g. a stuck key on the order screen).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price a menu item may have, in cents ($1,000,000.00).
///
/// With `MAX_ITEM_QUANTITY` and `MAX_ORDER_LINES` this keeps every order
/// total far inside `i64` cents.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Highest GST rate, in basis points (100%).
pub const MAX_GST_BPS: u32 = 10_000;

/// GST rate applied to the default menu, in basis points (5%).
pub const DEFAULT_GST_BPS: u32 = 500;

/// Number of best sellers reported by a sales summary.
pub const TOP_ITEMS_LIMIT: i64 = 5;
