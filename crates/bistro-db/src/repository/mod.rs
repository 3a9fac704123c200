//! # Repository Module
//!
//! Database repository implementations for Bistro POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Order Session / report command                                        │
//! │       │                                                                 │
//! │       │  db.orders().save_order(&order)                                │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── save_order(&self, order)                                          │
//! │  ├── orders_for_date(&self, date)                                      │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository owns a clone of the pool and returns typed records,
//! never raw rows.
//!
//! ## Available Repositories
//!
//! - [`menu::MenuRepository`] - Seed, load and add menu items
//! - [`order::OrderRepository`] - Orders with their items
//! - [`report::ReportRepository`] - Sales aggregates

pub mod menu;
pub mod order;
pub mod report;
