//! # Commands Module
//!
//! Everything the `bistro` binary can do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── order.rs    ◄─── Interactive order screen (`bistro pos`)
//! ├── menu.rs     ◄─── Menu listing and additions
//! └── report.rs   ◄─── Sales reports, stored orders
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ bistro summary --from 2024-03-01 --to 2024-03-31                     │
//! │         │                                                               │
//! │         │ (clap)                                                        │
//! │         ▼                                                               │
//! │  lib.rs `execute()`                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  report::sales_summary(&db, from, to) -> CommandResult<SalesSummary>    │
//! │         │                                                               │
//! │         ├── --json ──► serde_json::to_string_pretty                     │
//! │         └── text ────► report::format_summary(&summary, &config)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fetch functions return typed records; `format_*` functions turn them into
//! display lines and never touch the store.

pub mod menu;
pub mod order;
pub mod report;
