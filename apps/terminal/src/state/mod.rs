//! # State Module
//!
//! Application state owned by the `bistro` process.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      lib.rs `run()`                             │   │
//! │  │  let config = AppConfig::from_env().with_db_path(cli.db);       │   │
//! │  │  let session = OrderSession::new(db).await?;                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │                ┌─────────────┴──────────────┐                           │
//! │                ▼                            ▼                           │
//! │  ┌──────────────────────────┐  ┌──────────────────────────────────┐    │
//! │  │       AppConfig          │  │         OrderSession             │    │
//! │  │                          │  │                                  │    │
//! │  │  db_path                 │  │  Database (SQLite pool)          │    │
//! │  │  store_name              │  │  catalog: Vec<MenuItem>          │    │
//! │  │  currency_symbol         │  │  draft: OrderDraft               │    │
//! │  └──────────────────────────┘  └──────────────────────────────────┘    │
//! │                                                                         │
//! │  One operator, one loop: the session is owned by the order screen     │
//! │  and borrowed mutably per command. No locking.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{default_database_path, AppConfig, DB_FILE_NAME};
pub use session::{OrderSession, RenderLine, RenderModel};
