//! # Bistro Terminal Library
//!
//! Core library for the `bistro` binary: command line, startup and dispatch.
//!
//! ## Module Organization
//! ```text
//! bistro_terminal_lib/
//! ├── lib.rs          ◄─── You are here (CLI, startup, dispatch)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Configuration (env, data dir, flags)
//! │   └── session.rs  ◄─── The order being taken
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── order.rs    ◄─── Interactive order screen
//! │   ├── menu.rs     ◄─── Menu commands
//! │   └── report.rs   ◄─── Report and stored-order commands
//! └── error.rs        ◄─── Command error type
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Parse Command Line ───────────────────────────────────────────────► │
//! │     • clap derive, `pos` when no subcommand is given                    │
//! │                                                                         │
//! │  2. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber to stderr, RUST_LOG overrides the default      │
//! │                                                                         │
//! │  3. Resolve Configuration ────────────────────────────────────────────► │
//! │     • defaults, BISTRO_* environment, then --db                         │
//! │                                                                         │
//! │  4. Open Database ────────────────────────────────────────────────────► │
//! │     • SQLite with WAL mode, migrations, default menu if empty           │
//! │                                                                         │
//! │  5. Dispatch ─────────────────────────────────────────────────────────► │
//! │     • pos: order screen on stdin/stdout                                 │
//! │     • others: one report or change, text or --json                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bistro_db::{Database, DbConfig};
use commands::order::OrderScreen;
use commands::{menu, report};
use state::{AppConfig, OrderSession};

/// Restaurant till and sales reports.
#[derive(Debug, Parser)]
#[command(name = "bistro", about = "Bistro POS: order screen and sales reports", version)]
pub struct Cli {
    #[arg(long, global = true, help = "Database file (overrides BISTRO_DB_PATH)")]
    pub db: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render report output as pretty JSON"
    )]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive order screen (default)
    Pos,
    /// Show or change the menu
    #[command(subcommand)]
    Menu(MenuCommand),
    /// Orders of one day, or delete one
    Orders(OrdersArgs),
    /// Per-day sales and top items for a date range
    Summary(SummaryArgs),
    /// All-time order count and sales
    Lifetime,
    /// Sales of the latest days with orders
    Recent(RecentArgs),
}

#[derive(Debug, Subcommand)]
pub enum MenuCommand {
    /// List the menu
    List,
    /// Add a menu item
    Add(MenuAddArgs),
}

#[derive(Debug, Args)]
pub struct MenuAddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub category: String,
    #[arg(long, help = "Unit price, e.g. 10.00")]
    pub price: f64,
    #[arg(long, default_value_t = 5.0, help = "GST percent")]
    pub gst: f64,
}

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[arg(long, help = "Day to list (YYYY-MM-DD), today when omitted")]
    pub date: Option<String>,
    #[command(subcommand)]
    pub command: Option<OrdersCommand>,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// Delete an order and its items
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[arg(long, help = "First day (YYYY-MM-DD)")]
    pub from: String,
    #[arg(long, help = "Last day (YYYY-MM-DD)")]
    pub to: String,
}

#[derive(Debug, Args)]
pub struct RecentArgs {
    #[arg(long, default_value_t = report::DEFAULT_RECENT_DAYS)]
    pub days: i64,
}

/// Runs the `bistro` binary.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = AppConfig::from_env().with_db_path(cli.db.clone());
    info!(db_path = %config.db_path.display(), "Starting Bistro POS");

    let db = open_database(DbConfig::new(&config.db_path)).await?;

    let result = match cli.command.unwrap_or(Command::Pos) {
        Command::Pos => {
            let mut session = OrderSession::new(db.clone()).await?;
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            OrderScreen::new(&mut session, &config)
                .run(input, &mut stdout)
                .await
                .context("order screen failed")
        }
        command => {
            let mut stdout = std::io::stdout();
            execute(command, &db, &config, cli.json, &mut stdout).await
        }
    };

    db.close().await;
    result
}

/// Opens the store and puts the default menu into an empty one.
pub async fn open_database(config: DbConfig) -> anyhow::Result<Database> {
    let path = config.database_path.display().to_string();
    let db = Database::new(config)
        .await
        .with_context(|| format!("could not open database at {}", path))?;

    let (known, applied) = db.migration_status().await?;
    debug!(applied, known, "Schema migrations");

    let seeded = db.menu().seed_if_empty().await?;
    if seeded > 0 {
        info!(items = seeded, "Default menu created");
    }
    Ok(db)
}

/// Runs a one-shot command, writing text or JSON to `out`.
pub async fn execute<W: Write>(
    command: Command,
    db: &Database,
    config: &AppConfig,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Pos => {
            Err(error::CommandError::internal("the order screen needs a terminal").into())
        }
        Command::Menu(MenuCommand::List) => {
            let items = menu::list_menu(db).await?;
            emit(out, json, &items, || menu::format_menu(&items, config))
        }
        Command::Menu(MenuCommand::Add(args)) => {
            let item =
                menu::add_menu_item(db, &args.name, &args.category, args.price, args.gst).await?;
            emit(out, json, &item, || {
                vec![format!(
                    "Added {} ({}) at {}",
                    item.name,
                    item.category,
                    config.format_currency(item.price.cents())
                )]
            })
        }
        Command::Orders(OrdersArgs {
            command: Some(OrdersCommand::Delete { id }),
            ..
        }) => {
            report::delete_order(db, id).await?;
            emit(out, json, &serde_json::json!({ "deleted": id }), || {
                vec![format!("Deleted order #{}", id)]
            })
        }
        Command::Orders(OrdersArgs { date, command: None }) => {
            let (date, orders) = report::orders_on(db, date.as_deref()).await?;
            emit(out, json, &orders, || report::format_orders(date, &orders, config))
        }
        Command::Summary(args) => {
            let summary = report::sales_summary(db, &args.from, &args.to).await?;
            emit(out, json, &summary, || report::format_summary(&summary, config))
        }
        Command::Lifetime => {
            let totals = report::lifetime(db).await?;
            emit(out, json, &totals, || report::format_lifetime(&totals, config))
        }
        Command::Recent(args) => {
            let days = report::recent_sales(db, args.days).await?;
            emit(out, json, &days, || report::format_recent(&days, args.days, config))
        }
    }
}

fn emit<W, T, F>(out: &mut W, json: bool, value: &T, text: F) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
    F: FnOnce() -> Vec<String>,
{
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    } else {
        for line in text() {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bistro=trace` - Show trace for bistro crates only
/// - Default: `info,bistro=debug,sqlx=warn`
///
/// Logs go to stderr; stdout belongs to the order screen.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bistro=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    async fn test_db() -> Database {
        open_database(DbConfig::in_memory()).await.unwrap()
    }

    async fn run_command(db: &Database, args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(args)?;
        let command = cli.command.unwrap_or(Command::Pos);
        let mut out = Vec::new();
        execute(command, db, &AppConfig::default(), cli.json, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["bistro"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["bistro", "recent", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Command::Recent(RecentArgs { days: 7 }))));

        let cli = Cli::try_parse_from(["bistro", "--db", "/tmp/b.db", "orders", "delete", "4"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/b.db")));
        assert!(matches!(
            cli.command,
            Some(Command::Orders(OrdersArgs {
                command: Some(OrdersCommand::Delete { id: 4 }),
                ..
            }))
        ));

        assert!(Cli::try_parse_from(["bistro", "summary", "--from", "2024-01-01"]).is_err());
    }

    #[tokio::test]
    async fn test_open_database_seeds_menu() {
        let db = test_db().await;
        let out = run_command(&db, &["bistro", "menu", "list"]).await.unwrap();
        assert_eq!(out.lines().count(), 10);
    }

    #[tokio::test]
    async fn test_menu_add_then_list_json() {
        let db = test_db().await;
        let out = run_command(
            &db,
            &["bistro", "menu", "add", "--name", "Lassi", "--category", "Beverage", "--price", "3.25"],
        )
        .await
        .unwrap();
        assert_eq!(out, "Added Lassi (Beverage) at $3.25\n");

        let out = run_command(&db, &["bistro", "--json", "menu", "list"]).await.unwrap();
        let items: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(items.as_array().unwrap().len(), 11);
    }

    #[tokio::test]
    async fn test_reports_on_empty_store() {
        let db = test_db().await;

        let out = run_command(&db, &["bistro", "lifetime"]).await.unwrap();
        assert!(out.starts_with("Orders: 0\n"));

        let out = run_command(&db, &["bistro", "recent"]).await.unwrap();
        assert_eq!(out, "No orders yet.\n");

        let out = run_command(&db, &["bistro", "orders", "--date", "2024-03-09"]).await.unwrap();
        assert_eq!(out, "No orders on 2024-03-09.\n");

        let out = run_command(&db, &["bistro", "--json", "summary", "--from", "2024-03-01", "--to", "2024-03-31"])
            .await
            .unwrap();
        let summary: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(summary["daily"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_command_errors_propagate() {
        let db = test_db().await;

        let err = run_command(&db, &["bistro", "orders", "delete", "99"]).await.unwrap_err();
        assert!(err.to_string().contains("Order not found: 99"));

        let err = run_command(&db, &["bistro", "recent", "--days", "0"]).await.unwrap_err();
        assert!(err.to_string().contains("days"));
    }

    #[tokio::test]
    async fn test_file_database_reopens() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bistro.db");

        let db = open_database(DbConfig::new(&path)).await.unwrap();
        run_command(&db, &["bistro", "menu", "add", "--name", "Soup", "--category", "Food", "--price", "4"])
            .await
            .unwrap();
        db.close().await;

        let db = open_database(DbConfig::new(&path)).await.unwrap();
        let out = run_command(&db, &["bistro", "menu", "list"]).await.unwrap();
        assert!(out.contains("Soup"));
        assert_eq!(out.lines().count(), 11);
        db.close().await;
    }
}
