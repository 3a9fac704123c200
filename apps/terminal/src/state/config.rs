//! # Configuration State
//!
//! Stores application configuration resolved at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`)
//! 2. Environment variables (`BISTRO_*`)
//! 3. Defaults (this file, platform data directory)
//!
//! Configuration is read-only after startup.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// File name of the store inside the data directory.
pub const DB_FILE_NAME: &str = "bistro.db";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// SQLite file holding menu and orders
    pub db_path: PathBuf,

    /// Store name (printed above receipts)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Store: "Bistro"
    /// - Currency: $
    /// - Database: `./bistro.db`
    fn default() -> Self {
        AppConfig {
            db_path: PathBuf::from(".").join(DB_FILE_NAME),
            store_name: "Bistro".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl AppConfig {
    /// Creates an AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BISTRO_DB_PATH`: Database file
    /// - `BISTRO_STORE_NAME`: Store name
    /// - `BISTRO_CURRENCY_SYMBOL`: Currency symbol
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();

        config.db_path = match std::env::var("BISTRO_DB_PATH") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_database_path(),
        };

        if let Ok(store_name) = std::env::var("BISTRO_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(symbol) = std::env::var("BISTRO_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Applies a `--db` override.
    pub fn with_db_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.db_path = path;
        }
        self
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let whole = cents / 100;
        let frac = (cents % 100).abs();

        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            whole.abs(),
            frac
        )
    }
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.bistro.pos/bistro.db`
/// - **Windows**: `%APPDATA%\bistro\pos\data\bistro.db`
/// - **Linux**: `~/.local/share/pos/bistro.db`
///
/// Falls back to `./bistro.db` (with a warning) when the directory cannot be
/// resolved or created.
pub fn default_database_path() -> PathBuf {
    let Some(proj_dirs) = ProjectDirs::from("com", "bistro", "pos") else {
        warn!("Could not determine app data directory, using current directory");
        return AppConfig::default().db_path;
    };

    database_path_in(proj_dirs.data_dir())
}

/// `dir/bistro.db`, creating `dir` if needed.
fn database_path_in(dir: &Path) -> PathBuf {
    if let Err(e) = std::fs::create_dir_all(dir) {
        warn!(dir = %dir.display(), error = %e, "Could not create data directory, using current directory");
        return AppConfig::default().db_path;
    }
    dir.join(DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_positive() {
        let config = AppConfig::default();
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(100), "$1.00");
        assert_eq!(config.format_currency(1), "$0.01");
        assert_eq!(config.format_currency(0), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = AppConfig::default();
        assert_eq!(config.format_currency(-1234), "-$12.34");
        assert_eq!(config.format_currency(-5), "-$0.05");
    }

    #[test]
    fn test_format_currency_custom_symbol() {
        let config = AppConfig {
            currency_symbol: "₹".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.format_currency(2210), "₹22.10");
    }

    #[test]
    fn test_db_flag_overrides() {
        let config = AppConfig::default().with_db_path(Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(config.db_path, PathBuf::from("/tmp/x.db"));

        let config = AppConfig::default().with_db_path(None);
        assert_eq!(config.db_path, PathBuf::from("./bistro.db"));
    }

    #[test]
    fn test_database_path_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("data");

        let path = database_path_in(&dir);

        assert_eq!(path, dir.join(DB_FILE_NAME));
        assert!(dir.is_dir());
    }

    #[test]
    fn test_database_path_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();

        // a regular file where the directory should be
        let path = database_path_in(&file.join("data"));

        assert_eq!(path, PathBuf::from("./bistro.db"));
    }
}
