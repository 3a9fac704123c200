//! # Command Error Type
//!
//! Unified error type for the terminal commands and the order session.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Bistro POS                             │
//! │                                                                         │
//! │  Order screen                 Rust Backend                              │
//! │  ────────────                 ────────────                              │
//! │                                                                         │
//! │  > bill                                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  OrderSession::finalize                                          │  │
//! │  │  Result<Receipt, CommandError>                                   │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Database Error? ─── DbError::QueryFailed("...") ──┐            │  │
//! │  │         │                    (details logged)      │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Rule violated? ─── CoreError::EmptyOrder ─── CommandError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Warning: No items in order                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation problems are shown to the operator as warnings and leave the
//! session untouched. Database problems are logged in full; the operator
//! only sees a short message.

use serde::Serialize;

use bistro_core::{CoreError, ValidationError};
use bistro_db::DbError;

/// Error returned from terminal commands.
///
/// ## Serialization
/// With `--json` a failed report command prints:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Order not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Message shown to the operator
    pub message: String,
}

/// Error codes for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad operator input; nothing changed
    ValidationError,

    /// Menu item or order does not exist
    NotFound,

    /// The store failed; the operation was rolled back
    DatabaseError,

    /// Anything else
    Internal,
}

impl CommandError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CommandError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        CommandError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::Internal, message)
    }

    /// True for problems the operator can fix by retyping.
    pub fn is_warning(&self) -> bool {
        matches!(self.code, ErrorCode::ValidationError | ErrorCode::NotFound)
    }
}

/// Converts database errors to command errors.
impl From<DbError> for CommandError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CommandError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => CommandError::validation(format!(
                "{} '{}' already exists",
                field, value
            )),
            DbError::InvalidData(message) => CommandError::validation(message),
            DbError::ConstraintViolation { message } => {
                tracing::error!("Constraint violation: {}", message);
                CommandError::new(ErrorCode::DatabaseError, "Could not be saved")
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                CommandError::new(ErrorCode::DatabaseError, "Invalid reference")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                CommandError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                CommandError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                CommandError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                CommandError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                CommandError::new(ErrorCode::DatabaseError, "Database is busy")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                CommandError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to command errors.
impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(name) => CommandError::not_found("Menu item", &name),
            CoreError::Validation(e) => CommandError::from(e),
            other => CommandError::validation(other.to_string()),
        }
    }
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        CommandError::validation(err.to_string())
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for CommandError {}

/// Result type for terminal commands.
pub type CommandResult<T> = Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_become_warnings() {
        let err = CommandError::from(CoreError::EmptyOrder);
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "No items in order");
        assert!(err.is_warning());

        let err = CommandError::from(CoreError::ItemNotFound("Sushi".to_string()));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Menu item not found: Sushi");
    }

    #[test]
    fn test_db_errors_hide_details() {
        let err = CommandError::from(DbError::QueryFailed("no such table: orders".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("orders"));
        assert!(!err.is_warning());

        let err = CommandError::from(DbError::ConstraintViolation {
            message: "CHECK constraint failed: price > 0".to_string(),
        });
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Could not be saved");
    }

    #[test]
    fn test_duplicate_is_validation() {
        let err = CommandError::from(DbError::duplicate("item_name", "Pizza"));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "item_name 'Pizza' already exists");
    }

    #[test]
    fn test_serialized_code() {
        let err = CommandError::not_found("Order", "42");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"NOT_FOUND","message":"Order not found: 42"}"#);
    }
}
