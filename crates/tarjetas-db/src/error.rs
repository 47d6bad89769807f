//! # Database Error Types
//!
//! Error types for repository operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)      ValidationError (tarjetas-core)       │
//! │       │                                │                                │
//! │       ▼                                ▼                                │
//! │  DbError (this module) ← Adds entity/id context and categorization     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError::kind() → Connection | ConstraintViolation | NotFound | Query  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers branch on [`ErrorKind`] instead of driver-specific errors. There
//! is no transient/permanent split: every kind fails the operation.

use std::fmt;

use sqlx::error::ErrorKind as SqlxErrorKind;
use tarjetas_core::ValidationError;
use thiserror::Error;

/// The column constraint a write tripped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    NotNull,
    ForeignKey,
    Unique,
    Check,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Constraint::NotNull => "NOT NULL",
            Constraint::ForeignKey => "FOREIGN KEY",
            Constraint::Unique => "UNIQUE",
            Constraint::Check => "CHECK",
        };
        f.write_str(name)
    }
}

/// Semantic category of a [`DbError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Cannot reach or open the database.
    Connection,
    /// Insert/update rejected by a column constraint or by validation.
    ConstraintViolation,
    /// Lookup by primary key matched zero rows.
    NotFound,
    /// Any other SQL execution failure.
    Query,
}

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - `get_by_id` on an id with no row
    /// - `update` matched zero rows
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A column constraint rejected the write.
    ///
    /// ## When This Occurs
    /// - Duplicate `Usuario.email`
    /// - `Tarjeta.id_tema` pointing at a missing Tema
    /// - Deleting a Tema that still has Tarjetas
    #[error("{constraint} constraint violated: {message}")]
    ConstraintViolation {
        constraint: Constraint,
        message: String,
    },

    /// The payload was rejected before reaching the database.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created or opened
    /// - Pool closed or timed out waiting for a connection
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Internal error outside SQL (password hashing, blocking task).
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Classifies the error into one of the four semantic kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::NotFound { .. } => ErrorKind::NotFound,
            DbError::ConstraintViolation { .. } | DbError::Validation(_) => {
                ErrorKind::ConstraintViolation
            }
            DbError::ConnectionFailed(_) => ErrorKind::Connection,
            DbError::QueryFailed(_) | DbError::Internal(_) => ErrorKind::Query,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// The violated constraint, if this is a database constraint failure.
    pub fn constraint(&self) -> Option<Constraint> {
        match self {
            DbError::ConstraintViolation { constraint, .. } => Some(*constraint),
            _ => None,
        }
    }
}

/// Falls back to SQLite's message text when the driver reports
/// `ErrorKind::Other` for a constraint failure.
fn constraint_from_message(msg: &str) -> Option<Constraint> {
    // SQLite messages look like "UNIQUE constraint failed: Usuario.email"
    if msg.contains("UNIQUE constraint failed") {
        Some(Constraint::Unique)
    } else if msg.contains("FOREIGN KEY constraint failed") {
        Some(Constraint::ForeignKey)
    } else if msg.contains("NOT NULL constraint failed") {
        Some(Constraint::NotNull)
    } else if msg.contains("CHECK constraint failed") {
        Some(Constraint::Check)
    } else {
        None
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound          → DbError::NotFound
/// sqlx::Error::Database             → constraint kind, else QueryFailed
/// Io / Tls / Pool* / Configuration  → DbError::ConnectionFailed
/// Other                             → DbError::QueryFailed
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                let constraint = match db_err.kind() {
                    SqlxErrorKind::UniqueViolation => Some(Constraint::Unique),
                    SqlxErrorKind::ForeignKeyViolation => Some(Constraint::ForeignKey),
                    SqlxErrorKind::NotNullViolation => Some(Constraint::NotNull),
                    SqlxErrorKind::CheckViolation => Some(Constraint::Check),
                    _ => constraint_from_message(&message),
                };

                match constraint {
                    Some(constraint) => DbError::ConstraintViolation {
                        constraint,
                        message,
                    },
                    None => DbError::QueryFailed(message),
                }
            }

            sqlx::Error::PoolTimedOut => {
                DbError::ConnectionFailed("Timed out acquiring a connection".to_string())
            }

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::WorkerCrashed => DbError::ConnectionFailed(err.to_string()),

            _ => DbError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(DbError::not_found("Tema", 3).kind(), ErrorKind::NotFound);
        assert_eq!(
            DbError::ConstraintViolation {
                constraint: Constraint::Unique,
                message: "UNIQUE constraint failed: Usuario.email".to_string(),
            }
            .kind(),
            ErrorKind::ConstraintViolation
        );
        assert_eq!(
            DbError::from(ValidationError::TooLong {
                field: "nombre_tema".to_string(),
                max: 100,
            })
            .kind(),
            ErrorKind::ConstraintViolation
        );
        assert_eq!(
            DbError::ConnectionFailed("down".to_string()).kind(),
            ErrorKind::Connection
        );
        assert_eq!(DbError::QueryFailed("syntax".to_string()).kind(), ErrorKind::Query);
        assert_eq!(DbError::Internal("hash".to_string()).kind(), ErrorKind::Query);
    }

    #[test]
    fn test_not_found_message() {
        let err = DbError::not_found("Tarjeta", 12);
        assert_eq!(err.to_string(), "Tarjeta not found: 12");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_sqlx_mapping() {
        assert!(DbError::from(sqlx::Error::RowNotFound).is_not_found());
        assert_eq!(
            DbError::from(sqlx::Error::PoolClosed).kind(),
            ErrorKind::Connection
        );
        assert_eq!(
            DbError::from(sqlx::Error::PoolTimedOut).kind(),
            ErrorKind::Connection
        );
        assert_eq!(
            DbError::from(sqlx::Error::ColumnNotFound("x".to_string())).kind(),
            ErrorKind::Query
        );
    }

    #[test]
    fn test_constraint_from_message() {
        assert_eq!(
            constraint_from_message("UNIQUE constraint failed: Usuario.email"),
            Some(Constraint::Unique)
        );
        assert_eq!(
            constraint_from_message("FOREIGN KEY constraint failed"),
            Some(Constraint::ForeignKey)
        );
        assert_eq!(
            constraint_from_message("NOT NULL constraint failed: Tema.nombre_tema"),
            Some(Constraint::NotNull)
        );
        assert_eq!(constraint_from_message("no such table: Foo"), None);
    }
}
