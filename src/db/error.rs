//! Database error types.
//!
//! This module provides abstracted error types for database operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! Callers discriminate on the variant: `Validation` and `NotFound` describe
//! the request, everything else is a persistence failure.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Validation error: {message}")]
    #[diagnostic(code(todos::db::validation_error))]
    Validation { message: String },

    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(todos::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(todos::db::database_error))]
    Database { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(todos::db::connection_error))]
    Connection { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(todos::db::migration_error))]
    Migration { message: String },
}

impl DbError {
    /// True for errors caused by the store rather than by the request.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            DbError::Database { .. } | DbError::Connection { .. } | DbError::Migration { .. }
        )
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        DbError::Database {
            message: e.to_string(),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        DbError::Migration {
            message: e.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
