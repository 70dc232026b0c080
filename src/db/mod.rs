//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access, so the
//! HTTP layer receives its store by injection and tests can run against an
//! isolated in-memory database.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Todo, PageCursor)
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLx-backed implementation

mod error;
mod models;
mod repository;
pub mod sqlite;

#[cfg(test)]
mod models_test;

pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::{SqliteDatabase, SqliteTodoRepository};
