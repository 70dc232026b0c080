//! A small REST service managing TODO records backed by SQLite.
//!
//! - [`db`]: storage-agnostic repository traits and the SQLite implementation
//! - [`api`]: axum router, handlers and server runner

pub mod api;
pub mod db;
