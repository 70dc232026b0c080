//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{PageCursor, Todo, TodoId},
};

/// Repository for TODO operations.
///
/// Dropping a returned future cancels the in-flight store I/O.
pub trait TodoRepository {
    /// Insert a TODO and return the stored record.
    ///
    /// The store assigns the id and both timestamps; the record is re-read
    /// after the insert.
    fn create(
        &self,
        subject: &str,
        description: &str,
    ) -> impl Future<Output = DbResult<Todo>> + Send;

    /// Read one page of TODOs, newest first.
    fn read(&self, cursor: PageCursor) -> impl Future<Output = DbResult<Vec<Todo>>> + Send;

    /// Replace subject and description of an existing TODO.
    ///
    /// Returns `DbError::NotFound` when no TODO has the given id.
    fn update(
        &self,
        id: TodoId,
        subject: &str,
        description: &str,
    ) -> impl Future<Output = DbResult<Todo>> + Send;

    /// Delete every TODO whose id is in `ids` with a single statement.
    ///
    /// Returns `DbError::NotFound` when `ids` is empty or no row was removed.
    fn delete(&self, ids: &[TodoId]) -> impl Future<Output = DbResult<()>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync + 'static {
    type Todos<'a>: TodoRepository + Send + Sync
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the TODO repository.
    fn todos(&self) -> Self::Todos<'_>;
}
