//! SQLite TodoRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, warn};

use super::helpers::{MAX_BOUND_PARAMETERS, build_placeholders, page_limit, validate_subject};
use crate::db::{DbError, DbResult, PageCursor, Todo, TodoId, TodoRepository};

const ENTITY_TYPE: &str = "todo";

const SELECT_BY_ID: &str =
    "SELECT id, subject, description, created_at, updated_at FROM todos WHERE id = ?";

const SELECT_LATEST: &str = "SELECT id, subject, description, created_at, updated_at \
     FROM todos ORDER BY id DESC LIMIT ?";

const SELECT_BEFORE: &str = "SELECT id, subject, description, created_at, updated_at \
     FROM todos WHERE id < ? ORDER BY id DESC LIMIT ?";

const INSERT: &str = "INSERT INTO todos (subject, description) VALUES (?, ?)";

// 'now' is fixed for the duration of one statement. When the clock has not
// moved past the stored value, bump it by one millisecond instead.
const UPDATE: &str = "UPDATE todos SET subject = ?, description = ?, updated_at = CASE \
     WHEN strftime('%Y-%m-%dT%H:%M:%fZ', 'now') > updated_at \
     THEN strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
     ELSE strftime('%Y-%m-%dT%H:%M:%fZ', updated_at, '+0.001 seconds') END \
     WHERE id = ?";

/// SQLx-backed TODO repository.
pub struct SqliteTodoRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn todo_from_row(row: &SqliteRow) -> Result<Todo, sqlx::Error> {
    Ok(Todo {
        id: row.try_get("id")?,
        subject: row.try_get("subject")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl SqliteTodoRepository<'_> {
    /// Confirmatory read of a single row.
    async fn fetch(&self, id: TodoId) -> DbResult<Option<Todo>> {
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.as_ref().map(todo_from_row).transpose()?)
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    async fn create(&self, subject: &str, description: &str) -> DbResult<Todo> {
        validate_subject(subject)?;

        let result = sqlx::query(INSERT)
            .bind(subject)
            .bind(description)
            .execute(self.pool)
            .await?;
        let id = result.last_insert_rowid();

        // A row that vanishes right after its insert is a store failure, not a missing TODO.
        let todo = self.fetch(id).await?.ok_or_else(|| {
            warn!(id, "Inserted todo could not be read back");
            DbError::Database {
                message: format!("todo {} missing after insert", id),
            }
        })?;

        debug!(id = todo.id, "Created todo");
        Ok(todo)
    }

    async fn read(&self, cursor: PageCursor) -> DbResult<Vec<Todo>> {
        let limit = page_limit(cursor.size);

        let rows = if cursor.is_first_page() {
            sqlx::query(SELECT_LATEST)
                .bind(limit)
                .fetch_all(self.pool)
                .await?
        } else {
            sqlx::query(SELECT_BEFORE)
                .bind(cursor.prev_id)
                .bind(limit)
                .fetch_all(self.pool)
                .await?
        };

        let todos = rows
            .iter()
            .map(todo_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            prev_id = cursor.prev_id,
            size = cursor.size,
            returned = todos.len(),
            "Read todos"
        );
        Ok(todos)
    }

    async fn update(&self, id: TodoId, subject: &str, description: &str) -> DbResult<Todo> {
        validate_subject(subject)?;

        sqlx::query(UPDATE)
            .bind(subject)
            .bind(description)
            .bind(id)
            .execute(self.pool)
            .await?;

        let todo = self.fetch(id).await?.ok_or_else(|| DbError::NotFound {
            entity_type: ENTITY_TYPE.to_string(),
            id: id.to_string(),
        })?;

        debug!(id, "Updated todo");
        Ok(todo)
    }

    async fn delete(&self, ids: &[TodoId]) -> DbResult<()> {
        if ids.is_empty() {
            return Err(DbError::NotFound {
                entity_type: ENTITY_TYPE.to_string(),
                id: "[]".to_string(),
            });
        }

        // One transaction keeps the delete atomic across chunks.
        let mut tx = self.pool.begin().await?;
        let mut deleted = 0;
        for chunk in ids.chunks(MAX_BOUND_PARAMETERS) {
            let sql = format!(
                "DELETE FROM todos WHERE id IN ({})",
                build_placeholders(chunk.len())
            );
            let mut query = sqlx::query(&sql);
            for id in chunk {
                query = query.bind(*id);
            }
            deleted += query.execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;

        if deleted == 0 {
            return Err(DbError::NotFound {
                entity_type: ENTITY_TYPE.to_string(),
                id: format!("{:?}", ids),
            });
        }

        debug!(
            requested = ids.len(),
            deleted,
            "Deleted todos"
        );
        Ok(())
    }
}
