//! Domain models for the TODO database.
//!
//! These models are storage-agnostic and represent the entities
//! used throughout the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Store-assigned identifier. Strictly increasing in creation order.
pub type TodoId = i64;

/// A single TODO record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub subject: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cursor for backward (older-first) pagination.
///
/// `prev_id == 0` starts at the newest record; otherwise only records with
/// an id strictly below `prev_id` are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub prev_id: TodoId,
    pub size: i64,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            prev_id: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageCursor {
    pub fn new(prev_id: TodoId, size: i64) -> Self {
        Self { prev_id, size }
    }

    /// True when the page starts at the most recent record.
    pub fn is_first_page(&self) -> bool {
        self.prev_id == 0
    }

    /// Cursor for the page that follows `page`, or `None` when `page` was the last one.
    pub fn next(&self, page: &[Todo]) -> Option<Self> {
        if page.is_empty() || (page.len() as i64) < self.size {
            return None;
        }
        page.last().map(|last| Self::new(last.id, self.size))
    }
}
