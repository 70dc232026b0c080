//! Tests for domain models.

use chrono::{TimeZone, Utc};

use crate::db::{DEFAULT_PAGE_SIZE, PageCursor, Todo};

fn todo(id: i64) -> Todo {
    let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    Todo {
        id,
        subject: format!("todo {}", id),
        description: String::new(),
        created_at: at,
        updated_at: at,
    }
}

#[test]
fn default_cursor_starts_at_newest_with_default_size() {
    let cursor = PageCursor::default();
    assert!(cursor.is_first_page());
    assert_eq!(cursor.size, DEFAULT_PAGE_SIZE);
}

#[test]
fn next_cursor_uses_last_id_of_full_page() {
    let cursor = PageCursor::new(0, 2);
    let page = vec![todo(9), todo(7)];

    let next = cursor.next(&page).expect("full page has a successor");
    assert_eq!(next, PageCursor::new(7, 2));
    assert!(!next.is_first_page());
}

#[test]
fn short_or_empty_page_has_no_successor() {
    let cursor = PageCursor::new(10, 3);
    assert_eq!(cursor.next(&[todo(4)]), None);
    assert_eq!(cursor.next(&[]), None);
}

#[test]
fn todo_serializes_timestamps_as_rfc3339() {
    let value = serde_json::to_value(todo(3)).unwrap();
    assert_eq!(value["id"], 3);
    assert_eq!(value["subject"], "todo 3");
    assert_eq!(value["description"], "");
    assert_eq!(value["created_at"], "2026-01-01T00:00:00Z");
    assert_eq!(value["updated_at"], "2026-01-01T00:00:00Z");
}
