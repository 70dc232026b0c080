//! Shared helper functions for SQLite repositories.

use crate::db::{DbError, DbResult};

/// Upper bound on bound parameters in one SQLite statement.
pub const MAX_BOUND_PARAMETERS: usize = 32766;

/// Build a comma separated list of `count` positional placeholders.
///
/// Only placeholders are generated; values are always bound separately.
pub fn build_placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Reject empty subjects.
pub fn validate_subject(subject: &str) -> DbResult<()> {
    if subject.is_empty() {
        return Err(DbError::Validation {
            message: "subject cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// LIMIT value for a page size. SQLite treats a negative LIMIT as unbounded,
/// so negative sizes are clamped to an empty page.
pub fn page_limit(size: i64) -> i64 {
    size.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_placeholders_matches_arity() {
        assert_eq!(build_placeholders(1), "?");
        assert_eq!(build_placeholders(3), "?, ?, ?");
        assert_eq!(build_placeholders(0), "");
    }

    #[test]
    fn test_validate_subject() {
        assert!(validate_subject("buy milk").is_ok());
        assert!(validate_subject("   ").is_ok());
        assert!(matches!(
            validate_subject(""),
            Err(DbError::Validation { .. })
        ));
    }

    #[test]
    fn test_page_limit_clamps_negative_sizes() {
        assert_eq!(page_limit(5), 5);
        assert_eq!(page_limit(0), 0);
        assert_eq!(page_limit(-1), 0);
    }
}
