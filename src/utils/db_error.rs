//! Helpers for classifying database errors.

/// Name of the partial unique index guarding active short codes.
pub const ACTIVE_SHORT_CODE_INDEX: &str = "links_short_code_active_key";

/// Returns true if `e` is a unique violation on the active short code index.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(ACTIVE_SHORT_CODE_INDEX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_a_violation() {
        assert!(!is_unique_violation_on_code(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation_on_code(&sqlx::Error::PoolTimedOut));
    }
}
