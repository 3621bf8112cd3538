/// Failure from a catalog store operation.
///
/// Uniqueness violations are split out so callers can answer with a conflict
/// instead of a generic failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write collided with an existing row on a unique constraint.
    #[error("Duplicate value violates unique constraint: {constraint}")]
    DuplicateKey { constraint: String },

    /// Any other database failure (connectivity, other constraints, decoding).
    #[error("Storage error: {0}")]
    Storage(#[source] sqlx::Error),
}

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return StoreError::DuplicateKey {
                    constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                };
            }
        }
        StoreError::Storage(err)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn row_not_found_is_storage() {
        assert_matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::Storage(sqlx::Error::RowNotFound)
        );
    }

    #[test]
    fn pool_timeout_is_storage() {
        assert_matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Storage(_)
        );
    }
}
