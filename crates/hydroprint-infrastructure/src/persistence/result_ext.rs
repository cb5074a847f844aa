use hydroprint_domain::shared::DomainError;

/// Maps sqlx failures into typed domain errors at the repository boundary
pub trait ResultExt<T> {
    /// Usage: `query.execute(pool).await.map_repo_error("Save streak")?`
    fn map_repo_error(self, context: &str) -> Result<T, DomainError>;
}

impl<T> ResultExt<T> for Result<T, sqlx::Error> {
    fn map_repo_error(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| match e {
            sqlx::Error::PoolTimedOut => {
                DomainError::Timeout(format!("{}: connection pool timed out", context))
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                DomainError::NotFound(format!("{}: {}", context, db.message()))
            }
            sqlx::Error::Io(io) => DomainError::Persistence(format!("{}: {}", context, io)),
            other => DomainError::Repository(format!("{}: {}", context, other)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_maps_to_timeout() {
        let result: Result<(), sqlx::Error> = Err(sqlx::Error::PoolTimedOut);
        match result.map_repo_error("Find user") {
            Err(DomainError::Timeout(msg)) => assert!(msg.starts_with("Find user")),
            other => panic!("Expected Timeout, got {:?}", other),
        }
    }

    #[test]
    fn test_other_errors_map_to_repository() {
        let result: Result<(), sqlx::Error> = Err(sqlx::Error::RowNotFound);
        assert!(matches!(
            result.map_repo_error("Load"),
            Err(DomainError::Repository(_))
        ));
    }
}
