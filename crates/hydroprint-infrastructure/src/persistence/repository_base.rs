use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{SqliteArguments, SqliteQueryResult, SqliteRow};
use sqlx::{FromRow, Sqlite, SqlitePool};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::ResultExt;
use crate::config::TimeoutConfig;
use hydroprint_domain::shared::DomainError;

/// Shared plumbing for the SQLite repositories: every call is bounded by the
/// query timeout and errors carry the operation context.
pub struct SqliteRepositoryBase {
    pool: Arc<SqlitePool>,
    query_timeout: Duration,
}

impl SqliteRepositoryBase {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            pool,
            query_timeout: TimeoutConfig::global().db_query,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn execute<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<SqliteQueryResult, DomainError> {
        bounded(self.query_timeout, query.execute(self.pool()), context).await
    }

    pub async fn fetch_optional<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<Option<T>, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        bounded(self.query_timeout, query.fetch_optional(self.pool()), context).await
    }

    pub async fn fetch_all<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<Vec<T>, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        bounded(self.query_timeout, query.fetch_all(self.pool()), context).await
    }
}

/// Runs `fut` under `limit`; sqlx errors and the elapsed limit both come back
/// as domain errors tagged with `context`.
pub(crate) async fn bounded<T, F>(limit: Duration, fut: F, context: &str) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_repo_error(context),
        Err(_) => Err(DomainError::Timeout(format!(
            "{} exceeded {:?}",
            context, limit
        ))),
    }
}
