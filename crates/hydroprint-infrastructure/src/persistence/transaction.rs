use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteQueryResult};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::sync::Arc;
use std::time::Duration;

use super::repositories::{
    leaderboard_repo, streak_repo, submission_window_repo, usage_log_repo, user_profile_repo,
};
use super::repository_base::bounded;
use crate::config::TimeoutConfig;
use hydroprint_domain::shared::{DomainError, TransactionContext, UnitOfWork, UserId};
use hydroprint_domain::streak::StreakState;
use hydroprint_domain::submission::SubmissionWindow;
use hydroprint_domain::usage_log::UsageLog;
use hydroprint_domain::user::UserProfile;

/// SQLite transaction context.
///
/// `Pool::begin` hands out an owned `Transaction<'static, _>`, so the context
/// can be boxed and moved across awaits. Dropping it without `commit` rolls
/// back.
pub struct SqliteTransactionContext {
    tx: Transaction<'static, Sqlite>,
    query_timeout: Duration,
}

impl SqliteTransactionContext {
    async fn execute<'q>(
        &mut self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<SqliteQueryResult, DomainError> {
        bounded(self.query_timeout, query.execute(&mut *self.tx), context).await
    }
}

#[async_trait]
impl TransactionContext for SqliteTransactionContext {
    async fn save_usage_log(&mut self, log: &UsageLog) -> Result<(), DomainError> {
        self.execute(usage_log_repo::save_query(log)?, "Save usage log")
            .await?;
        Ok(())
    }

    async fn save_streak(
        &mut self,
        user_id: &UserId,
        state: &StreakState,
        expected_last_log_date: Option<NaiveDate>,
    ) -> Result<(), DomainError> {
        let result = self
            .execute(
                streak_repo::swap_query(user_id, state, expected_last_log_date),
                "Save streak",
            )
            .await?;
        streak_repo::check_swapped(&result, user_id, expected_last_log_date)
    }

    async fn save_window(
        &mut self,
        user_id: &UserId,
        window: &SubmissionWindow,
    ) -> Result<(), DomainError> {
        self.execute(
            submission_window_repo::save_query(user_id, window),
            "Save submission window",
        )
        .await?;
        Ok(())
    }

    async fn update_public_usage(
        &mut self,
        user_id: &UserId,
        monthly_usage: i64,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.execute(
            leaderboard_repo::publish_query(user_id, monthly_usage, updated_at),
            "Update public usage",
        )
        .await?;
        Ok(())
    }

    async fn save_profile(&mut self, profile: &UserProfile) -> Result<(), DomainError> {
        self.execute(user_profile_repo::save_query(profile), "Save user")
            .await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let Self { tx, query_timeout } = *self;
        bounded(query_timeout, tx.commit(), "Commit transaction").await
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        let Self { tx, query_timeout } = *self;
        bounded(query_timeout, tx.rollback(), "Rollback transaction").await
    }
}

/// SQLite Unit of Work implementation
pub struct SqliteUnitOfWork {
    pool: Arc<SqlitePool>,
    query_timeout: Duration,
}

impl SqliteUnitOfWork {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            pool,
            query_timeout: TimeoutConfig::global().db_query,
        }
    }
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn begin(&self) -> Result<Box<dyn TransactionContext>, DomainError> {
        let tx = bounded(self.query_timeout, self.pool.begin(), "Begin transaction").await?;

        Ok(Box::new(SqliteTransactionContext {
            tx,
            query_timeout: self.query_timeout,
        }))
    }
}
