use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteQueryResult};
use sqlx::{FromRow, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use hydroprint_domain::shared::{DomainError, UserId};
use hydroprint_domain::streak::{StreakRepository, StreakState};

#[derive(FromRow)]
struct StreakRow {
    current_streak: i64,
    longest_streak: i64,
    last_log_date: Option<NaiveDate>,
    total_points: i64,
}

fn to_count(value: i64, column: &str) -> Result<u32, DomainError> {
    u32::try_from(value)
        .map_err(|_| DomainError::Validation(format!("Invalid {} value: {}", column, value)))
}

impl StreakRow {
    fn into_state(self) -> Result<StreakState, DomainError> {
        StreakState::restore(
            to_count(self.current_streak, "current_streak")?,
            to_count(self.longest_streak, "longest_streak")?,
            self.last_log_date,
            to_count(self.total_points, "total_points")?,
        )
    }
}

/// Compare-and-swap on `last_log_date`. A first save inserts the row or
/// updates one that was never logged; later saves only match the date the
/// caller read. Pair with [`check_swapped`].
pub(crate) fn swap_query<'q>(
    user_id: &'q UserId,
    state: &StreakState,
    expected_last_log_date: Option<NaiveDate>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match expected_last_log_date {
        None => {
            let query = r#"
                INSERT INTO streaks (user_id, current_streak, longest_streak, last_log_date, total_points, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT(user_id) DO UPDATE SET
                    current_streak = excluded.current_streak,
                    longest_streak = excluded.longest_streak,
                    last_log_date = excluded.last_log_date,
                    total_points = excluded.total_points,
                    updated_at = excluded.updated_at
                WHERE streaks.last_log_date IS NULL
            "#;

            sqlx::query(query)
                .bind(user_id.as_str())
                .bind(i64::from(state.current_streak()))
                .bind(i64::from(state.longest_streak()))
                .bind(state.last_log_date())
                .bind(i64::from(state.total_points()))
                .bind(Utc::now())
        }
        Some(expected) => {
            let query = r#"
                UPDATE streaks SET
                    current_streak = ?2,
                    longest_streak = ?3,
                    last_log_date = ?4,
                    total_points = ?5,
                    updated_at = ?6
                WHERE user_id = ?1 AND last_log_date = ?7
            "#;

            sqlx::query(query)
                .bind(user_id.as_str())
                .bind(i64::from(state.current_streak()))
                .bind(i64::from(state.longest_streak()))
                .bind(state.last_log_date())
                .bind(i64::from(state.total_points()))
                .bind(Utc::now())
                .bind(expected)
        }
    }
}

/// No matched row means another writer moved the streak first
pub(crate) fn check_swapped(
    result: &SqliteQueryResult,
    user_id: &UserId,
    expected_last_log_date: Option<NaiveDate>,
) -> Result<(), DomainError> {
    if result.rows_affected() == 0 {
        log::warn!(
            "[streak] CAS lost for user {} (expected last_log_date {:?})",
            user_id,
            expected_last_log_date
        );
        return Err(DomainError::ConcurrentModification(format!(
            "Streak for user {} changed since it was read",
            user_id
        )));
    }

    Ok(())
}

pub struct SqliteStreakRepository {
    base: SqliteRepositoryBase,
}

impl SqliteStreakRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl StreakRepository for SqliteStreakRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<StreakState>, DomainError> {
        let query = "SELECT current_streak, longest_streak, last_log_date, total_points FROM streaks WHERE user_id = ?1";

        let row: Option<StreakRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query).bind(user_id.as_str()),
                "Find streak by user",
            )
            .await?;

        row.map(|r| r.into_state()).transpose()
    }
}
