use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::{FromRow, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use hydroprint_domain::shared::{DomainError, UserId};
use hydroprint_domain::submission::{PeriodType, SubmissionWindow, SubmissionWindowRepository};

#[derive(FromRow)]
struct WindowRow {
    period: String,
    last_updated: Option<DateTime<Utc>>,
    is_submitted: bool,
}

impl WindowRow {
    fn into_window(self) -> Result<SubmissionWindow, DomainError> {
        Ok(SubmissionWindow::restore(
            self.period.parse()?,
            self.last_updated,
            self.is_submitted,
        ))
    }
}

pub(crate) fn save_query<'q>(
    user_id: &'q UserId,
    window: &SubmissionWindow,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    let query = r#"
        INSERT INTO submission_windows (user_id, period, last_updated, is_submitted)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(user_id, period) DO UPDATE SET
            last_updated = ?3,
            is_submitted = ?4
    "#;

    sqlx::query(query)
        .bind(user_id.as_str())
        .bind(window.period().as_str())
        .bind(window.last_updated())
        .bind(window.stored_is_submitted())
}

pub struct SqliteSubmissionWindowRepository {
    base: SqliteRepositoryBase,
}

impl SqliteSubmissionWindowRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl SubmissionWindowRepository for SqliteSubmissionWindowRepository {
    async fn find(
        &self,
        user_id: &UserId,
        period: PeriodType,
    ) -> Result<Option<SubmissionWindow>, DomainError> {
        let query = "SELECT period, last_updated, is_submitted FROM submission_windows WHERE user_id = ?1 AND period = ?2";

        let row: Option<WindowRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query)
                    .bind(user_id.as_str())
                    .bind(period.as_str()),
                "Find submission window",
            )
            .await?;

        row.map(|r| r.into_window()).transpose()
    }
}
