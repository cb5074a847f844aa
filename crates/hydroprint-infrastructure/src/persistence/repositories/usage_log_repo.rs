use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::{FromRow, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use hydroprint_domain::footprint::UsageInputs;
use hydroprint_domain::shared::{DomainError, UserId};
use hydroprint_domain::submission::PeriodType;
use hydroprint_domain::usage_log::{UsageLog, UsageLogRepository};

const LOG_COLUMNS: &str =
    "id, user_id, period, period_date, inputs, household_size, grand_total, submitted_at";

#[derive(FromRow)]
struct UsageLogRow {
    id: String,
    user_id: String,
    period: String,
    period_date: NaiveDate,
    inputs: String,
    household_size: i64,
    grand_total: f64,
    submitted_at: DateTime<Utc>,
}

impl UsageLogRow {
    fn into_log(self) -> Result<UsageLog, DomainError> {
        let period: PeriodType = self.period.parse()?;
        let inputs: UsageInputs = serde_json::from_str(&self.inputs).map_err(|e| {
            DomainError::Serialization(format!("Invalid inputs for log {}: {}", self.id, e))
        })?;
        let household_size = u32::try_from(self.household_size).map_err(|_| {
            DomainError::Validation(format!(
                "Invalid household size {} for log {}",
                self.household_size, self.id
            ))
        })?;

        Ok(UsageLog::restore(
            self.id,
            UserId::from_string(&self.user_id),
            period,
            self.period_date,
            inputs,
            household_size,
            self.grand_total,
            self.submitted_at,
        ))
    }
}

/// Upsert for a log snapshot. Same user, period and date resolve to the same
/// id, so a resubmission replaces the earlier snapshot.
pub(crate) fn save_query(log: &UsageLog) -> Result<Query<'_, Sqlite, SqliteArguments<'_>>, DomainError> {
    let inputs = serde_json::to_string(log.inputs())
        .map_err(|e| DomainError::Serialization(e.to_string()))?;

    let query = r#"
        INSERT INTO usage_logs (id, user_id, period, period_date, inputs, household_size, grand_total, submitted_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        ON CONFLICT(id) DO UPDATE SET
            inputs = ?5,
            household_size = ?6,
            grand_total = ?7,
            submitted_at = ?8
    "#;

    Ok(sqlx::query(query)
        .bind(log.id())
        .bind(log.user_id().as_str())
        .bind(log.period().as_str())
        .bind(log.period_date())
        .bind(inputs)
        .bind(i64::from(log.household_size()))
        .bind(log.grand_total())
        .bind(log.submitted_at()))
}

pub struct SqliteUsageLogRepository {
    base: SqliteRepositoryBase,
}

impl SqliteUsageLogRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl UsageLogRepository for SqliteUsageLogRepository {
    async fn find_latest(
        &self,
        user_id: &UserId,
        period: PeriodType,
    ) -> Result<Option<UsageLog>, DomainError> {
        let query = format!(
            "SELECT {} FROM usage_logs WHERE user_id = ?1 AND period = ?2 ORDER BY period_date DESC, submitted_at DESC LIMIT 1",
            LOG_COLUMNS
        );

        let row: Option<UsageLogRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query)
                    .bind(user_id.as_str())
                    .bind(period.as_str()),
                "Find latest usage log",
            )
            .await?;

        row.map(|r| r.into_log()).transpose()
    }

    async fn list_in_range(
        &self,
        user_id: &UserId,
        period: PeriodType,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<UsageLog>, DomainError> {
        let query = format!(
            "SELECT {} FROM usage_logs WHERE user_id = ?1 AND period = ?2 AND period_date >= ?3 AND period_date <= ?4 ORDER BY period_date ASC",
            LOG_COLUMNS
        );

        let rows: Vec<UsageLogRow> = self
            .base
            .fetch_all(
                sqlx::query_as(&query)
                    .bind(user_id.as_str())
                    .bind(period.as_str())
                    .bind(start)
                    .bind(end),
                "List usage logs in range",
            )
            .await?;

        rows.into_iter().map(|r| r.into_log()).collect()
    }
}
