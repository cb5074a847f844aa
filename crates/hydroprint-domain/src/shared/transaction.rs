use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use super::{DomainError, UserId};
use crate::streak::StreakState;
use crate::submission::SubmissionWindow;
use crate::usage_log::UsageLog;
use crate::user::UserProfile;

/// Writes staged inside one transaction. Nothing is visible to readers until
/// `commit`; dropping the context without committing discards everything.
#[async_trait]
pub trait TransactionContext: Send {
    /// Upsert a log by its deterministic id
    async fn save_usage_log(&mut self, log: &UsageLog) -> Result<(), DomainError>;

    /// Store `state` only if the stored `last_log_date` still equals
    /// `expected_last_log_date` (`None` = never logged). A lost race returns
    /// `DomainError::ConcurrentModification`.
    async fn save_streak(
        &mut self,
        user_id: &UserId,
        state: &StreakState,
        expected_last_log_date: Option<NaiveDate>,
    ) -> Result<(), DomainError>;

    /// Upsert the window keyed by user and period type
    async fn save_window(
        &mut self,
        user_id: &UserId,
        window: &SubmissionWindow,
    ) -> Result<(), DomainError>;

    /// Publish (upsert) a user's monthly usage estimate
    async fn update_public_usage(
        &mut self,
        user_id: &UserId,
        monthly_usage: i64,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    async fn save_profile(&mut self, profile: &UserProfile) -> Result<(), DomainError>;

    async fn commit(self: Box<Self>) -> Result<(), DomainError>;

    async fn rollback(self: Box<Self>) -> Result<(), DomainError>;
}

/// Unit of Work: opens the transactional boundary for a group of writes
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn TransactionContext>, DomainError>;
}
