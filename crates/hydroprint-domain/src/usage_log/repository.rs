use async_trait::async_trait;
use chrono::NaiveDate;

use super::UsageLog;
use crate::shared::{DomainError, UserId};
use crate::submission::PeriodType;

#[async_trait]
pub trait UsageLogRepository: Send + Sync {
    /// Find the most recently submitted log of a period type.
    async fn find_latest(
        &self,
        user_id: &UserId,
        period: PeriodType,
    ) -> Result<Option<UsageLog>, DomainError>;

    /// List logs with `start <= period_date <= end`, oldest first.
    async fn list_in_range(
        &self,
        user_id: &UserId,
        period: PeriodType,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<UsageLog>, DomainError>;
}
