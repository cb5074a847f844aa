use async_trait::async_trait;

use super::{PeriodType, SubmissionWindow};
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait SubmissionWindowRepository: Send + Sync {
    /// Find the stored window for a user and period type.
    async fn find(
        &self,
        user_id: &UserId,
        period: PeriodType,
    ) -> Result<Option<SubmissionWindow>, DomainError>;
}
