use async_trait::async_trait;

use super::StreakState;
use crate::shared::{DomainError, UserId};

/// Read side only; writes go through `TransactionContext::save_streak`
#[async_trait]
pub trait StreakRepository: Send + Sync {
    /// Find the stored streak for a user. `None` means no log yet.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<StreakState>, DomainError>;
}
