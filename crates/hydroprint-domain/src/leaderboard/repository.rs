use async_trait::async_trait;

use super::LeaderboardEntry;
use crate::shared::DomainError;

#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// All published entries, unordered.
    async fn list_all(&self) -> Result<Vec<LeaderboardEntry>, DomainError>;
}
