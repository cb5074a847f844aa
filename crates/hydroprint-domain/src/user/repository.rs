use async_trait::async_trait;

use super::UserProfile;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    /// Save (upsert) a profile.
    async fn save(&self, profile: &UserProfile) -> Result<(), DomainError>;
}
