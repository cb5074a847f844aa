use log::info;
use std::sync::Arc;

use crate::application::dtos::StreakStatsDto;
use crate::application::Clock;
use hydroprint_domain::shared::{DomainError, UserId};
use hydroprint_domain::streak::StreakRepository;
use hydroprint_domain::user::UserProfileRepository;

pub struct StreakQueries {
    streaks: Arc<dyn StreakRepository>,
    users: Arc<dyn UserProfileRepository>,
    clock: Arc<dyn Clock>,
}

impl StreakQueries {
    pub fn new(
        streaks: Arc<dyn StreakRepository>,
        users: Arc<dyn UserProfileRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            streaks,
            users,
            clock,
        }
    }

    /// Get streak statistics for a single user
    pub async fn stats(&self, user_id: &UserId) -> Result<StreakStatsDto, DomainError> {
        let profile = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))?;
        let state = self.streaks.find_by_user(user_id).await?.unwrap_or_default();

        let dto = StreakStatsDto::from_state(
            user_id,
            profile.display_name(),
            &state,
            self.clock.today(),
        );

        info!(
            "[streak] stats user_id={} current={} longest={} points={} alive={}",
            dto.user_id, dto.current_streak, dto.longest_streak, dto.total_points, dto.is_alive
        );
        Ok(dto)
    }
}
