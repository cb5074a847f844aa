use log::info;
use std::sync::Arc;

use crate::application::dtos::LeaderboardEntryDto;
use hydroprint_domain::leaderboard::{rank_entries, LeaderboardRepository};
use hydroprint_domain::shared::{DomainError, UserId};

pub const MAX_LEADERBOARD_LIMIT: usize = 500;

pub struct LeaderboardQueries {
    repo: Arc<dyn LeaderboardRepository>,
}

impl LeaderboardQueries {
    pub fn new(repo: Arc<dyn LeaderboardRepository>) -> Self {
        Self { repo }
    }

    /// Lowest monthly usage first; tied usage shares a rank
    pub async fn top(&self, limit: usize) -> Result<Vec<LeaderboardEntryDto>, DomainError> {
        if limit == 0 || limit > MAX_LEADERBOARD_LIMIT {
            return Err(DomainError::Validation(format!(
                "Limit must be between 1 and {}",
                MAX_LEADERBOARD_LIMIT
            )));
        }

        let entries = self.repo.list_all().await?;
        let total = entries.len();
        let top: Vec<LeaderboardEntryDto> = rank_entries(entries)
            .into_iter()
            .take(limit)
            .map(LeaderboardEntryDto::from)
            .collect();

        info!(
            "[leaderboard] top limit={} returned={} total={}",
            limit,
            top.len(),
            total
        );
        Ok(top)
    }

    /// `None` when the user never submitted a weekly log
    pub async fn rank_of(
        &self,
        user_id: &UserId,
    ) -> Result<Option<LeaderboardEntryDto>, DomainError> {
        let entries = self.repo.list_all().await?;

        Ok(rank_entries(entries)
            .into_iter()
            .find(|ranked| &ranked.entry.user_id == user_id)
            .map(LeaderboardEntryDto::from))
    }
}
