use serde::{Deserialize, Serialize};

use hydroprint_domain::leaderboard::RankedEntry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntryDto {
    pub rank: u32,
    pub user_id: String,
    pub display_name: String,
    pub monthly_usage: i64,
    pub updated_at: String,
}

impl From<RankedEntry> for LeaderboardEntryDto {
    fn from(ranked: RankedEntry) -> Self {
        Self {
            rank: ranked.rank,
            user_id: ranked.entry.user_id.to_string(),
            display_name: ranked.entry.display_name,
            monthly_usage: ranked.entry.monthly_usage,
            updated_at: ranked.entry.updated_at.to_rfc3339(),
        }
    }
}
