use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub display_name: String,
    /// Rounded gallons per month (weekly grand total x 4)
    pub monthly_usage: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: u32,
    pub entry: LeaderboardEntry,
}

/// Order by usage ascending (lower is better) with competition ranking:
/// tied usage shares a rank and the next rank skips (1, 2, 2, 4).
/// Ties are listed by display name for a stable order.
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>) -> Vec<RankedEntry> {
    entries.sort_by(|a, b| {
        a.monthly_usage
            .cmp(&b.monthly_usage)
            .then_with(|| a.display_name.cmp(&b.display_name))
    });

    let mut ranked: Vec<RankedEntry> = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(prev) if prev.entry.monthly_usage == entry.monthly_usage => prev.rank,
            _ => index as u32 + 1,
        };
        ranked.push(RankedEntry { rank, entry });
    }
    ranked
}
