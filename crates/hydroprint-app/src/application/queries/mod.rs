mod leaderboard_queries;
mod streak_queries;
mod usage_trend_queries;

pub use leaderboard_queries::{LeaderboardQueries, MAX_LEADERBOARD_LIMIT};
pub use streak_queries::StreakQueries;
pub use usage_trend_queries::{UsageTrendQueries, MAX_TREND_DAYS};
