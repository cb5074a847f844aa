pub mod leaderboard_repo;
pub mod streak_repo;
pub mod submission_window_repo;
pub mod usage_log_repo;
pub mod user_profile_repo;

pub use leaderboard_repo::SqliteLeaderboardRepository;
pub use streak_repo::SqliteStreakRepository;
pub use submission_window_repo::SqliteSubmissionWindowRepository;
pub use usage_log_repo::SqliteUsageLogRepository;
pub use user_profile_repo::SqliteUserProfileRepository;
