mod dashboard_dto;
mod footprint_dto;
mod leaderboard_dto;
mod streak_dto;
mod trend_dto;

pub use dashboard_dto::{DashboardDto, DailySubmissionDto, UserDto, WeeklySubmissionDto, WindowStatusDto};
pub use footprint_dto::{CategoryGallonsDto, FootprintDto};
pub use leaderboard_dto::LeaderboardEntryDto;
pub use streak_dto::StreakStatsDto;
pub use trend_dto::{UsageTrendDto, UsageTrendPoint};
