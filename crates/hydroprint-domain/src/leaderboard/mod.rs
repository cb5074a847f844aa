mod ranking;
mod repository;

pub use ranking::{rank_entries, LeaderboardEntry, RankedEntry};
pub use repository::LeaderboardRepository;
