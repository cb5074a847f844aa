use std::sync::Arc;

use crate::application::queries::{LeaderboardQueries, StreakQueries, UsageTrendQueries};
use crate::application::services::DashboardService;

pub struct Services {
    pub dashboard: Arc<DashboardService>,
}

pub struct Queries {
    pub leaderboard: Arc<LeaderboardQueries>,
    pub trend: Arc<UsageTrendQueries>,
    pub streak: Arc<StreakQueries>,
}

/// Everything a CLI command needs, wired once per invocation
pub struct AppState {
    pub services: Services,
    pub queries: Queries,
}
