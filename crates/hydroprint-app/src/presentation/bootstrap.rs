use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::event_handlers::SubmissionAuditHandler;
use crate::application::queries::{LeaderboardQueries, StreakQueries, UsageTrendQueries};
use crate::application::services::{ConfigService, DashboardRepositories, DashboardService};
use crate::application::{Clock, SystemClock};
use crate::presentation::state::{AppState, Queries, Services};
use hydroprint_domain::events::footprint_events::{
    DailyLogSubmitted, StreakReset, WeeklyLogSubmitted,
};
use hydroprint_domain::events::TypedEventHandlerWrapper;
use hydroprint_domain::shared::DomainError;
use hydroprint_infrastructure::events::InMemoryEventBus;
use hydroprint_infrastructure::persistence::repositories::{
    SqliteLeaderboardRepository, SqliteStreakRepository, SqliteSubmissionWindowRepository,
    SqliteUsageLogRepository, SqliteUserProfileRepository,
};
use hydroprint_infrastructure::persistence::{Database, SqliteUnitOfWork};

/// Open the configured database file and wire the app on the system clock
pub async fn open_app_state(
    config: &ConfigService,
    database_override: Option<&std::path::Path>,
) -> Result<AppState, DomainError> {
    let db_path = database_override
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| config.database_path());

    let started_at = Instant::now();
    let db = Database::new(&db_path.to_string_lossy()).await?;
    info!(
        "Database ready at {:?} in {}ms",
        db_path,
        started_at.elapsed().as_millis()
    );

    build_app_state(db, Arc::new(SystemClock)).await
}

/// Run migrations and wire repositories, services, queries and event handlers
pub async fn build_app_state(db: Database, clock: Arc<dyn Clock>) -> Result<AppState, DomainError> {
    db.run_migrations().await?;

    let pool = Arc::new(db.pool().clone());

    let users = Arc::new(SqliteUserProfileRepository::new(pool.clone()));
    let logs = Arc::new(SqliteUsageLogRepository::new(pool.clone()));
    let streaks = Arc::new(SqliteStreakRepository::new(pool.clone()));
    let windows = Arc::new(SqliteSubmissionWindowRepository::new(pool.clone()));
    let leaderboard = Arc::new(SqliteLeaderboardRepository::new(pool.clone()));

    let unit_of_work = Arc::new(SqliteUnitOfWork::new(pool));
    let event_bus = audit_event_bus().await;

    let dashboard = Arc::new(DashboardService::new(
        DashboardRepositories {
            users: users.clone(),
            logs: logs.clone(),
            streaks: streaks.clone(),
            windows,
            unit_of_work,
        },
        event_bus,
        clock.clone(),
    ));

    let queries = Queries {
        leaderboard: Arc::new(LeaderboardQueries::new(leaderboard)),
        trend: Arc::new(UsageTrendQueries::new(logs, clock.clone())),
        streak: Arc::new(StreakQueries::new(streaks, users, clock.clone())),
    };

    Ok(AppState {
        services: Services { dashboard },
        queries,
    })
}

/// Event bus with the audit handler subscribed to every submission event.
/// The handler implements several `EventHandler<E>`, so each wrapper names
/// its event type.
async fn audit_event_bus() -> Arc<InMemoryEventBus> {
    let event_bus = Arc::new(InMemoryEventBus::new());
    event_bus
        .subscribe::<DailyLogSubmitted>(Arc::new(
            TypedEventHandlerWrapper::<DailyLogSubmitted, _>::new(SubmissionAuditHandler::new()),
        ))
        .await;
    event_bus
        .subscribe::<WeeklyLogSubmitted>(Arc::new(
            TypedEventHandlerWrapper::<WeeklyLogSubmitted, _>::new(SubmissionAuditHandler::new()),
        ))
        .await;
    event_bus
        .subscribe::<StreakReset>(Arc::new(
            TypedEventHandlerWrapper::<StreakReset, _>::new(SubmissionAuditHandler::new()),
        ))
        .await;
    event_bus
}
