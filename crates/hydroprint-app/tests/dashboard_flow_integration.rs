use chrono::{DateTime, Duration};
use std::sync::Arc;

use hydroprint_lib::application::dtos::{
    DailySubmissionDto, DashboardDto, LeaderboardEntryDto, StreakStatsDto, UsageTrendDto, UserDto,
    WeeklySubmissionDto,
};
use hydroprint_lib::application::FixedClock;
use hydroprint_lib::presentation::bootstrap::build_app_state;
use hydroprint_lib::presentation::cli::{execute, Commands, InputArgs, UserCommand};
use hydroprint_lib::presentation::state::AppState;
use hydroprint_infrastructure::persistence::Database;

async fn setup() -> (AppState, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(
        DateTime::parse_from_rfc3339("2024-05-10T09:00:00+02:00").unwrap(),
    ));
    let db = Database::in_memory().await.expect("open in-memory db");
    let state = build_app_state(db, clock.clone())
        .await
        .expect("build app state");
    (state, clock)
}

async fn run_json<T: serde::de::DeserializeOwned>(state: &AppState, command: Commands) -> T {
    let out = execute(command, state, true).await.expect("command succeeds");
    serde_json::from_str(&out).expect("valid json")
}

async fn create_user(state: &AppState, name: &str, household: Option<i64>) -> String {
    let user: UserDto = run_json(
        state,
        Commands::User {
            command: UserCommand::Create {
                name: name.to_string(),
                household,
            },
        },
    )
    .await;
    user.user_id
}

fn shower(minutes: u32) -> InputArgs {
    InputArgs {
        shower_minutes: Some(minutes),
        ..InputArgs::default()
    }
}

#[tokio::test]
async fn test_daily_logs_build_a_streak_across_days() {
    let (state, clock) = setup().await;
    let user = create_user(&state, "Ana", Some(2)).await;

    let first: DailySubmissionDto = run_json(
        &state,
        Commands::SubmitDaily {
            user: user.clone(),
            inputs: shower(10),
        },
    )
    .await;
    assert_eq!(first.log_date, "2024-05-10");
    assert_eq!(first.current_streak, 1);
    assert_eq!(first.streak_reset_from, None);

    // Same-day resubmission replaces the log without another point
    let again: DailySubmissionDto = run_json(
        &state,
        Commands::SubmitDaily {
            user: user.clone(),
            inputs: shower(20),
        },
    )
    .await;
    assert!(again.already_logged);
    assert_eq!(again.log_id, first.log_id);
    assert_eq!(again.current_streak, 1);
    assert_eq!(again.total_points, 1);

    let dashboard: DashboardDto = run_json(
        &state,
        Commands::Show {
            user: user.clone(),
            inputs: InputArgs::default(),
        },
    )
    .await;
    assert!(dashboard.daily.is_submitted);
    assert_eq!(dashboard.inputs.shower_minutes, 20);

    clock.advance(Duration::days(1));
    let second: DailySubmissionDto = run_json(
        &state,
        Commands::SubmitDaily {
            user: user.clone(),
            inputs: InputArgs::default(),
        },
    )
    .await;
    assert_eq!(second.current_streak, 2);
    assert_eq!(second.total_points, 2);

    clock.advance(Duration::days(4));
    let after_gap: DailySubmissionDto = run_json(
        &state,
        Commands::SubmitDaily {
            user: user.clone(),
            inputs: InputArgs::default(),
        },
    )
    .await;
    assert_eq!(after_gap.current_streak, 1);
    assert_eq!(after_gap.longest_streak, 2);
    assert_eq!(after_gap.streak_reset_from, Some(2));

    let stats: StreakStatsDto = run_json(&state, Commands::Streak { user: user.clone() }).await;
    assert_eq!(stats.total_points, 3);
    assert!(stats.logged_today);

    let trend: UsageTrendDto = run_json(&state, Commands::Trend { user, days: 7 }).await;
    assert_eq!(trend.data_points.len(), 7);
    assert_eq!(trend.logged_days, 3);
    assert_eq!(trend.end_date, "2024-05-15");
}

#[tokio::test]
async fn test_stored_inputs_survive_a_reload() {
    let (state, _clock) = setup().await;
    let user = create_user(&state, "Ben", None).await;

    let _: DailySubmissionDto = run_json(
        &state,
        Commands::SubmitDaily {
            user: user.clone(),
            inputs: shower(12),
        },
    )
    .await;

    let dashboard: DashboardDto = run_json(
        &state,
        Commands::Show {
            user: user.clone(),
            inputs: InputArgs::default(),
        },
    )
    .await;
    assert_eq!(dashboard.inputs.shower_minutes, 12);
    assert!(dashboard.daily.is_submitted);
    assert!(!dashboard.weekly.is_submitted);
    assert_eq!(dashboard.household_size, 1);

    // A preview edit is not written
    let preview: DashboardDto = run_json(
        &state,
        Commands::Show {
            user: user.clone(),
            inputs: shower(30),
        },
    )
    .await;
    assert_eq!(preview.inputs.shower_minutes, 30);
    assert!(!preview.daily.is_submitted);

    let reloaded: DashboardDto = run_json(
        &state,
        Commands::Show {
            user,
            inputs: InputArgs::default(),
        },
    )
    .await;
    assert_eq!(reloaded.inputs.shower_minutes, 12);
    assert!(reloaded.daily.is_submitted);
}

#[tokio::test]
async fn test_weekly_logs_rank_users_on_the_leaderboard() {
    let (state, _clock) = setup().await;
    let heavy = create_user(&state, "Heavy", None).await;
    let light = create_user(&state, "Light", Some(3)).await;

    let heavy_log: WeeklySubmissionDto = run_json(
        &state,
        Commands::SubmitWeekly {
            user: heavy.clone(),
            inputs: InputArgs {
                meat_meals: Some(21),
                ..InputArgs::default()
            },
        },
    )
    .await;
    let light_log: WeeklySubmissionDto = run_json(
        &state,
        Commands::SubmitWeekly {
            user: light.clone(),
            inputs: InputArgs::default(),
        },
    )
    .await;
    assert!(light_log.monthly_usage < heavy_log.monthly_usage);
    assert_eq!(heavy_log.monthly_usage, heavy_log.footprint.monthly_estimate);

    let top: Vec<LeaderboardEntryDto> = run_json(
        &state,
        Commands::Leaderboard {
            limit: 10,
            user: None,
        },
    )
    .await;
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].user_id, light);
    assert_eq!(top[0].rank, 1);
    assert_eq!(top[1].user_id, heavy);
    assert_eq!(top[1].rank, 2);

    let mine: Vec<LeaderboardEntryDto> = run_json(
        &state,
        Commands::Leaderboard {
            limit: 10,
            user: Some(heavy.clone()),
        },
    )
    .await;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].rank, 2);

    // Editing a weekly field reopens the submitted week
    let edited: DashboardDto = run_json(
        &state,
        Commands::Set {
            user: heavy.clone(),
            inputs: InputArgs {
                laundry_loads: Some(9),
                ..InputArgs::default()
            },
        },
    )
    .await;
    assert!(!edited.weekly.is_submitted);

    let reloaded: DashboardDto = run_json(
        &state,
        Commands::Show {
            user: heavy,
            inputs: InputArgs::default(),
        },
    )
    .await;
    assert!(!reloaded.weekly.is_submitted);
    // Set does not store a log, so the submitted snapshot is restored
    assert_eq!(reloaded.inputs.meat_meals, 21);
}

#[tokio::test]
async fn test_household_change_splits_shared_usage() {
    let (state, _clock) = setup().await;
    let user = create_user(&state, "Cleo", None).await;

    let alone: DashboardDto = run_json(
        &state,
        Commands::Show {
            user: user.clone(),
            inputs: InputArgs::default(),
        },
    )
    .await;

    let shared: DashboardDto = run_json(
        &state,
        Commands::Household {
            user: user.clone(),
            size: Some(4),
        },
    )
    .await;
    assert_eq!(shared.household_size, 4);
    assert!(shared.footprint.grand_total < alone.footprint.grand_total);

    let cleared: DashboardDto = run_json(&state, Commands::Household { user, size: Some(0) }).await;
    assert_eq!(cleared.household_size, 1);
    assert_eq!(cleared.footprint.grand_total, alone.footprint.grand_total);
}

#[tokio::test]
async fn test_unknown_user_is_reported() {
    let (state, _clock) = setup().await;

    let err = execute(
        Commands::Streak {
            user: "missing".to_string(),
        },
        &state,
        false,
    )
    .await
    .unwrap_err();

    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().starts_with("[2001]"));
}
