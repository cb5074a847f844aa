#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use hydroprint_domain::shared::{DomainError, UnitOfWork, UserId};
use hydroprint_domain::streak::StreakState;
use hydroprint_domain::submission::SubmissionWindow;
use hydroprint_domain::usage_log::UsageLog;
use hydroprint_domain::user::{UserProfile, UserProfileRepository};
use hydroprint_infrastructure::persistence::repositories::SqliteUserProfileRepository;
use hydroprint_infrastructure::persistence::{Database, SqliteUnitOfWork};

/// Fresh in-memory database with all migrations applied
pub async fn setup_in_memory_db() -> Arc<SqlitePool> {
    let db = Database::in_memory().await.expect("open in-memory db");
    db.run_migrations().await.expect("run migrations");
    Arc::new(db.pool().clone())
}

/// Insert a user row so foreign keys resolve
pub async fn seed_user(pool: &Arc<SqlitePool>, name: &str, household_size: Option<i64>) -> UserId {
    let repo = SqliteUserProfileRepository::new(pool.clone());
    let profile = UserProfile::restore(UserId::new(), name.to_string(), household_size, Utc::now());
    repo.save(&profile).await.expect("seed user");
    profile.id().clone()
}

// Single-write transactions. A staged write that fails is dropped without
// commit, which rolls it back.

pub async fn save_log(pool: &Arc<SqlitePool>, log: &UsageLog) -> Result<(), DomainError> {
    let mut tx = SqliteUnitOfWork::new(pool.clone()).begin().await?;
    tx.save_usage_log(log).await?;
    tx.commit().await
}

pub async fn save_streak(
    pool: &Arc<SqlitePool>,
    user_id: &UserId,
    state: &StreakState,
    expected: Option<NaiveDate>,
) -> Result<(), DomainError> {
    let mut tx = SqliteUnitOfWork::new(pool.clone()).begin().await?;
    tx.save_streak(user_id, state, expected).await?;
    tx.commit().await
}

pub async fn save_window(
    pool: &Arc<SqlitePool>,
    user_id: &UserId,
    window: &SubmissionWindow,
) -> Result<(), DomainError> {
    let mut tx = SqliteUnitOfWork::new(pool.clone()).begin().await?;
    tx.save_window(user_id, window).await?;
    tx.commit().await
}

pub async fn publish_usage(
    pool: &Arc<SqlitePool>,
    user_id: &UserId,
    monthly_usage: i64,
    updated_at: DateTime<Utc>,
) -> Result<(), DomainError> {
    let mut tx = SqliteUnitOfWork::new(pool.clone()).begin().await?;
    tx.update_public_usage(user_id, monthly_usage, updated_at)
        .await?;
    tx.commit().await
}
