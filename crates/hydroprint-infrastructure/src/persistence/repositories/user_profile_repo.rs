use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::{FromRow, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use hydroprint_domain::shared::{DomainError, UserId};
use hydroprint_domain::user::{UserProfile, UserProfileRepository};

#[derive(FromRow)]
struct UserRow {
    id: String,
    display_name: String,
    household_size: Option<i64>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_profile(self) -> UserProfile {
        UserProfile::restore(
            UserId::from_string(&self.id),
            self.display_name,
            self.household_size,
            self.created_at,
        )
    }
}

pub(crate) fn save_query(profile: &UserProfile) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    let query = r#"
        INSERT INTO users (id, display_name, household_size, created_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(id) DO UPDATE SET
            display_name = ?2,
            household_size = ?3
    "#;

    sqlx::query(query)
        .bind(profile.id().as_str())
        .bind(profile.display_name())
        .bind(profile.household_size())
        .bind(profile.created_at())
}

pub struct SqliteUserProfileRepository {
    base: SqliteRepositoryBase,
}

impl SqliteUserProfileRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl UserProfileRepository for SqliteUserProfileRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let query =
            "SELECT id, display_name, household_size, created_at FROM users WHERE id = ?1";

        let row: Option<UserRow> = self
            .base
            .fetch_optional(sqlx::query_as(query).bind(id.as_str()), "Find user by ID")
            .await?;

        Ok(row.map(|r| r.into_profile()))
    }

    async fn save(&self, profile: &UserProfile) -> Result<(), DomainError> {
        self.base.execute(save_query(profile), "Save user").await?;
        Ok(())
    }
}
