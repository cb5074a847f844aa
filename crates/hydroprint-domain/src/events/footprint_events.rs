use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::events::DomainEvent;
use crate::shared::UserId;

macro_rules! impl_domain_event {
    ($type:ty) => {
        impl DomainEvent for $type {
            fn as_any(&self) -> &(dyn Any + Send + Sync) {
                self
            }

            fn event_type_name(&self) -> &'static str {
                std::any::type_name::<Self>()
            }
        }
    };
}

/// Fired after a daily log, its streak and window are all persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLogSubmitted {
    pub user_id: UserId,
    pub log_date: NaiveDate,
    pub grand_total: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_points: u32,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(DailyLogSubmitted);

/// Fired after a weekly log is persisted and published to the leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyLogSubmitted {
    pub user_id: UserId,
    pub log_date: NaiveDate,
    pub grand_total: f64,
    pub monthly_usage: i64,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(WeeklyLogSubmitted);

/// A gap of more than one day broke an existing streak
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakReset {
    pub user_id: UserId,
    pub previous_streak: u32,
    pub log_date: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(StreakReset);
