use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use hydroprint_domain::shared::{UserId, DATE_FORMAT};
use hydroprint_domain::streak::StreakState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakStatsDto {
    pub user_id: String,
    pub display_name: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_points: u32,
    pub last_log_date: Option<String>, // ISO 8601 date (YYYY-MM-DD)
    /// Logged today or yesterday
    pub is_alive: bool,
    pub logged_today: bool,
}

impl StreakStatsDto {
    pub fn from_state(
        user_id: &UserId,
        display_name: &str,
        state: &StreakState,
        today: NaiveDate,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            display_name: display_name.to_string(),
            current_streak: state.current_streak(),
            longest_streak: state.longest_streak(),
            total_points: state.total_points(),
            last_log_date: state
                .last_log_date()
                .map(|d| d.format(DATE_FORMAT).to_string()),
            is_alive: state.is_alive_on(today),
            logged_today: state.has_logged_on(today),
        }
    }
}
