use serde::{Deserialize, Serialize};

use super::{FootprintDto, StreakStatsDto};
use hydroprint_domain::footprint::UsageInputs;
use hydroprint_domain::submission::{PeriodType, WindowStatus};
use hydroprint_domain::user::UserProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub user_id: String,
    pub display_name: String,
    pub household_size: Option<i64>,
    pub created_at: String,
}

impl From<&UserProfile> for UserDto {
    fn from(profile: &UserProfile) -> Self {
        Self {
            user_id: profile.id().to_string(),
            display_name: profile.display_name().to_string(),
            household_size: profile.household_size(),
            created_at: profile.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowStatusDto {
    pub period: PeriodType,
    pub is_new_period: bool,
    pub is_submitted: bool,
    pub last_updated: Option<String>, // RFC 3339
}

impl From<WindowStatus> for WindowStatusDto {
    fn from(status: WindowStatus) -> Self {
        Self {
            period: status.period,
            is_new_period: status.is_new_period,
            is_submitted: status.is_submitted,
            last_updated: status.last_updated.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardDto {
    pub user_id: String,
    pub display_name: String,
    pub household_size: u32,
    pub inputs: UsageInputs,
    pub footprint: FootprintDto,
    pub streak: StreakStatsDto,
    pub daily: WindowStatusDto,
    pub weekly: WindowStatusDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySubmissionDto {
    pub log_id: String,
    pub log_date: String, // YYYY-MM-DD
    pub grand_total: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_points: u32,
    pub streak_reset_from: Option<u32>,
    /// Today's log already existed; it was replaced and the streak left as is
    pub already_logged: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySubmissionDto {
    pub log_id: String,
    pub log_date: String,
    pub footprint: FootprintDto,
    pub monthly_usage: i64,
}
