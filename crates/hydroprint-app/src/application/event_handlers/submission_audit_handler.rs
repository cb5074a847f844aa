use async_trait::async_trait;
use tracing::info;

use hydroprint_domain::events::footprint_events::{
    DailyLogSubmitted, StreakReset, WeeklyLogSubmitted,
};
use hydroprint_domain::events::EventHandler;
use hydroprint_domain::shared::DomainError;

/// Writes one structured audit record per submission event
#[derive(Default)]
pub struct SubmissionAuditHandler;

impl SubmissionAuditHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventHandler<DailyLogSubmitted> for SubmissionAuditHandler {
    async fn handle(&self, event: &DailyLogSubmitted) -> Result<(), DomainError> {
        info!(
            target: "hydroprint::audit",
            user_id = %event.user_id,
            log_date = %event.log_date,
            grand_total = event.grand_total,
            current_streak = event.current_streak,
            total_points = event.total_points,
            "daily log submitted"
        );
        Ok(())
    }
}

#[async_trait]
impl EventHandler<WeeklyLogSubmitted> for SubmissionAuditHandler {
    async fn handle(&self, event: &WeeklyLogSubmitted) -> Result<(), DomainError> {
        info!(
            target: "hydroprint::audit",
            user_id = %event.user_id,
            log_date = %event.log_date,
            grand_total = event.grand_total,
            monthly_usage = event.monthly_usage,
            "weekly log submitted"
        );
        Ok(())
    }
}

#[async_trait]
impl EventHandler<StreakReset> for SubmissionAuditHandler {
    async fn handle(&self, event: &StreakReset) -> Result<(), DomainError> {
        info!(
            target: "hydroprint::audit",
            user_id = %event.user_id,
            previous_streak = event.previous_streak,
            log_date = %event.log_date,
            "streak reset"
        );
        Ok(())
    }
}
