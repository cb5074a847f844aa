use hydroprint_domain::footprint::{HouseholdContext, UsageInputs};
use hydroprint_domain::shared::UserId;
use hydroprint_domain::streak::StreakState;
use hydroprint_domain::submission::{PeriodType, SubmissionWindow};

/// In-memory snapshot of one user's dashboard.
///
/// Only `DashboardService` mutates it, and only after the matching writes
/// have succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSession {
    pub(super) user_id: UserId,
    pub(super) display_name: String,
    pub(super) household: HouseholdContext,
    pub(super) inputs: UsageInputs,
    pub(super) streak: StreakState,
    pub(super) daily_window: SubmissionWindow,
    pub(super) weekly_window: SubmissionWindow,
}

impl DashboardSession {
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn household(&self) -> &HouseholdContext {
        &self.household
    }

    pub fn inputs(&self) -> &UsageInputs {
        &self.inputs
    }

    pub fn streak(&self) -> &StreakState {
        &self.streak
    }

    pub fn window(&self, period: PeriodType) -> &SubmissionWindow {
        match period {
            PeriodType::Daily => &self.daily_window,
            PeriodType::Weekly => &self.weekly_window,
        }
    }

    pub(super) fn window_mut(&mut self, period: PeriodType) -> &mut SubmissionWindow {
        match period {
            PeriodType::Daily => &mut self.daily_window,
            PeriodType::Weekly => &mut self.weekly_window,
        }
    }
}
