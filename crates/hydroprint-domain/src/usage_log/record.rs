use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::footprint::{calculate, HouseholdContext, UsageInputs};
use crate::shared::{UserId, DATE_FORMAT};
use crate::submission::PeriodType;

/// A submitted inputs snapshot.
///
/// One log exists per user, period type and local calendar date; the id is
/// derived from those so a resubmission on the same date replaces the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageLog {
    id: String,
    user_id: UserId,
    period: PeriodType,
    period_date: NaiveDate,
    inputs: UsageInputs,
    household_size: u32,
    grand_total: f64,
    submitted_at: DateTime<Utc>,
}

impl UsageLog {
    pub fn new(
        user_id: UserId,
        period: PeriodType,
        period_date: NaiveDate,
        inputs: UsageInputs,
        household: &HouseholdContext,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let grand_total = calculate(&inputs, household).grand_total;
        Self {
            id: Self::log_id(&user_id, period, period_date),
            user_id,
            period,
            period_date,
            inputs,
            household_size: household.divisor(),
            grand_total,
            submitted_at,
        }
    }

    pub fn restore(
        id: String,
        user_id: UserId,
        period: PeriodType,
        period_date: NaiveDate,
        inputs: UsageInputs,
        household_size: u32,
        grand_total: f64,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            period,
            period_date,
            inputs,
            household_size,
            grand_total,
            submitted_at,
        }
    }

    pub fn log_id(user_id: &UserId, period: PeriodType, period_date: NaiveDate) -> String {
        format!(
            "{}:{}:{}",
            user_id.as_str(),
            period.as_str(),
            period_date.format(DATE_FORMAT)
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn period(&self) -> PeriodType {
        self.period
    }

    pub fn period_date(&self) -> NaiveDate {
        self.period_date
    }

    pub fn inputs(&self) -> &UsageInputs {
        &self.inputs
    }

    pub fn household_size(&self) -> u32 {
        self.household_size
    }

    pub fn household(&self) -> HouseholdContext {
        HouseholdContext::new(i64::from(self.household_size))
    }

    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}
