mod calculator;
mod category;
mod inputs;
mod rates;
mod result;

#[cfg(test)]
mod calculator_test;

pub use calculator::{calculate, FootprintCalculator};
pub use category::{Category, CategoryKind};
pub use inputs::{HouseholdContext, InputField, UsageInputs, DEFAULT_INPUTS};
pub use rates::{Normalization, Rate, RateTable, DAYS_PER_WEEK, STANDARD_RATES};
pub use result::{
    impact_score, trend_percent, CategoryContribution, FootprintResult, BASELINE_WEEKLY_GALLONS,
    GALLONS_PER_SCORE_POINT, IDEAL_WEEKLY_GALLONS, WEEKS_PER_MONTH,
};
