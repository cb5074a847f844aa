use super::category::Category;
use super::inputs::{HouseholdContext, UsageInputs};
use super::rates::{RateTable, STANDARD_RATES};
use super::result::{CategoryContribution, FootprintResult};

/// Maps a usage snapshot to weekly gallons.
///
/// Stateless; safe to call on every keystroke and from any thread.
#[derive(Debug, Clone, Copy)]
pub struct FootprintCalculator {
    rates: &'static RateTable,
}

impl Default for FootprintCalculator {
    fn default() -> Self {
        Self::new(&STANDARD_RATES)
    }
}

impl FootprintCalculator {
    pub fn new(rates: &'static RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &'static RateTable {
        self.rates
    }

    pub fn category_gallons(
        &self,
        category: Category,
        inputs: &UsageInputs,
        household: &HouseholdContext,
    ) -> f64 {
        let rate = self.rates.rate_for(category);
        let units = inputs.get(rate.field);
        if units == 0 {
            return 0.0;
        }
        let raw = f64::from(units) * rate.gallons_per_unit;
        rate.normalization.to_weekly(raw, household.divisor())
    }

    pub fn calculate(&self, inputs: &UsageInputs, household: &HouseholdContext) -> FootprintResult {
        let breakdown = Category::ALL
            .iter()
            .map(|category| CategoryContribution {
                category: *category,
                gallons: self.category_gallons(*category, inputs, household),
            })
            .collect();

        FootprintResult::from_breakdown(breakdown)
    }
}

/// Calculate with the standard rate table
pub fn calculate(inputs: &UsageInputs, household: &HouseholdContext) -> FootprintResult {
    FootprintCalculator::default().calculate(inputs, household)
}
