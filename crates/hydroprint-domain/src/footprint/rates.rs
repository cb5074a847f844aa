use serde::Serialize;

use super::category::Category;
use super::inputs::InputField;

pub const DAYS_PER_WEEK: f64 = 7.0;

/// How a raw counter is turned into a weekly figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Normalization {
    /// Reported per day, multiplied by seven
    Daily,
    /// Reported per week, used as-is
    Weekly,
    /// Reported per week for the whole household, divided by its size
    SharedWeekly,
}

impl Normalization {
    pub fn to_weekly(&self, gallons: f64, household_divisor: u32) -> f64 {
        match self {
            Normalization::Daily => gallons * DAYS_PER_WEEK,
            Normalization::Weekly => gallons,
            Normalization::SharedWeekly => gallons / f64::from(household_divisor.max(1)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rate {
    pub category: Category,
    pub field: InputField,
    /// Gallons per reported unit; negative for credits
    pub gallons_per_unit: f64,
    pub normalization: Normalization,
}

/// Fixed gallons-per-unit constants, one per category, in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTable {
    rates: [Rate; 13],
}

impl RateTable {
    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    pub fn rate_for(&self, category: Category) -> &Rate {
        // Entries are laid out in Category::ALL order
        let index = Category::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or_default();
        &self.rates[index]
    }
}

const fn rate(
    category: Category,
    field: InputField,
    gallons_per_unit: f64,
    normalization: Normalization,
) -> Rate {
    Rate {
        category,
        field,
        gallons_per_unit,
        normalization,
    }
}

pub static STANDARD_RATES: RateTable = RateTable {
    rates: [
        rate(Category::Showers, InputField::ShowerMinutes, 2.1, Normalization::Daily),
        rate(Category::Baths, InputField::Baths, 40.0, Normalization::Weekly),
        rate(Category::Toilet, InputField::Flushes, 1.6, Normalization::Daily),
        rate(Category::Faucets, InputField::FaucetMinutes, 1.5, Normalization::Daily),
        rate(Category::Laundry, InputField::LaundryLoads, 30.0, Normalization::SharedWeekly),
        rate(Category::Dishes, InputField::DishwasherLoads, 6.0, Normalization::SharedWeekly),
        rate(Category::Garden, InputField::GardenMinutes, 12.0, Normalization::SharedWeekly),
        rate(Category::Clothing, InputField::NewClothingItems, 1400.0, Normalization::Weekly),
        rate(Category::Diet, InputField::MeatMeals, 450.0, Normalization::Weekly),
        rate(Category::Transport, InputField::MilesDriven, 0.5, Normalization::Weekly),
        rate(Category::Ai, InputField::AiQueries, 0.13, Normalization::Weekly),
        rate(Category::Recycling, InputField::RecyclingItems, -5.0, Normalization::Weekly),
        rate(Category::Compost, InputField::CompostLbs, -15.0, Normalization::Weekly),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_follows_category_order() {
        for (rate, category) in STANDARD_RATES.rates().iter().zip(Category::ALL) {
            assert_eq!(rate.category, category);
        }
    }

    #[test]
    fn test_only_credits_have_negative_rates() {
        for rate in STANDARD_RATES.rates() {
            assert_eq!(rate.gallons_per_unit < 0.0, rate.category.is_credit());
        }
    }

    #[test]
    fn test_shared_normalization_only_on_household_categories() {
        let shared: Vec<Category> = STANDARD_RATES
            .rates()
            .iter()
            .filter(|r| r.normalization == Normalization::SharedWeekly)
            .map(|r| r.category)
            .collect();
        assert_eq!(
            shared,
            vec![Category::Laundry, Category::Dishes, Category::Garden]
        );
    }

    #[test]
    fn test_shared_normalization_guards_zero_divisor() {
        assert_eq!(Normalization::SharedWeekly.to_weekly(30.0, 0), 30.0);
        assert_eq!(Normalization::SharedWeekly.to_weekly(30.0, 3), 10.0);
    }
}
