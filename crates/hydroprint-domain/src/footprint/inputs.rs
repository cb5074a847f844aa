use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::shared::DomainError;
use crate::submission::PeriodType;

/// Raw self-reported counters for one reporting period.
///
/// Values arrive pre-clamped by the input provider; the calculator never
/// validates ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageInputs {
    pub shower_minutes: u32,
    pub baths: u32,
    pub faucet_minutes: u32,
    pub flushes: u32,
    pub laundry_loads: u32,
    pub dishwasher_loads: u32,
    pub garden_minutes: u32,
    pub meat_meals: u32,
    pub new_clothing_items: u32,
    pub miles_driven: u32,
    pub recycling_items: u32,
    pub compost_lbs: u32,
    pub ai_queries: u32,
}

/// Values shown before a user has stored anything
pub const DEFAULT_INPUTS: UsageInputs = UsageInputs {
    shower_minutes: 8,
    baths: 1,
    faucet_minutes: 5,
    flushes: 5,
    laundry_loads: 4,
    dishwasher_loads: 5,
    garden_minutes: 15,
    meat_meals: 7,
    new_clothing_items: 1,
    miles_driven: 100,
    recycling_items: 5,
    compost_lbs: 2,
    ai_queries: 20,
};

impl Default for UsageInputs {
    fn default() -> Self {
        DEFAULT_INPUTS
    }
}

impl UsageInputs {
    pub fn get(&self, field: InputField) -> u32 {
        match field {
            InputField::ShowerMinutes => self.shower_minutes,
            InputField::Baths => self.baths,
            InputField::FaucetMinutes => self.faucet_minutes,
            InputField::Flushes => self.flushes,
            InputField::LaundryLoads => self.laundry_loads,
            InputField::DishwasherLoads => self.dishwasher_loads,
            InputField::GardenMinutes => self.garden_minutes,
            InputField::MeatMeals => self.meat_meals,
            InputField::NewClothingItems => self.new_clothing_items,
            InputField::MilesDriven => self.miles_driven,
            InputField::RecyclingItems => self.recycling_items,
            InputField::CompostLbs => self.compost_lbs,
            InputField::AiQueries => self.ai_queries,
        }
    }

    pub fn set(&mut self, field: InputField, value: u32) {
        let slot = match field {
            InputField::ShowerMinutes => &mut self.shower_minutes,
            InputField::Baths => &mut self.baths,
            InputField::FaucetMinutes => &mut self.faucet_minutes,
            InputField::Flushes => &mut self.flushes,
            InputField::LaundryLoads => &mut self.laundry_loads,
            InputField::DishwasherLoads => &mut self.dishwasher_loads,
            InputField::GardenMinutes => &mut self.garden_minutes,
            InputField::MeatMeals => &mut self.meat_meals,
            InputField::NewClothingItems => &mut self.new_clothing_items,
            InputField::MilesDriven => &mut self.miles_driven,
            InputField::RecyclingItems => &mut self.recycling_items,
            InputField::CompostLbs => &mut self.compost_lbs,
            InputField::AiQueries => &mut self.ai_queries,
        };
        *slot = value;
    }

    /// Merge the daily form of `daily` with the weekly form of `weekly`.
    ///
    /// This is the snapshot stored by a weekly submission.
    pub fn combine(daily: &UsageInputs, weekly: &UsageInputs) -> UsageInputs {
        let mut combined = *weekly;
        for field in InputField::ALL {
            if field.period() == PeriodType::Daily {
                combined.set(field, daily.get(field));
            }
        }
        combined
    }
}

/// Identifies one counter of [`UsageInputs`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    ShowerMinutes,
    Baths,
    FaucetMinutes,
    Flushes,
    LaundryLoads,
    DishwasherLoads,
    GardenMinutes,
    MeatMeals,
    NewClothingItems,
    MilesDriven,
    RecyclingItems,
    CompostLbs,
    AiQueries,
}

impl InputField {
    pub const ALL: [InputField; 13] = [
        InputField::ShowerMinutes,
        InputField::Baths,
        InputField::FaucetMinutes,
        InputField::Flushes,
        InputField::LaundryLoads,
        InputField::DishwasherLoads,
        InputField::GardenMinutes,
        InputField::MeatMeals,
        InputField::NewClothingItems,
        InputField::MilesDriven,
        InputField::RecyclingItems,
        InputField::CompostLbs,
        InputField::AiQueries,
    ];

    /// The reporting form that owns this field
    pub fn period(&self) -> PeriodType {
        match self {
            InputField::ShowerMinutes
            | InputField::Baths
            | InputField::FaucetMinutes
            | InputField::Flushes => PeriodType::Daily,
            _ => PeriodType::Weekly,
        }
    }

    /// Key used in stored JSON snapshots
    pub fn key(&self) -> &'static str {
        match self {
            InputField::ShowerMinutes => "showerMinutes",
            InputField::Baths => "baths",
            InputField::FaucetMinutes => "faucetMinutes",
            InputField::Flushes => "flushes",
            InputField::LaundryLoads => "laundryLoads",
            InputField::DishwasherLoads => "dishwasherLoads",
            InputField::GardenMinutes => "gardenMinutes",
            InputField::MeatMeals => "meatMeals",
            InputField::NewClothingItems => "newClothingItems",
            InputField::MilesDriven => "milesDriven",
            InputField::RecyclingItems => "recyclingItems",
            InputField::CompostLbs => "compostLbs",
            InputField::AiQueries => "aiQueries",
        }
    }
}

impl FromStr for InputField {
    type Err = DomainError;

    /// Accepts the camelCase key, snake_case or kebab-case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(|c| c.to_lowercase())
            .collect();

        InputField::ALL
            .into_iter()
            .find(|field| field.key().to_lowercase() == normalized)
            .ok_or_else(|| DomainError::InvalidInput(format!("Unknown input field: {}", s)))
    }
}

/// Household the shared categories are split across
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HouseholdContext {
    pub household_size: Option<i64>,
}

impl HouseholdContext {
    pub fn new(household_size: i64) -> Self {
        Self {
            household_size: Some(household_size),
        }
    }

    /// Always at least 1; zero, negative or missing sizes count as one person
    pub fn divisor(&self) -> u32 {
        self.household_size
            .unwrap_or(1)
            .clamp(1, i64::from(u32::MAX)) as u32
    }
}
