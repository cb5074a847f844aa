use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::footprint::HouseholdContext;
use crate::shared::{DomainError, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    display_name: String,
    household_size: Option<i64>,
    created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(display_name: String, household_size: Option<i64>) -> Result<Self, DomainError> {
        let display_name = display_name.trim().to_string();
        if display_name.is_empty() {
            return Err(DomainError::Validation(
                "Display name cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: UserId::new(),
            display_name,
            household_size,
            created_at: Utc::now(),
        })
    }

    pub fn restore(
        id: UserId,
        display_name: String,
        household_size: Option<i64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            display_name,
            household_size,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Stored value as entered; may be zero or missing
    pub fn household_size(&self) -> Option<i64> {
        self.household_size
    }

    pub fn household(&self) -> HouseholdContext {
        HouseholdContext {
            household_size: self.household_size,
        }
    }

    pub fn set_household_size(&mut self, household_size: Option<i64>) {
        self.household_size = household_size;
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
