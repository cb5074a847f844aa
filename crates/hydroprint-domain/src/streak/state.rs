use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, DATE_FORMAT};

/// Per-user streak counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    current_streak: u32,
    longest_streak: u32,
    last_log_date: Option<NaiveDate>,
    total_points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakPhase {
    NoHistory,
    Active { streak: u32, last_date: NaiveDate },
}

impl StreakState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted columns, rejecting rows that break the
    /// longest >= current invariant.
    pub fn restore(
        current_streak: u32,
        longest_streak: u32,
        last_log_date: Option<NaiveDate>,
        total_points: u32,
    ) -> Result<Self, DomainError> {
        if longest_streak < current_streak {
            return Err(DomainError::Validation(format!(
                "Longest streak {} is below current streak {}",
                longest_streak, current_streak
            )));
        }
        if last_log_date.is_some() && current_streak == 0 {
            return Err(DomainError::Validation(
                "Logged streak must count at least one day".to_string(),
            ));
        }

        Ok(Self {
            current_streak,
            longest_streak,
            last_log_date,
            total_points,
        })
    }

    /// Parse a stored `YYYY-MM-DD` date column
    pub fn parse_log_date(value: &str) -> Result<NaiveDate, DomainError> {
        NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
            DomainError::Validation(format!("Invalid last_log_date: {} ({})", value, e))
        })
    }

    pub(crate) fn advanced(
        current_streak: u32,
        longest_streak: u32,
        last_log_date: NaiveDate,
        total_points: u32,
    ) -> Self {
        Self {
            current_streak,
            longest_streak,
            last_log_date: Some(last_log_date),
            total_points,
        }
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    pub fn last_log_date(&self) -> Option<NaiveDate> {
        self.last_log_date
    }

    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    pub fn phase(&self) -> StreakPhase {
        match self.last_log_date {
            None => StreakPhase::NoHistory,
            Some(last_date) => StreakPhase::Active {
                streak: self.current_streak,
                last_date,
            },
        }
    }

    pub fn has_logged_on(&self, date: NaiveDate) -> bool {
        self.last_log_date == Some(date)
    }

    /// The streak can still be extended: last log was today or yesterday
    pub fn is_alive_on(&self, today: NaiveDate) -> bool {
        self.last_log_date
            .map(|last| (today - last).num_days() <= 1 && today >= last)
            .unwrap_or(false)
    }
}
