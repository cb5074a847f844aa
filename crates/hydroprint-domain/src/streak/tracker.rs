use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::state::StreakState;
use crate::shared::DomainError;

/// Which edge of the streak state machine a log took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreakTransition {
    /// First ever log
    Started,
    /// Logged the calendar day after the previous log
    Extended,
    /// Gap of more than one day; `previous` is the streak that was lost
    Reset { previous: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakOutcome {
    pub state: StreakState,
    pub transition: StreakTransition,
}

/// Domain service evolving streak counters from daily log submissions
pub struct StreakTracker;

impl StreakTracker {
    /// Apply one successful daily log on `today` (a local calendar date).
    ///
    /// A second log on the same date is refused with
    /// `DomainError::DuplicateDailySubmission` and the input state is left as
    /// it was. A date before the last log is refused as a validation error.
    pub fn record_log(state: &StreakState, today: NaiveDate) -> Result<StreakOutcome, DomainError> {
        if state.has_logged_on(today) {
            return Err(DomainError::DuplicateDailySubmission(today));
        }

        let (current_streak, transition) = match state.last_log_date() {
            None => (1, StreakTransition::Started),
            Some(last) => {
                let diff_days = (today - last).num_days();
                if diff_days < 0 {
                    return Err(DomainError::Validation(format!(
                        "Log date {} precedes last logged date {}",
                        today, last
                    )));
                }
                let transition = if diff_days == 1 {
                    StreakTransition::Extended
                } else {
                    StreakTransition::Reset {
                        previous: state.current_streak(),
                    }
                };
                (Self::next_streak(state.current_streak(), diff_days), transition)
            }
        };

        let longest_streak = current_streak.max(state.longest_streak());
        let next = StreakState::advanced(
            current_streak,
            longest_streak,
            today,
            state.total_points().saturating_add(1),
        );

        Ok(StreakOutcome {
            state: next,
            transition,
        })
    }

    /// Streak length after a log `diff_days` calendar days after the previous one.
    ///
    /// Same day keeps the count; the record path never commits that case.
    pub fn next_streak(current_streak: u32, diff_days: i64) -> u32 {
        match diff_days {
            0 => current_streak,
            1 => current_streak.saturating_add(1),
            _ => 1,
        }
    }
}
