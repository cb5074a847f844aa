use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::period::{is_new_period, PeriodType};

/// Persisted submission flags for one user and period type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionWindow {
    period: PeriodType,
    last_updated: Option<DateTime<Utc>>,
    is_submitted: bool,
}

/// What the host should display for a window at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowStatus {
    pub period: PeriodType,
    pub is_new_period: bool,
    pub is_submitted: bool,
    pub last_updated: Option<DateTime<Utc>>,
}

impl SubmissionWindow {
    pub fn new(period: PeriodType) -> Self {
        Self {
            period,
            last_updated: None,
            is_submitted: false,
        }
    }

    pub fn restore(
        period: PeriodType,
        last_updated: Option<DateTime<Utc>>,
        is_submitted: bool,
    ) -> Self {
        Self {
            period,
            last_updated,
            is_submitted,
        }
    }

    pub fn period(&self) -> PeriodType {
        self.period
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// The stored flag, which may belong to an earlier period
    pub fn stored_is_submitted(&self) -> bool {
        self.is_submitted
    }

    pub fn is_new_period<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        is_new_period(self.period, self.last_updated.as_ref(), now)
    }

    /// A stored flag from a previous period never counts as submitted
    pub fn status<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> WindowStatus {
        let is_new_period = self.is_new_period(now);
        WindowStatus {
            period: self.period,
            is_new_period,
            is_submitted: self.is_submitted && !is_new_period,
            last_updated: self.last_updated,
        }
    }

    /// Drop a stale submitted flag once a new period has begun.
    /// Returns true when the stored flag changed.
    pub fn refresh<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> bool {
        if self.is_submitted && self.is_new_period(now) {
            self.is_submitted = false;
            return true;
        }
        false
    }

    /// Inputs changed after submission; the log is unconfirmed until resubmitted.
    /// Returns true when the stored flag changed.
    pub fn mark_edited(&mut self) -> bool {
        std::mem::replace(&mut self.is_submitted, false)
    }

    pub fn mark_submitted(&mut self, at: DateTime<Utc>) {
        self.is_submitted = true;
        self.last_updated = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn noon(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_new_window_is_not_submitted() {
        let window = SubmissionWindow::new(PeriodType::Daily);
        let status = window.status(&noon(3));

        assert!(status.is_new_period);
        assert!(!status.is_submitted);
        assert_eq!(status.last_updated, None);
    }

    #[test]
    fn test_submitted_today_stays_submitted() {
        let mut window = SubmissionWindow::new(PeriodType::Daily);
        window.mark_submitted(noon(3));

        let status = window.status(&(noon(3) + Duration::hours(3)));
        assert!(!status.is_new_period);
        assert!(status.is_submitted);
    }

    #[test]
    fn test_stale_flag_from_previous_day_displays_unsubmitted() {
        let window = SubmissionWindow::restore(PeriodType::Daily, Some(noon(3)), true);

        let status = window.status(&noon(4));
        assert!(status.is_new_period);
        assert!(!status.is_submitted);
        // Display override does not touch the stored flag
        assert!(window.stored_is_submitted());
    }

    #[test]
    fn test_refresh_clears_stale_flag_once() {
        let mut window = SubmissionWindow::restore(PeriodType::Weekly, Some(noon(1)), true);

        assert!(!window.refresh(&noon(5)));
        assert!(window.stored_is_submitted());

        assert!(window.refresh(&noon(10)));
        assert!(!window.stored_is_submitted());
        assert!(!window.refresh(&noon(10)));
    }

    #[test]
    fn test_edit_after_submission_marks_log_stale() {
        let mut window = SubmissionWindow::new(PeriodType::Weekly);
        window.mark_submitted(noon(1));

        assert!(window.mark_edited());
        assert!(!window.status(&noon(2)).is_submitted);
        assert!(!window.mark_edited());
        // Period boundary is still measured from the last submission
        assert_eq!(window.last_updated(), Some(noon(1)));
    }

    #[test]
    fn test_weekly_window_without_history_is_not_new() {
        let window = SubmissionWindow::new(PeriodType::Weekly);
        let status = window.status(&noon(1));

        assert!(!status.is_new_period);
        assert!(!status.is_submitted);
    }
}
