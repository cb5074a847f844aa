#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::shared::DomainError;
    use chrono::{Duration, NaiveDate};

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 26).unwrap() + Duration::days(offset)
    }

    fn log(state: &StreakState, today: NaiveDate) -> StreakState {
        StreakTracker::record_log(state, today)
            .expect("log should be accepted")
            .state
    }

    #[test]
    fn test_first_log_starts_streak_at_one() {
        let outcome = StreakTracker::record_log(&StreakState::new(), day(0)).unwrap();

        assert_eq!(outcome.transition, StreakTransition::Started);
        assert_eq!(outcome.state.current_streak(), 1);
        assert_eq!(outcome.state.longest_streak(), 1);
        assert_eq!(outcome.state.total_points(), 1);
        assert_eq!(outcome.state.last_log_date(), Some(day(0)));
        assert_eq!(
            outcome.state.phase(),
            StreakPhase::Active {
                streak: 1,
                last_date: day(0)
            }
        );
    }

    #[test]
    fn test_consecutive_days_extend_streak() {
        let d0 = log(&StreakState::new(), day(0));
        let d1 = log(&d0, day(1));
        let d2 = log(&d1, day(2));

        assert_eq!(
            [d0.current_streak(), d1.current_streak(), d2.current_streak()],
            [1, 2, 3]
        );
        assert_eq!(
            [d0.longest_streak(), d1.longest_streak(), d2.longest_streak()],
            [1, 2, 3]
        );
        assert_eq!(d2.total_points(), 3);
    }

    #[test]
    fn test_gap_resets_streak_to_one() {
        let start = log(&StreakState::new(), day(0));
        let outcome = StreakTracker::record_log(&start, day(5)).unwrap();

        assert_eq!(outcome.transition, StreakTransition::Reset { previous: 1 });
        assert_eq!(outcome.state.current_streak(), 1);
        assert_eq!(outcome.state.longest_streak(), 1);
        assert_eq!(outcome.state.total_points(), 2);
    }

    #[test]
    fn test_gap_keeps_longest_streak() {
        let mut state = StreakState::new();
        for offset in 0..4 {
            state = log(&state, day(offset));
        }
        assert_eq!(state.longest_streak(), 4);

        let outcome = StreakTracker::record_log(&state, day(9)).unwrap();
        assert_eq!(outcome.transition, StreakTransition::Reset { previous: 4 });
        assert_eq!(outcome.state.current_streak(), 1);
        assert_eq!(outcome.state.longest_streak(), 4);
    }

    #[test]
    fn test_two_day_gap_is_a_break() {
        let start = log(&StreakState::new(), day(0));
        let after_gap = log(&start, day(2));
        assert_eq!(after_gap.current_streak(), 1);
    }

    #[test]
    fn test_duplicate_same_day_is_refused_without_mutation() {
        let state = log(&log(&StreakState::new(), day(0)), day(1));
        let before = state.clone();

        for _ in 0..2 {
            let result = StreakTracker::record_log(&state, day(1));
            match result {
                Err(DomainError::DuplicateDailySubmission(date)) => assert_eq!(date, day(1)),
                other => panic!("Expected duplicate submission, got {:?}", other),
            }
            assert_eq!(state, before);
        }

        assert_eq!(state.current_streak(), 2);
        assert_eq!(state.longest_streak(), 2);
        assert_eq!(state.total_points(), 2);
        assert_eq!(state.last_log_date(), Some(day(1)));
    }

    #[test]
    fn test_log_before_last_date_is_rejected() {
        let state = log(&StreakState::new(), day(3));
        let result = StreakTracker::record_log(&state, day(1));

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_longest_never_decreases_across_history() {
        let offsets = [0, 1, 2, 5, 6, 10, 11, 12, 13, 20];
        let mut state = StreakState::new();
        let mut previous_longest = 0;

        for offset in offsets {
            state = log(&state, day(offset));
            assert!(state.current_streak() >= 1);
            assert!(state.longest_streak() >= previous_longest);
            assert!(state.longest_streak() >= state.current_streak());
            previous_longest = state.longest_streak();
        }

        assert_eq!(state.longest_streak(), 4);
        assert_eq!(state.current_streak(), 1);
        assert_eq!(state.total_points(), offsets.len() as u32);
    }

    #[test]
    fn test_next_streak_defines_same_day_value() {
        assert_eq!(StreakTracker::next_streak(4, 0), 4);
        assert_eq!(StreakTracker::next_streak(4, 1), 5);
        assert_eq!(StreakTracker::next_streak(4, 2), 1);
    }

    #[test]
    fn test_restore_rejects_inconsistent_rows() {
        assert!(StreakState::restore(5, 3, Some(day(0)), 5).is_err());
        assert!(StreakState::restore(0, 3, Some(day(0)), 5).is_err());
        assert!(StreakState::restore(0, 0, None, 0).is_ok());

        let restored = StreakState::restore(2, 7, Some(day(4)), 12).unwrap();
        assert_eq!(StreakTracker::record_log(&restored, day(5)).unwrap().state.current_streak(), 3);
    }

    #[test]
    fn test_streak_alive_through_yesterday() {
        let state = log(&StreakState::new(), day(0));

        assert!(state.is_alive_on(day(0)));
        assert!(state.is_alive_on(day(1)));
        assert!(!state.is_alive_on(day(2)));
        assert!(!StreakState::new().is_alive_on(day(0)));
    }
}
