use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;

use super::DashboardSession;
use crate::application::dtos::{
    DailySubmissionDto, DashboardDto, FootprintDto, StreakStatsDto, WeeklySubmissionDto,
};
use crate::application::Clock;
use hydroprint_domain::events::footprint_events::{
    DailyLogSubmitted, StreakReset, WeeklyLogSubmitted,
};
use hydroprint_domain::events::{DomainEvent, EventBus};
use hydroprint_domain::footprint::{
    FootprintCalculator, FootprintResult, InputField, UsageInputs, DEFAULT_INPUTS,
};
use hydroprint_domain::shared::{
    DomainError, TransactionContext, UnitOfWork, UserId, DATE_FORMAT,
};
use hydroprint_domain::streak::{StreakRepository, StreakTracker, StreakTransition};
use hydroprint_domain::submission::{PeriodType, SubmissionWindow, SubmissionWindowRepository};
use hydroprint_domain::usage_log::{UsageLog, UsageLogRepository};
use hydroprint_domain::user::{UserProfile, UserProfileRepository};

/// Persistence collaborators: repositories for reads, the unit of work for
/// every multi-row write
#[derive(Clone)]
pub struct DashboardRepositories {
    pub users: Arc<dyn UserProfileRepository>,
    pub logs: Arc<dyn UsageLogRepository>,
    pub streaks: Arc<dyn StreakRepository>,
    pub windows: Arc<dyn SubmissionWindowRepository>,
    pub unit_of_work: Arc<dyn UnitOfWork>,
}

/// Application service behind the dashboard: loads a session, applies edits,
/// and submits daily/weekly logs.
///
/// Every mutating operation computes the new state first, stages all of its
/// writes in one transaction, and only after the commit updates the session.
/// A failed write rolls the whole transaction back and leaves the session
/// exactly as it was.
pub struct DashboardService {
    repos: DashboardRepositories,
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
    calculator: FootprintCalculator,
}

impl DashboardService {
    pub fn new(
        repos: DashboardRepositories,
        event_bus: Arc<dyn EventBus>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repos,
            event_bus,
            clock,
            calculator: FootprintCalculator::default(),
        }
    }

    pub async fn register_user(
        &self,
        display_name: String,
        household_size: Option<i64>,
    ) -> Result<UserProfile, DomainError> {
        let profile = UserProfile::new(display_name, household_size)?;
        self.repos.users.save(&profile).await?;

        info!(
            "[user] registered user_id={} household={:?}",
            profile.id(),
            profile.household_size()
        );
        Ok(profile)
    }

    /// Build the session from stored state. Anything not stored yet falls
    /// back to defaults; only a missing profile is an error.
    pub async fn load(&self, user_id: &UserId) -> Result<DashboardSession, DomainError> {
        let profile = self
            .repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))?;

        let (latest_daily, latest_weekly, streak, daily_window, weekly_window) = tokio::try_join!(
            self.repos.logs.find_latest(user_id, PeriodType::Daily),
            self.repos.logs.find_latest(user_id, PeriodType::Weekly),
            self.repos.streaks.find_by_user(user_id),
            self.repos.windows.find(user_id, PeriodType::Daily),
            self.repos.windows.find(user_id, PeriodType::Weekly),
        )?;

        let inputs = restore_inputs(latest_daily.as_ref(), latest_weekly.as_ref());

        let now = self.clock.now();
        let mut daily_window =
            daily_window.unwrap_or_else(|| SubmissionWindow::new(PeriodType::Daily));
        let mut weekly_window =
            weekly_window.unwrap_or_else(|| SubmissionWindow::new(PeriodType::Weekly));
        for window in [&mut daily_window, &mut weekly_window] {
            if window.refresh(&now) {
                debug!(
                    "[submit] {} period rolled over for user_id={}",
                    window.period(),
                    user_id
                );
            }
        }

        Ok(DashboardSession {
            user_id: profile.id().clone(),
            display_name: profile.display_name().to_string(),
            household: profile.household(),
            inputs,
            streak: streak.unwrap_or_default(),
            daily_window,
            weekly_window,
        })
    }

    /// Set one counter in memory. Returns true when this edit made an
    /// already submitted log stale.
    pub fn update_input(
        &self,
        session: &mut DashboardSession,
        field: InputField,
        value: u32,
    ) -> bool {
        session.inputs.set(field, value);
        session.window_mut(field.period()).mark_edited()
    }

    /// Apply several edits and persist any window they made stale.
    pub async fn apply_edits(
        &self,
        session: &mut DashboardSession,
        edits: &[(InputField, u32)],
    ) -> Result<(), DomainError> {
        let mut inputs = session.inputs;
        let mut daily_window = session.daily_window.clone();
        let mut weekly_window = session.weekly_window.clone();

        let mut stale_daily = false;
        let mut stale_weekly = false;
        for &(field, value) in edits {
            inputs.set(field, value);
            match field.period() {
                PeriodType::Daily => stale_daily |= daily_window.mark_edited(),
                PeriodType::Weekly => stale_weekly |= weekly_window.mark_edited(),
            }
        }

        if stale_daily || stale_weekly {
            let mut tx = self.repos.unit_of_work.begin().await?;
            let staged = async {
                if stale_daily {
                    tx.save_window(&session.user_id, &daily_window).await?;
                }
                if stale_weekly {
                    tx.save_window(&session.user_id, &weekly_window).await?;
                }
                Ok::<(), DomainError>(())
            }
            .await;
            finish(tx, staged).await?;
        }

        session.inputs = inputs;
        session.daily_window = daily_window;
        session.weekly_window = weekly_window;
        Ok(())
    }

    pub fn footprint(&self, session: &DashboardSession) -> FootprintResult {
        self.calculator.calculate(&session.inputs, &session.household)
    }

    pub fn dashboard(&self, session: &DashboardSession) -> DashboardDto {
        let now = self.clock.now();
        let footprint = self.footprint(session);

        DashboardDto {
            user_id: session.user_id.to_string(),
            display_name: session.display_name.clone(),
            household_size: session.household.divisor(),
            inputs: session.inputs,
            footprint: FootprintDto::from(&footprint),
            streak: StreakStatsDto::from_state(
                &session.user_id,
                &session.display_name,
                &session.streak,
                now.date_naive(),
            ),
            daily: session.daily_window.status(&now).into(),
            weekly: session.weekly_window.status(&now).into(),
        }
    }

    pub async fn submit_daily(
        &self,
        session: &mut DashboardSession,
    ) -> Result<DailySubmissionDto, DomainError> {
        let now = self.clock.now();
        let today = now.date_naive();
        let submitted_at = now.with_timezone(&Utc);

        // A second submission on the same day replaces the log and re-marks
        // the window; the streak already counts today.
        let already_logged = session.streak.has_logged_on(today);
        let outcome = if already_logged {
            None
        } else {
            match StreakTracker::record_log(&session.streak, today) {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    info!(
                        "[submit] daily refused user_id={} date={} reason={}",
                        session.user_id, today, e
                    );
                    return Err(e);
                }
            }
        };

        let log = UsageLog::new(
            session.user_id.clone(),
            PeriodType::Daily,
            today,
            session.inputs,
            &session.household,
            submitted_at,
        );
        let mut window = session.daily_window.clone();
        window.mark_submitted(submitted_at);

        let mut tx = self.repos.unit_of_work.begin().await?;
        let staged = async {
            tx.save_usage_log(&log).await?;
            if let Some(outcome) = &outcome {
                tx.save_streak(
                    &session.user_id,
                    &outcome.state,
                    session.streak.last_log_date(),
                )
                .await?;
            }
            tx.save_window(&session.user_id, &window).await
        }
        .await;
        finish(tx, staged).await?;

        session.daily_window = window;

        let Some(outcome) = outcome else {
            info!(
                "[submit] daily log replaced user_id={} date={} streak unchanged",
                session.user_id, today
            );
            return Ok(daily_receipt(session, &log, None, true));
        };
        session.streak = outcome.state;

        info!(
            "[streak] daily log user_id={} date={} current={} longest={} points={}",
            session.user_id,
            today,
            session.streak.current_streak(),
            session.streak.longest_streak(),
            session.streak.total_points()
        );

        self.publish(Box::new(DailyLogSubmitted {
            user_id: session.user_id.clone(),
            log_date: today,
            grand_total: log.grand_total(),
            current_streak: session.streak.current_streak(),
            longest_streak: session.streak.longest_streak(),
            total_points: session.streak.total_points(),
            occurred_at: submitted_at,
        }))
        .await;

        let streak_reset_from = match outcome.transition {
            StreakTransition::Reset { previous } => {
                self.publish(Box::new(StreakReset {
                    user_id: session.user_id.clone(),
                    previous_streak: previous,
                    log_date: today,
                    occurred_at: submitted_at,
                }))
                .await;
                Some(previous)
            }
            StreakTransition::Started | StreakTransition::Extended => None,
        };

        Ok(daily_receipt(session, &log, streak_reset_from, false))
    }

    /// Submit the combined weekly log and publish the monthly estimate.
    pub async fn submit_weekly(
        &self,
        session: &mut DashboardSession,
    ) -> Result<WeeklySubmissionDto, DomainError> {
        let now = self.clock.now();
        let today = now.date_naive();
        let submitted_at = now.with_timezone(&Utc);

        let footprint = self.footprint(session);
        let monthly_usage = footprint.monthly_estimate();

        let log = UsageLog::new(
            session.user_id.clone(),
            PeriodType::Weekly,
            today,
            session.inputs,
            &session.household,
            submitted_at,
        );
        let mut window = session.weekly_window.clone();
        window.mark_submitted(submitted_at);

        let mut tx = self.repos.unit_of_work.begin().await?;
        let staged = async {
            tx.save_usage_log(&log).await?;
            tx.update_public_usage(&session.user_id, monthly_usage, submitted_at)
                .await?;
            tx.save_window(&session.user_id, &window).await
        }
        .await;
        finish(tx, staged).await?;

        session.weekly_window = window;

        info!(
            "[leaderboard] weekly log user_id={} grand_total={:.1} monthly={}",
            session.user_id, footprint.grand_total, monthly_usage
        );

        self.publish(Box::new(WeeklyLogSubmitted {
            user_id: session.user_id.clone(),
            log_date: today,
            grand_total: footprint.grand_total,
            monthly_usage,
            occurred_at: submitted_at,
        }))
        .await;

        Ok(WeeklySubmissionDto {
            log_id: log.id().to_string(),
            log_date: today.format(DATE_FORMAT).to_string(),
            footprint: FootprintDto::from(&footprint),
            monthly_usage,
        })
    }

    /// Persist a new household size. Shared categories change, so a submitted
    /// weekly log becomes stale.
    pub async fn set_household_size(
        &self,
        session: &mut DashboardSession,
        household_size: Option<i64>,
    ) -> Result<(), DomainError> {
        let mut profile = self
            .repos
            .users
            .find_by_id(&session.user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(session.user_id.to_string()))?;
        profile.set_household_size(household_size);

        let mut weekly_window = session.weekly_window.clone();
        let stale = weekly_window.mark_edited();

        let mut tx = self.repos.unit_of_work.begin().await?;
        let staged = async {
            tx.save_profile(&profile).await?;
            if stale {
                tx.save_window(&session.user_id, &weekly_window).await?;
            }
            Ok::<(), DomainError>(())
        }
        .await;
        finish(tx, staged).await?;

        session.household = profile.household();
        session.weekly_window = weekly_window;

        info!(
            "[user] household updated user_id={} size={:?} divisor={}",
            session.user_id,
            household_size,
            session.household.divisor()
        );
        Ok(())
    }

    async fn publish(&self, event: Box<dyn DomainEvent>) {
        let name = event.event_type_name();
        if let Err(e) = self.event_bus.publish(event).await {
            warn!("Failed to publish {}: {}", name, e);
        }
    }
}

/// Commit when every staged write succeeded, otherwise roll back and return
/// the write error.
async fn finish(
    tx: Box<dyn TransactionContext>,
    staged: Result<(), DomainError>,
) -> Result<(), DomainError> {
    match staged {
        Ok(()) => tx.commit().await,
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Rollback after failed write also failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}

fn daily_receipt(
    session: &DashboardSession,
    log: &UsageLog,
    streak_reset_from: Option<u32>,
    already_logged: bool,
) -> DailySubmissionDto {
    DailySubmissionDto {
        log_id: log.id().to_string(),
        log_date: log.period_date().format(DATE_FORMAT).to_string(),
        grand_total: log.grand_total(),
        current_streak: session.streak.current_streak(),
        longest_streak: session.streak.longest_streak(),
        total_points: session.streak.total_points(),
        streak_reset_from,
        already_logged,
    }
}

/// Daily fields come from the latest daily log (else the weekly one), weekly
/// fields from the latest weekly log, defaults for anything never stored.
fn restore_inputs(daily: Option<&UsageLog>, weekly: Option<&UsageLog>) -> UsageInputs {
    let daily_source = daily.or(weekly).map_or(DEFAULT_INPUTS, |log| *log.inputs());
    let weekly_source = weekly.map_or(DEFAULT_INPUTS, |log| *log.inputs());
    UsageInputs::combine(&daily_source, &weekly_source)
}
