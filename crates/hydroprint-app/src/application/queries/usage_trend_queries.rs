use chrono::Duration;
use log::info;
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::dtos::{UsageTrendDto, UsageTrendPoint};
use crate::application::Clock;
use hydroprint_domain::footprint::impact_score;
use hydroprint_domain::shared::{DomainError, UserId, DATE_FORMAT};
use hydroprint_domain::submission::PeriodType;
use hydroprint_domain::usage_log::UsageLogRepository;

pub const MAX_TREND_DAYS: u32 = 365;

pub struct UsageTrendQueries {
    logs: Arc<dyn UsageLogRepository>,
    clock: Arc<dyn Clock>,
}

impl UsageTrendQueries {
    pub fn new(logs: Arc<dyn UsageLogRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { logs, clock }
    }

    /// Daily logs for the last `days` local calendar days ending today.
    /// Days without a log are kept with `is_logged = false`.
    pub async fn trend(&self, user_id: &UserId, days: u32) -> Result<UsageTrendDto, DomainError> {
        if days == 0 || days > MAX_TREND_DAYS {
            return Err(DomainError::Validation(format!(
                "Days must be between 1 and {}",
                MAX_TREND_DAYS
            )));
        }

        let end_date = self.clock.today();
        let start_date = end_date - Duration::days(i64::from(days) - 1);

        let logs = self
            .logs
            .list_in_range(user_id, PeriodType::Daily, start_date, end_date)
            .await?;
        let by_date: HashMap<_, _> = logs
            .iter()
            .map(|log| (log.period_date(), log.grand_total()))
            .collect();

        let data_points: Vec<UsageTrendPoint> = start_date
            .iter_days()
            .take(days as usize)
            .map(|date| {
                let grand_total = by_date.get(&date).copied();
                UsageTrendPoint {
                    date: date.format(DATE_FORMAT).to_string(),
                    is_logged: grand_total.is_some(),
                    grand_total,
                    score: grand_total.map(impact_score),
                }
            })
            .collect();

        let logged: Vec<f64> = data_points.iter().filter_map(|p| p.grand_total).collect();
        let average_grand_total = if logged.is_empty() {
            None
        } else {
            Some(logged.iter().sum::<f64>() / logged.len() as f64)
        };

        info!(
            "[streak] trend query user_id={} range={}~{} logged={}",
            user_id,
            start_date,
            end_date,
            logged.len()
        );

        Ok(UsageTrendDto {
            user_id: user_id.to_string(),
            start_date: start_date.format(DATE_FORMAT).to_string(),
            end_date: end_date.format(DATE_FORMAT).to_string(),
            logged_days: logged.len() as u32,
            average_grand_total,
            data_points,
        })
    }
}
