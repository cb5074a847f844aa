use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::shared::DomainError;

pub const WEEKLY_PERIOD_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Daily,
    Weekly,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Daily => "daily",
            PeriodType::Weekly => "weekly",
        }
    }
}

impl std::fmt::Display for PeriodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(PeriodType::Daily),
            "weekly" => Ok(PeriodType::Weekly),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown period type: {}",
                other
            ))),
        }
    }
}

/// Whether `now` falls in a later reporting period than `last_updated`.
///
/// Daily periods follow calendar dates in `now`'s timezone, so 23:59 and
/// 00:01 the next morning are different periods. A daily window with no
/// history is always new.
///
/// Weekly periods are rolling: strictly more than seven days must have
/// elapsed. A weekly window with no history is *not* new.
pub fn is_new_period<Tz: TimeZone>(
    period: PeriodType,
    last_updated: Option<&DateTime<Utc>>,
    now: &DateTime<Tz>,
) -> bool {
    match period {
        PeriodType::Daily => match last_updated {
            None => true,
            Some(last) => {
                last.with_timezone(&now.timezone()).date_naive() != now.date_naive()
            }
        },
        PeriodType::Weekly => match last_updated {
            None => false,
            Some(last) => {
                now.with_timezone(&Utc).signed_duration_since(*last)
                    > Duration::days(WEEKLY_PERIOD_DAYS)
            }
        },
    }
}
