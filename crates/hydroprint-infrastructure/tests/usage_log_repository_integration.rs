use chrono::{NaiveDate, TimeZone, Utc};

use hydroprint_domain::footprint::{HouseholdContext, DEFAULT_INPUTS};
use hydroprint_domain::submission::PeriodType;
use hydroprint_domain::usage_log::{UsageLog, UsageLogRepository};
use hydroprint_infrastructure::persistence::repositories::SqliteUsageLogRepository;

mod test_helpers;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
}

#[tokio::test]
async fn usage_log_resubmission_on_same_day_upserts() {
    let pool = test_helpers::setup_in_memory_db().await;
    let user = test_helpers::seed_user(&pool, "Ana", Some(2)).await;
    let repo = SqliteUsageLogRepository::new(pool.clone());

    let first_at = Utc.with_ymd_and_hms(2024, 7, 3, 8, 0, 0).unwrap();
    let first = UsageLog::new(
        user.clone(),
        PeriodType::Daily,
        day(3),
        DEFAULT_INPUTS,
        &HouseholdContext::new(2),
        first_at,
    );
    test_helpers::save_log(&pool, &first).await.expect("save first");

    let mut inputs = DEFAULT_INPUTS;
    inputs.shower_minutes = 20;
    let second = UsageLog::new(
        user.clone(),
        PeriodType::Daily,
        day(3),
        inputs,
        &HouseholdContext::new(2),
        first_at + chrono::Duration::hours(2),
    );
    test_helpers::save_log(&pool, &second).await.expect("save second");

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM usage_logs")
        .fetch_one(pool.as_ref())
        .await
        .unwrap();
    assert_eq!(count.0, 1);

    let latest = repo
        .find_latest(&user, PeriodType::Daily)
        .await
        .expect("find latest")
        .expect("should exist");
    assert_eq!(latest.inputs().shower_minutes, 20);
    assert_eq!(latest.household_size(), 2);
    assert_eq!(latest, second);
}

#[tokio::test]
async fn usage_log_latest_and_range_are_per_period() {
    let pool = test_helpers::setup_in_memory_db().await;
    let user = test_helpers::seed_user(&pool, "Ben", None).await;
    let repo = SqliteUsageLogRepository::new(pool.clone());
    let household = HouseholdContext::default();

    for d in [1, 2, 4, 9] {
        let at = Utc.with_ymd_and_hms(2024, 7, d, 12, 0, 0).unwrap();
        let log = UsageLog::new(user.clone(), PeriodType::Daily, day(d), DEFAULT_INPUTS, &household, at);
        test_helpers::save_log(&pool, &log).await.unwrap();
    }
    let weekly_at = Utc.with_ymd_and_hms(2024, 7, 5, 12, 0, 0).unwrap();
    test_helpers::save_log(&pool, &UsageLog::new(
        user.clone(),
        PeriodType::Weekly,
        day(5),
        DEFAULT_INPUTS,
        &household,
        weekly_at,
    ))
    .await
    .unwrap();

    let latest_daily = repo.find_latest(&user, PeriodType::Daily).await.unwrap().unwrap();
    assert_eq!(latest_daily.period_date(), day(9));

    let latest_weekly = repo.find_latest(&user, PeriodType::Weekly).await.unwrap().unwrap();
    assert_eq!(latest_weekly.period_date(), day(5));

    let in_range = repo
        .list_in_range(&user, PeriodType::Daily, day(2), day(4))
        .await
        .unwrap();
    let dates: Vec<NaiveDate> = in_range.iter().map(|l| l.period_date()).collect();
    assert_eq!(dates, vec![day(2), day(4)]);
}

#[tokio::test]
async fn usage_log_for_unknown_user_is_rejected() {
    let pool = test_helpers::setup_in_memory_db().await;
    let log = UsageLog::new(
        hydroprint_domain::shared::UserId::new(),
        PeriodType::Daily,
        day(1),
        DEFAULT_INPUTS,
        &HouseholdContext::default(),
        Utc::now(),
    );

    assert!(test_helpers::save_log(&pool, &log).await.is_err());
}
