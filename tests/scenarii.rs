//! Shared scenario builders for the integration tests
//!
//! The backend is mocked by a local [`Cache`], which implements the same `AuditSource`
//! contract as the remote client.

use std::path::PathBuf;

use chrono::NaiveDate;

use audit_ledger::auth::Auth;
use audit_ledger::cache::Cache;
use audit_ledger::controller::Controller;
use audit_ledger::notify::Notifier;
use audit_ledger::settings::{ANON_KEY, AUDITOR_EMAIL, BASE_URL, REDIRECT_URL};
use audit_ledger::traits::AuditSource;
use audit_ledger::{DayPlan, EventKind, NewEvent, NewWeek, Plan, User, WeekId, WeekPatch, WeekStatus};

/// A fresh cache in the system temp directory. Pass a unique name per test.
pub fn temp_cache(name: &str) -> Cache {
    let path: PathBuf = std::env::temp_dir().join(name);
    Cache::new(&path)
}

/// A cache holding two weeks (one of them in progress, with a plan) and a couple of events
pub async fn populated_cache(name: &str) -> Cache {
    let mut cache = temp_cache(name);

    let mut first = NewWeek::new(
        "Неделя склада".to_string(),
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
    );
    first.description = Some("Инвентаризация и опросы".to_string());
    let mut plan = Plan::new();
    plan.insert("2024-03-04".to_string(), DayPlan::Tasks(vec!["Сверка остатков".to_string()]));
    plan.insert("2024-03-05".to_string(), DayPlan::Detailed {
        tasks: vec!["Интервью с кладовщиком".to_string()],
        approved: true,
    });
    first.plan = Some(plan);
    let first = cache.create_week(first).await.unwrap();
    cache.update_week(first.id(), WeekPatch::status_and_progress(WeekStatus::InProgress, 40)).await.unwrap();

    cache.create_week(NewWeek::new(
        "Неделя закупок".to_string(),
        NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
    )).await.unwrap();

    cache.create_event(NewEvent::new(
        first.id(),
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        EventKind::Interview,
        "Климов Е.А.".to_string(),
        "Опрошен кладовщик, расхождений нет".to_string(),
    )).await.unwrap();
    cache.create_event(NewEvent::new(
        first.id(),
        NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
        EventKind::Comment,
        "Руководитель".to_string(),
        "Уточните по складу №2".to_string(),
    )).await.unwrap();

    cache
}

/// The id the first populated week gets
pub const FIRST_WEEK_ID: WeekId = 1;

/// A controller driving the given cache, with an unconfigured (silent) notifier
pub fn controller_over(cache: Cache) -> Controller<Cache> {
    let auth = Auth::new(BASE_URL, ANON_KEY, REDIRECT_URL).unwrap();
    Controller::new(cache, auth, Notifier::from_settings())
}

/// A session that passes the auditor role check
pub fn auditor_user() -> User {
    User::new(AUDITOR_EMAIL.to_string(), "test-token".to_string())
}

/// A session that does not
pub fn manager_user() -> User {
    User::new("manager@example.org".to_string(), "test-token".to_string())
}
