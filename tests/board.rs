//! Scenarios driving a whole audit board through the controller, with the backend
//! mocked by a local cache

mod scenarii;

use chrono::NaiveDate;

use audit_ledger::render::WeekAction;
use audit_ledger::traits::AuditSource;
use audit_ledger::{EventKind, WeekStatus};

use crate::scenarii::FIRST_WEEK_ID;

#[tokio::test]
async fn bootstrap_then_expand() {
    let _ = env_logger::builder().is_test(true).try_init();

    let cache = scenarii::populated_cache("board_bootstrap.json").await;
    let mut controller = scenarii::controller_over(cache);

    // no stored token: an anonymous visitor is a manager
    let cards = controller.bootstrap(None).await.unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].title, "Неделя склада");
    assert_eq!(cards[0].status, WeekStatus::InProgress);
    assert_eq!(cards[0].progress, 40);
    assert_eq!(cards[0].actions, [WeekAction::Approve]);

    let grid = controller.expand_week(FIRST_WEEK_ID).await.unwrap();
    assert_eq!(grid.len(), 5);

    // Tuesday holds the seeded interview and its approved plan
    let tuesday = &grid[1];
    assert_eq!(tuesday.date_label, "05.03");
    assert_eq!(tuesday.plan.as_ref().unwrap().approval_label, "✅ Согласован");
    assert_eq!(tuesday.events.len(), 1);
    assert_eq!(tuesday.events[0].kind_label, "Интервью");

    // Monday's plan came from the bare wire shape
    assert_eq!(grid[0].plan.as_ref().unwrap().approval_label, "⏳ На согласовании");
}

#[tokio::test]
async fn role_gates_the_cards() {
    let _ = env_logger::builder().is_test(true).try_init();

    let cache = scenarii::populated_cache("board_roles.json").await;
    let mut controller = scenarii::controller_over(cache);
    controller.bootstrap(None).await.unwrap();

    controller.set_user(Some(scenarii::auditor_user()));
    let cards = controller.week_cards();
    assert_eq!(cards[0].actions, [WeekAction::Edit, WeekAction::ResubmitForApproval]);
    assert_eq!(cards[1].actions, [WeekAction::Edit, WeekAction::SubmitForApproval]);

    controller.set_user(Some(scenarii::manager_user()));
    let cards = controller.week_cards();
    assert!(cards[0].actions.contains(&WeekAction::Edit) == false);
}

#[tokio::test]
async fn create_then_approve_a_week() {
    let _ = env_logger::builder().is_test(true).try_init();

    let cache = scenarii::temp_cache("board_create.json");
    let mut controller = scenarii::controller_over(cache);
    controller.bootstrap(None).await.unwrap();

    let cards = controller.create_week("Неделя ИТ", "2024-04-01", "2024-04-05").await.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].status, WeekStatus::Draft);
    assert_eq!(cards[0].progress, 0);

    let week_id = cards[0].week_id;
    let cards = controller.approve_week(week_id).await.unwrap();
    assert_eq!(cards[0].status, WeekStatus::Approved);
    assert_eq!(cards[0].progress, 100);

    // the source agrees with the optimistically updated local copy
    let stored = controller.source_mut().weeks().await.unwrap();
    assert_eq!(stored[0].status(), WeekStatus::Approved);
    assert_eq!(stored[0].progress(), 100);
}

#[tokio::test]
async fn prompt_inputs_are_validated() {
    let _ = env_logger::builder().is_test(true).try_init();

    let cache = scenarii::temp_cache("board_validation.json");
    let mut controller = scenarii::controller_over(cache);
    controller.bootstrap(None).await.unwrap();

    assert!(controller.create_week("  ", "2024-04-01", "2024-04-05").await.is_err());
    assert!(controller.create_week("Неделя", "01.04.2024", "2024-04-05").await.is_err());

    let day = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    let result = controller.add_event(1, day, EventKind::Note, "   ").await;
    assert_eq!(result.unwrap_err().to_string(), "Введите текст!");

    // nothing was created along the way
    assert!(controller.source_mut().weeks().await.unwrap().is_empty());
}

#[tokio::test]
async fn comments_and_events_carry_their_author() {
    let _ = env_logger::builder().is_test(true).try_init();

    let cache = scenarii::populated_cache("board_authors.json").await;
    let mut controller = scenarii::controller_over(cache);
    controller.bootstrap(None).await.unwrap();

    let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    controller.add_event(FIRST_WEEK_ID, day, EventKind::Comment, "Почему просели остатки?").await.unwrap();
    controller.add_event(FIRST_WEEK_ID, day, EventKind::Note, "Пересчёт назначен").await.unwrap();

    let events = controller.source_mut().events_for_week(FIRST_WEEK_ID).await.unwrap();
    let comment = events.iter().find(|event| event.kind() == EventKind::Comment && event.day_date() == day).unwrap();
    assert_eq!(comment.author(), "Руководитель");
    let note = events.iter().find(|event| event.kind() == EventKind::Note).unwrap();
    assert_eq!(note.author(), "Климов Е.А.");
}

#[tokio::test]
async fn enter_submits_a_comment_but_shift_enter_does_not() {
    let _ = env_logger::builder().is_test(true).try_init();

    let cache = scenarii::populated_cache("board_keypress.json").await;
    let mut controller = scenarii::controller_over(cache);
    controller.bootstrap(None).await.unwrap();

    let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    let before = controller.source_mut().events_for_week(FIRST_WEEK_ID).await.unwrap().len();

    let held = controller.add_comment_on_keypress(FIRST_WEEK_ID, day, "Черновик вопроса", "Enter", true).await.unwrap();
    assert!(held.is_none());
    assert_eq!(controller.source_mut().events_for_week(FIRST_WEEK_ID).await.unwrap().len(), before);

    let submitted = controller.add_comment_on_keypress(FIRST_WEEK_ID, day, "Вопрос готов", "Enter", false).await.unwrap();
    assert!(submitted.is_some());
    assert_eq!(controller.source_mut().events_for_week(FIRST_WEEK_ID).await.unwrap().len(), before + 1);
}

#[tokio::test]
async fn attached_documents_keep_their_file_descriptor() {
    let _ = env_logger::builder().is_test(true).try_init();

    let cache = scenarii::populated_cache("board_upload.json").await;
    let mut controller = scenarii::controller_over(cache);
    controller.bootstrap(None).await.unwrap();

    let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    let bytes = vec![0u8; 1536];
    let grid = controller.attach_document(FIRST_WEEK_ID, day, "реестр договоров.pdf", "application/pdf", bytes, "").await.unwrap();

    let thursday = grid.iter().find(|card| card.date == day).unwrap();
    let document = thursday.events.iter().find(|event| event.kind_label == "Документ").unwrap();
    // content falls back to the file name when no text was given
    assert_eq!(document.content, "реестр договоров.pdf");
    let file = document.file.as_ref().unwrap();
    assert_eq!(file.name, "реестр договоров.pdf");
    assert_eq!(file.size_label, "1.5 КБ");
    assert_eq!(file.mime_type, "application/pdf");
}

#[tokio::test]
async fn day_plans_can_be_set_and_approved() {
    let _ = env_logger::builder().is_test(true).try_init();

    let cache = scenarii::populated_cache("board_plans.json").await;
    let mut controller = scenarii::controller_over(cache);
    controller.bootstrap(None).await.unwrap();
    controller.set_user(Some(scenarii::auditor_user()));

    let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    let grid = controller.set_day_plan(FIRST_WEEK_ID, day, vec!["Схема движения ТМЦ".to_string()]).await.unwrap();
    let thursday = grid.iter().find(|card| card.date == day).unwrap();
    assert_eq!(thursday.plan.as_ref().unwrap().approval_label, "⏳ На согласовании");

    let grid = controller.approve_day_plan(FIRST_WEEK_ID, day).await.unwrap();
    let thursday = grid.iter().find(|card| card.date == day).unwrap();
    assert_eq!(thursday.plan.as_ref().unwrap().approval_label, "✅ Согласован");
    assert_eq!(thursday.plan.as_ref().unwrap().tasks, ["Схема движения ТМЦ".to_string()]);

    // approving a day that has no plan is refused
    let empty_day = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
    assert!(controller.approve_day_plan(FIRST_WEEK_ID, empty_day).await.is_err());
}

#[tokio::test]
async fn recent_feed_shows_the_latest_events() {
    let _ = env_logger::builder().is_test(true).try_init();

    let cache = scenarii::populated_cache("board_feed.json").await;
    let mut controller = scenarii::controller_over(cache);
    controller.bootstrap(None).await.unwrap();

    let feed = controller.recent_events(FIRST_WEEK_ID).await.unwrap();
    assert_eq!(feed.len(), 2);
    // newest first
    assert_eq!(feed[0].icon, "💬");
    assert!(feed[0].excerpt.starts_with("Уточните"));
    assert_eq!(feed[1].icon, "🎤");
}
