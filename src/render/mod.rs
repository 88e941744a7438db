//! This module turns weeks and events into view models
//!
//! Everything in here is a pure function from data to a structured description of what to show.
//! The embedding presentation layer (a web page, a TUI...) translates these models to actual
//! output; no markup is assembled here.

pub mod week_list;
pub use week_list::{recent_feed, week_cards};
pub mod day_grid;
pub use day_grid::{day_grid, weekdays_of_range};

use chrono::NaiveDate;

use crate::auth::is_auditor;
use crate::event::EventKind;
use crate::user::User;
use crate::week::{WeekId, WeekStatus};

/// The audience a view is rendered for, resolved once from the authorization predicate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Manager,
    Auditor,
}

impl Role {
    pub fn of(user: Option<&User>) -> Self {
        if is_auditor(user) {
            Role::Auditor
        } else {
            Role::Manager
        }
    }

    pub fn is_auditor(&self) -> bool {
        match self {
            Role::Auditor => true,
            _ => false,
        }
    }
}

/// Localized week status text
pub fn status_label(status: WeekStatus) -> &'static str {
    match status {
        WeekStatus::Draft => "Черновик",
        WeekStatus::PendingApproval => "На согласовании",
        WeekStatus::Approved => "Согласовано",
        WeekStatus::InProgress => "В работе",
        WeekStatus::Completed => "Завершено",
    }
}

/// Localized event kind text
pub fn kind_label(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Task => "Задача",
        EventKind::Interview => "Интервью",
        EventKind::Note => "Заметка",
        EventKind::Meeting => "Встреча",
        EventKind::Comment => "Комментарий",
        EventKind::Scheme => "Схема",
        EventKind::Document => "Документ",
    }
}

/// The icon shown next to an event kind
pub fn kind_icon(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Task => "✅",
        EventKind::Interview => "🎤",
        EventKind::Note => "📝",
        EventKind::Meeting => "📅",
        EventKind::Comment => "💬",
        EventKind::Scheme => "📊",
        EventKind::Document => "📎",
    }
}

/// One card of the week list
#[derive(Clone, Debug, PartialEq)]
pub struct WeekCard {
    pub week_id: WeekId,
    pub title: String,
    /// "DD.MM.YYYY – DD.MM.YYYY"
    pub range_label: String,
    pub status: WeekStatus,
    pub status_label: &'static str,
    /// CSS hook of the status badge, e.g. "status-draft"
    pub badge_class: String,
    /// 0–100
    pub progress: u8,
    /// Role- and status-gated buttons, in display order
    pub actions: Vec<WeekAction>,
}

/// A button on a week card
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeekAction {
    Approve,
    Edit,
    SubmitForApproval,
    ResubmitForApproval,
}

/// One entry of the "recent events" strip on a week card
#[derive(Clone, Debug, PartialEq)]
pub struct MiniEvent {
    pub icon: &'static str,
    pub author: String,
    /// Content cut to 80 characters
    pub excerpt: String,
    /// "DD.MM HH:MM"
    pub time_label: String,
}

/// One weekday card of an expanded week
#[derive(Clone, Debug, PartialEq)]
pub struct DayCard {
    pub date: NaiveDate,
    /// "DD.MM"
    pub date_label: String,
    /// "Пн".."Пт"
    pub weekday_label: &'static str,
    /// The planned tasks for this day, when the week plan has an entry for it
    pub plan: Option<DayPlanView>,
    pub events: Vec<EventView>,
    pub affordances: DayAffordances,
}

/// The plan block of a day card
#[derive(Clone, Debug, PartialEq)]
pub struct DayPlanView {
    pub tasks: Vec<String>,
    /// "✅ Согласован" / "⏳ На согласовании"
    pub approval_label: &'static str,
}

/// One event inside a day card
#[derive(Clone, Debug, PartialEq)]
pub struct EventView {
    pub kind_label: &'static str,
    pub icon: &'static str,
    pub author: String,
    pub content: String,
    /// "DD.MM HH:MM"
    pub time_label: String,
    /// "Согласовано" / "Не согласовано"
    pub approval_label: &'static str,
    pub file: Option<FileView>,
}

/// The attached-file block of an event
#[derive(Clone, Debug, PartialEq)]
pub struct FileView {
    pub name: String,
    pub url: String,
    /// e.g. "1.5 КБ"
    pub size_label: String,
    pub mime_type: String,
}

/// Which inputs a day card offers to the current role
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayAffordances {
    pub can_edit_plan: bool,
    pub can_add_event: bool,
    pub can_add_meeting: bool,
    pub can_comment: bool,
}
