//! This module wires the gateways together behind the handlers a page calls
//!
//! The controller owns an explicit [`AppState`] (no module-scope globals): the last-fetched
//! week list and the current user. Every successful mutation re-fetches what it touched and
//! returns freshly built view models; the embedder is expected to repaint wholesale. Failures
//! come back as plain displayable errors (the embedder typically shows a blocking alert).

use std::error::Error;

use chrono::NaiveDate;

use crate::auth::Auth;
use crate::config::{AUDITOR_DISPLAY_NAME, MANAGER_DISPLAY_NAME};
use crate::event::{EventKind, NewEvent};
use crate::notify::Notifier;
use crate::render::{day_grid, recent_feed, week_cards, DayCard, MiniEvent, Role, WeekCard};
use crate::render::week_list::RECENT_FEED_LIMIT;
use crate::traits::AuditSource;
use crate::user::User;
use crate::utils::format_date;
use crate::week::{DayPlan, NewWeek, Plan, Week, WeekId, WeekPatch, WeekStatus};

/// What the application currently knows, passed around explicitly
#[derive(Default)]
pub struct AppState {
    user: Option<User>,
    weeks: Vec<Week>,
}

impl AppState {
    pub fn user(&self) -> Option<&User> { self.user.as_ref() }
    pub fn weeks(&self) -> &[Week]      { &self.weeks        }
}

/// The decision behind the comment box: Enter submits, Shift+Enter makes a newline
pub fn comment_submits(key: &str, shift_held: bool) -> bool {
    key == "Enter" && shift_held == false
}

/// Drives one audit board: resolves the user, fetches data, applies mutations, rebuilds views.
///
/// `S` is usually the remote [`Client`](crate::client::Client); tests run the same controller
/// over a local [`Cache`](crate::cache::Cache).
pub struct Controller<S: AuditSource> {
    source: S,
    auth: Auth,
    notifier: Notifier,
    state: AppState,
}

impl<S: AuditSource> Controller<S> {
    pub fn new(source: S, auth: Auth, notifier: Notifier) -> Self {
        Self {
            source,
            auth,
            notifier,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState { &self.state }

    /// For embedders that resolve the session themselves (e.g. from a stored token
    /// or a redirect fragment) before handing it to the controller
    pub fn set_user(&mut self, user: Option<User>) {
        self.state.user = user;
    }

    fn role(&self) -> Role {
        Role::of(self.state.user.as_ref())
    }

    fn find_week(&self, week: WeekId) -> Result<&Week, Box<dyn Error>> {
        match self.state.weeks.iter().find(|stored| stored.id() == week) {
            None => Err(format!("Неделя {} не найдена", week).into()),
            Some(stored) => Ok(stored),
        }
    }

    /// Keep the in-memory copy in step until the next full reload
    fn replace_local(&mut self, updated: Week) {
        match self.state.weeks.iter_mut().find(|stored| stored.id() == updated.id()) {
            None => self.state.weeks.push(updated),
            Some(stored) => *stored = updated,
        }
    }

    /// Page-load entry point: resolve the session (if a token is at hand) and paint the week list
    pub async fn bootstrap(&mut self, access_token: Option<&str>) -> Result<Vec<WeekCard>, Box<dyn Error>> {
        self.state.user = match access_token {
            None => None,
            Some(token) => self.auth.current_session(token).await,
        };
        self.reload_weeks().await
    }

    /// Re-fetch the whole week list and rebuild its cards
    pub async fn reload_weeks(&mut self) -> Result<Vec<WeekCard>, Box<dyn Error>> {
        self.state.weeks = self.source.weeks().await?;
        Ok(self.week_cards())
    }

    /// The week list as last fetched, without a round trip
    pub fn week_cards(&self) -> Vec<WeekCard> {
        week_cards(&self.state.weeks, self.role())
    }

    /// A week card was clicked open: fetch its events and build the day grid
    pub async fn expand_week(&mut self, week: WeekId) -> Result<Vec<DayCard>, Box<dyn Error>> {
        let events = self.source.events_for_week(week).await?;
        let stored = self.find_week(week)?;
        Ok(day_grid(stored, &events, self.role()))
    }

    /// The "recent happenings" strip of a week card
    pub async fn recent_events(&mut self, week: WeekId) -> Result<Vec<MiniEvent>, Box<dyn Error>> {
        let events = self.source.events_for_week(week).await?;
        Ok(recent_feed(&events, RECENT_FEED_LIMIT))
    }

    /// Create a week from raw prompt inputs. Validation is only "non-empty and parseable".
    pub async fn create_week(&mut self, title: &str, start: &str, end: &str) -> Result<Vec<WeekCard>, Box<dyn Error>> {
        let title = title.trim();
        if title.is_empty() || start.trim().is_empty() || end.trim().is_empty() {
            return Err("Заполните все поля!".into());
        }
        let start_date = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d")?;
        let end_date = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d")?;

        let created = self.source.create_week(NewWeek::new(title.to_string(), start_date, end_date)).await?;
        self.state.weeks.push(created);
        Ok(self.week_cards())
    }

    /// Partial edit of a week (title, dates, description...)
    pub async fn update_week(&mut self, week: WeekId, patch: WeekPatch) -> Result<Vec<WeekCard>, Box<dyn Error>> {
        let updated = self.source.update_week(week, patch).await?;
        self.replace_local(updated);
        Ok(self.week_cards())
    }

    /// The manager signs a week off: approved, progress complete
    pub async fn approve_week(&mut self, week: WeekId) -> Result<Vec<WeekCard>, Box<dyn Error>> {
        self.update_week(week, WeekPatch::status_and_progress(WeekStatus::Approved, 100)).await
    }

    /// The auditor hands a draft over for approval
    pub async fn submit_for_approval(&mut self, week: WeekId) -> Result<Vec<WeekCard>, Box<dyn Error>> {
        self.update_week(week, WeekPatch::status_only(WeekStatus::PendingApproval)).await
    }

    /// Same as [`Self::submit_for_approval`], for a week that already went through the flow once
    pub async fn resubmit_for_approval(&mut self, week: WeekId) -> Result<Vec<WeekCard>, Box<dyn Error>> {
        self.update_week(week, WeekPatch::status_only(WeekStatus::PendingApproval)).await
    }

    /// Replace the planned tasks of one day. A new entry starts unapproved.
    pub async fn set_day_plan(&mut self, week: WeekId, date: NaiveDate, tasks: Vec<String>) -> Result<Vec<DayCard>, Box<dyn Error>> {
        let mut plan: Plan = self.find_week(week)?.plan().cloned().unwrap_or_default();
        plan.insert(date.format("%Y-%m-%d").to_string(), DayPlan::Detailed { tasks, approved: false });

        let updated = self.source.update_week(week, WeekPatch::plan_only(plan)).await?;
        self.replace_local(updated);
        self.expand_week(week).await
    }

    /// Mark one day's plan as agreed upon. Bare task lists get upgraded to the richer shape.
    pub async fn approve_day_plan(&mut self, week: WeekId, date: NaiveDate) -> Result<Vec<DayCard>, Box<dyn Error>> {
        let key = date.format("%Y-%m-%d").to_string();
        let mut plan: Plan = self.find_week(week)?.plan().cloned().unwrap_or_default();
        let approved = match plan.get(key.as_str()) {
            None => return Err(format!("На {} план не задан", format_date(&date)).into()),
            Some(day) => DayPlan::Detailed { tasks: day.tasks().to_vec(), approved: true },
        };
        plan.insert(key, approved);

        let updated = self.source.update_week(week, WeekPatch::plan_only(plan)).await?;
        self.replace_local(updated);
        self.expand_week(week).await
    }

    /// Add an event to a day and rebuild the day grid.
    ///
    /// Comments are authored by the manager, every other kind by the auditor
    /// (the display names come from [`crate::config`]). A new comment also fires
    /// a best-effort notification.
    pub async fn add_event(&mut self, week: WeekId, date: NaiveDate, kind: EventKind, content: &str) -> Result<Vec<DayCard>, Box<dyn Error>> {
        let content = content.trim();
        if content.is_empty() {
            return Err("Введите текст!".into());
        }

        let author = match kind {
            EventKind::Comment => MANAGER_DISPLAY_NAME.lock().unwrap().clone(),
            _ => AUDITOR_DISPLAY_NAME.lock().unwrap().clone(),
        };
        let new_event = NewEvent::new(week, date, kind, author, content.to_string());
        self.source.create_event(new_event).await?;

        if kind == EventKind::Comment {
            let title = self.find_week(week).map(|stored| stored.title().to_string()).unwrap_or_default();
            let message = format!("💬 Новый комментарий к неделе «{}» ({}): {}", title, format_date(&date), content);
            self.notifier.send_message(&message).await;
        }

        self.expand_week(week).await
    }

    /// A keypress in the comment box. Returns `None` (and does nothing) unless the key combination submits.
    pub async fn add_comment_on_keypress(&mut self, week: WeekId, date: NaiveDate, content: &str, key: &str, shift_held: bool)
        -> Result<Option<Vec<DayCard>>, Box<dyn Error>>
    {
        if comment_submits(key, shift_held) == false {
            return Ok(None);
        }
        let grid = self.add_event(week, date, EventKind::Comment, content).await?;
        Ok(Some(grid))
    }

    /// Upload a file, then attach it to the day as a document event
    pub async fn attach_document(&mut self, week: WeekId, date: NaiveDate, file_name: &str, mime_type: &str, bytes: Vec<u8>, content: &str)
        -> Result<Vec<DayCard>, Box<dyn Error>>
    {
        let metadata = self.source.upload_file(file_name, mime_type, bytes).await?;

        let author = AUDITOR_DISPLAY_NAME.lock().unwrap().clone();
        let content = if content.trim().is_empty() { file_name } else { content.trim() };
        let mut new_event = NewEvent::new(week, date, EventKind::Document, author, content.to_string());
        new_event.file_metadata = Some(metadata);
        self.source.create_event(new_event).await?;

        self.expand_week(week).await
    }

    /// Drop the session, both remotely and locally
    pub async fn sign_out(&mut self) {
        if let Some(user) = self.state.user.take() {
            self.auth.sign_out(user.access_token()).await;
        }
    }

    /// Hand out the underlying source, e.g. to run an import against it
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_submits_unless_shift_is_held() {
        assert!(comment_submits("Enter", false));
        assert_eq!(comment_submits("Enter", true), false);
        assert_eq!(comment_submits("a", false), false);
    }
}
