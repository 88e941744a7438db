//! Week list rendering: one card per week, plus the recent-events strip

use crate::event::Event;
use crate::utils::{ellipsize, format_date_full, format_datetime};
use crate::week::{Week, WeekStatus};

use super::{kind_icon, status_label, MiniEvent, Role, WeekAction, WeekCard};

/// How many entries the recent-events strip shows
pub const RECENT_FEED_LIMIT: usize = 10;

/// Build the week list for the given audience
pub fn week_cards(weeks: &[Week], role: Role) -> Vec<WeekCard> {
    weeks.iter().map(|week| week_card(week, role)).collect()
}

fn week_card(week: &Week, role: Role) -> WeekCard {
    WeekCard {
        week_id: week.id(),
        title: week.title().to_string(),
        range_label: format!("{} – {}", format_date_full(&week.start_date()), format_date_full(&week.end_date())),
        status: week.status(),
        status_label: status_label(week.status()),
        badge_class: format!("status-{}", week.status().as_str()),
        progress: week.progress(),
        actions: actions_for(week.status(), role),
    }
}

/// Which buttons a card carries, by audience and current status.
/// Auditors drive the approval flow from their side, managers only approve.
fn actions_for(status: WeekStatus, role: Role) -> Vec<WeekAction> {
    match role {
        Role::Manager => {
            match status {
                WeekStatus::Approved => Vec::new(),
                WeekStatus::Completed => Vec::new(),
                _ => vec![WeekAction::Approve],
            }
        },
        Role::Auditor => {
            let submit = if status.is_awaiting_first_approval() {
                WeekAction::SubmitForApproval
            } else {
                WeekAction::ResubmitForApproval
            };
            vec![WeekAction::Edit, submit]
        },
    }
}

/// The "last happenings" strip of a week card: newest first, content cut to 80 characters.
/// `events` is expected in storage order (creation time ascending).
pub fn recent_feed(events: &[Event], limit: usize) -> Vec<MiniEvent> {
    events.iter()
        .rev()
        .take(limit)
        .map(|event| MiniEvent {
            icon: kind_icon(event.kind()),
            author: event.author().to_string(),
            excerpt: ellipsize(event.content(), 80),
            time_label: format_datetime(event.created_at()),
        })
        .collect()
}
