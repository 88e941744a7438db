//! Day grid rendering: expanding a week into one card per working day
//!
//! The grid is rebuilt wholesale after every mutation; there is no incremental patching.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::event::Event;
use crate::utils::{day_abbrev, format_date, format_datetime, format_file_size};
use crate::week::{DayPlan, Week};

use super::{kind_icon, kind_label, DayAffordances, DayCard, DayPlanView, EventView, FileView, Role};

/// Every working day (Monday to Friday) of the inclusive range, ascending.
/// A range that only covers a weekend produces no days at all.
pub fn weekdays_of_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut current = start;

    while current <= end {
        match current.weekday() {
            Weekday::Sat | Weekday::Sun => (),
            _ => days.push(current),
        }
        current = match current.succ_opt() {
            // the end of representable time, nothing left to walk
            None => break,
            Some(next) => next,
        };
    }
    days
}

/// Expand a week into its day cards.
///
/// Events are slotted onto the day their `day_date` names; an event dated outside the week's
/// range matches no card and is simply not shown (that convention is not validated at write time).
pub fn day_grid(week: &Week, events: &[Event], role: Role) -> Vec<DayCard> {
    let mut by_day: HashMap<NaiveDate, Vec<&Event>> = HashMap::new();
    for event in events {
        by_day.entry(event.day_date()).or_insert_with(Vec::new).push(event);
    }

    let affordances = DayAffordances {
        can_edit_plan: role.is_auditor(),
        can_add_event: role.is_auditor(),
        can_add_meeting: true,
        can_comment: true,
    };

    weekdays_of_range(week.start_date(), week.end_date())
        .into_iter()
        .map(|date| DayCard {
            date,
            date_label: format_date(&date),
            weekday_label: day_abbrev(&date),
            plan: week.plan_for(&date).map(plan_view),
            events: by_day.get(&date)
                .map(|events| events.iter().map(|&event| event_view(event)).collect())
                .unwrap_or_else(Vec::new),
            affordances,
        })
        .collect()
}

fn plan_view(plan: &DayPlan) -> DayPlanView {
    DayPlanView {
        tasks: plan.tasks().to_vec(),
        approval_label: if plan.is_approved() { "✅ Согласован" } else { "⏳ На согласовании" },
    }
}

fn event_view(event: &Event) -> EventView {
    EventView {
        kind_label: kind_label(event.kind()),
        icon: kind_icon(event.kind()),
        author: event.author().to_string(),
        content: event.content().to_string(),
        time_label: format_datetime(event.created_at()),
        approval_label: if event.is_approved() { "Согласовано" } else { "Не согласовано" },
        file: event.file_metadata().map(|file| FileView {
            name: file.name.clone(),
            url: file.url.to_string(),
            size_label: format_file_size(file.size),
            mime_type: file.mime_type.clone(),
        }),
    }
}
