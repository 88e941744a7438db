//! Audit weeks: a schedule unit with a date range, an approval status and an optional per-day plan

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The row id of a week in the backend
pub type WeekId = i64;

/// Lifecycle of a week, from its creation by the auditor to the end of the audit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStatus {
    Draft,
    PendingApproval,
    Approved,
    InProgress,
    Completed,
}

impl WeekStatus {
    /// The snake_case form, as stored in backend rows (also used to build CSS badge classes)
    pub fn as_str(&self) -> &'static str {
        match self {
            WeekStatus::Draft => "draft",
            WeekStatus::PendingApproval => "pending_approval",
            WeekStatus::Approved => "approved",
            WeekStatus::InProgress => "in_progress",
            WeekStatus::Completed => "completed",
        }
    }

    /// Whether a week in this status goes through the initial approval flow,
    /// as opposed to being re-submitted after a rework
    pub fn is_awaiting_first_approval(&self) -> bool {
        match self {
            WeekStatus::Draft => true,
            WeekStatus::PendingApproval => true,
            _ => false,
        }
    }
}

/// One day of a week plan.
///
/// Older rows store a bare task list, newer ones also carry an approval flag.
/// Both shapes appear in stored data and must keep round-tripping unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayPlan {
    Tasks(Vec<String>),
    Detailed { tasks: Vec<String>, approved: bool },
}

impl DayPlan {
    pub fn tasks(&self) -> &[String] {
        match self {
            DayPlan::Tasks(tasks) => tasks,
            DayPlan::Detailed { tasks, .. } => tasks,
        }
    }

    /// Bare task lists have no approval flag and count as not approved
    pub fn is_approved(&self) -> bool {
        match self {
            DayPlan::Tasks(_) => false,
            DayPlan::Detailed { approved, .. } => *approved,
        }
    }
}

/// A whole week plan: ISO date string ("YYYY-MM-DD") to the tasks planned for that day
pub type Plan = BTreeMap<String, DayPlan>;

/// An audit week, as stored in the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Week {
    id: WeekId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: WeekStatus,
    progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    plan: Option<Plan>,
}

impl Week {
    /// Build a week from an insert payload and a server-assigned id.
    /// This is what the backend does on `create_week`, the local store does the same.
    pub fn new_with_parameters(id: WeekId, new_week: NewWeek) -> Self {
        Self {
            id,
            title: new_week.title,
            description: new_week.description,
            start_date: new_week.start_date,
            end_date: new_week.end_date,
            status: new_week.status,
            progress: new_week.progress,
            plan: new_week.plan,
        }
    }

    pub fn id(&self) -> WeekId               { self.id                      }
    pub fn title(&self) -> &str              { &self.title                  }
    pub fn description(&self) -> Option<&str> { self.description.as_deref() }
    pub fn start_date(&self) -> NaiveDate    { self.start_date              }
    pub fn end_date(&self) -> NaiveDate      { self.end_date                }
    pub fn status(&self) -> WeekStatus       { self.status                  }
    pub fn progress(&self) -> u8             { self.progress                }
    pub fn plan(&self) -> Option<&Plan>      { self.plan.as_ref()           }

    /// The plan entry for a given day, if any
    pub fn plan_for(&self, date: &NaiveDate) -> Option<&DayPlan> {
        let key = date.format("%Y-%m-%d").to_string();
        self.plan.as_ref().and_then(|plan| plan.get(key.as_str()))
    }

    /// Apply a partial update to this in-memory copy.
    /// This is what the backend does on `update_week`, and what optimistic local updates rely on.
    pub fn apply(&mut self, patch: &WeekPatch) {
        if let Some(title) = &patch.title             { self.title = title.clone();             }
        if let Some(description) = &patch.description { self.description = Some(description.clone()); }
        if let Some(start_date) = patch.start_date    { self.start_date = start_date;           }
        if let Some(end_date) = patch.end_date        { self.end_date = end_date;               }
        if let Some(status) = patch.status            { self.status = status;                   }
        if let Some(progress) = patch.progress        { self.progress = progress;               }
        if let Some(plan) = &patch.plan               { self.plan = Some(plan.clone());         }
    }
}

/// The insert payload for a new week
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewWeek {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: WeekStatus,
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
}

impl NewWeek {
    /// A brand new week starts its life as an empty draft
    pub fn new(title: String, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            title,
            description: None,
            start_date,
            end_date,
            status: WeekStatus::Draft,
            progress: 0,
            plan: None,
        }
    }
}

/// A partial update of a week. Only the `Some` fields are written.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WeekPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WeekStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
}

impl WeekPatch {
    pub fn status_and_progress(status: WeekStatus, progress: u8) -> Self {
        Self {
            status: Some(status),
            progress: Some(progress),
            ..Self::default()
        }
    }

    pub fn status_only(status: WeekStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn plan_only(plan: Plan) -> Self {
        Self {
            plan: Some(plan),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_wire_shapes() {
        // a bare task list...
        let bare: DayPlan = serde_json::from_str(r#"["интервью с ИТ", "сверка реестра"]"#).unwrap();
        assert_eq!(bare.tasks().len(), 2);
        assert_eq!(bare.is_approved(), false);
        assert_eq!(serde_json::to_string(&bare).unwrap(), r#"["интервью с ИТ","сверка реестра"]"#);

        // ...and the richer shape must both survive a round trip unchanged
        let detailed: DayPlan = serde_json::from_str(r#"{"tasks":["опрос склада"],"approved":true}"#).unwrap();
        assert_eq!(detailed.tasks(), ["опрос склада".to_string()]);
        assert!(detailed.is_approved());
        assert_eq!(serde_json::to_string(&detailed).unwrap(), r#"{"tasks":["опрос склада"],"approved":true}"#);
    }

    #[test]
    fn status_snake_case() {
        assert_eq!(serde_json::to_string(&WeekStatus::PendingApproval).unwrap(), r#""pending_approval""#);
        let status: WeekStatus = serde_json::from_str(r#""in_progress""#).unwrap();
        assert_eq!(status, WeekStatus::InProgress);
        assert_eq!(status.as_str(), "in_progress");
    }

    #[test]
    fn patch_only_writes_some_fields() {
        let new_week = NewWeek::new(
            "Неделя 1".to_string(),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
        );
        let mut week = Week::new_with_parameters(1, new_week);

        week.apply(&WeekPatch::status_and_progress(WeekStatus::Approved, 100));
        assert_eq!(week.status(), WeekStatus::Approved);
        assert_eq!(week.progress(), 100);
        // untouched fields stay as they were
        assert_eq!(week.title(), "Неделя 1");
        assert_eq!(week.end_date(), NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());

        let serialized = serde_json::to_string(&WeekPatch::status_only(WeekStatus::Completed)).unwrap();
        assert_eq!(serialized, r#"{"status":"completed"}"#);
    }
}
