//! Day events: dated, typed artifacts attached to an audit week

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::week::WeekId;

/// The row id of an event in the backend
pub type EventId = i64;

/// What kind of artifact an event is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Interview,
    Note,
    Meeting,
    Comment,
    Scheme,
    Document,
    Task,
}

/// Descriptor of a file stored in the backend bucket, kept on the event that attached it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// The original file name, before the storage path was derived from it
    pub name: String,
    /// The public URL the file can be fetched from
    pub url: Url,
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Size in bytes
    pub size: u64,
}

/// A single event of an audit week.
///
/// Events are immutable: once created they are never updated or deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    week_id: WeekId,
    day_date: NaiveDate,
    #[serde(rename = "type")]
    kind: EventKind,
    author: String,
    content: String,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_metadata: Option<FileMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_approved: Option<bool>,
}

impl Event {
    /// Build an event from an insert payload, a server-assigned id and a creation timestamp.
    /// This is what the backend does on `create_event`, the local store does the same.
    pub fn new_with_parameters(id: EventId, new_event: NewEvent, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            week_id: new_event.week_id,
            day_date: new_event.day_date,
            kind: new_event.kind,
            author: new_event.author,
            content: new_event.content,
            created_at,
            file_metadata: new_event.file_metadata,
            is_approved: new_event.is_approved,
        }
    }

    pub fn id(&self) -> EventId              { self.id          }
    pub fn week_id(&self) -> WeekId          { self.week_id     }
    pub fn day_date(&self) -> NaiveDate      { self.day_date    }
    pub fn kind(&self) -> EventKind          { self.kind        }
    pub fn author(&self) -> &str             { &self.author     }
    pub fn content(&self) -> &str            { &self.content    }
    pub fn created_at(&self) -> &DateTime<Utc>          { &self.created_at          }
    pub fn file_metadata(&self) -> Option<&FileMetadata> { self.file_metadata.as_ref() }

    /// Events with no approval flag at all count as not approved
    pub fn is_approved(&self) -> bool {
        self.is_approved.unwrap_or(false)
    }
}

/// The insert payload for a new event
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewEvent {
    pub week_id: WeekId,
    pub day_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub author: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_metadata: Option<FileMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_approved: Option<bool>,
}

impl NewEvent {
    pub fn new(week_id: WeekId, day_date: NaiveDate, kind: EventKind, author: String, content: String) -> Self {
        Self {
            week_id,
            day_date,
            kind,
            author,
            content,
            file_metadata: None,
            is_approved: None,
        }
    }
}
