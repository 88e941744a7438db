use std::error::Error;

use async_trait::async_trait;

use crate::event::{Event, FileMetadata, NewEvent};
use crate::week::{NewWeek, Week, WeekId, WeekPatch};

/// A source of audit data.
///
/// This is usually the hosted backend (see [`Client`](crate::client::Client)), but a local
/// [`Cache`](crate::cache::Cache) implements the same contract, so tests and offline embedders
/// can swap one for the other.
#[async_trait]
pub trait AuditSource {
    /// Every week this source contains, ordered by start date ascending
    async fn weeks(&self) -> Result<Vec<Week>, Box<dyn Error>>;

    /// Every event attached to the given week, ordered by creation time ascending
    async fn events_for_week(&self, week: WeekId) -> Result<Vec<Event>, Box<dyn Error>>;

    /// Insert a new week and return the stored row
    async fn create_week(&mut self, new_week: NewWeek) -> Result<Week, Box<dyn Error>>;

    /// Partially update a week and return the stored row.
    /// There is no version check: concurrent writers are last-write-wins.
    async fn update_week(&mut self, week: WeekId, patch: WeekPatch) -> Result<Week, Box<dyn Error>>;

    /// Insert a new event and return the stored row
    async fn create_event(&mut self, new_event: NewEvent) -> Result<Event, Box<dyn Error>>;

    /// Store a file under a timestamp-prefixed path and return its public descriptor
    async fn upload_file(&mut self, name: &str, mime_type: &str, bytes: Vec<u8>) -> Result<FileMetadata, Box<dyn Error>>;
}
