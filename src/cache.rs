//! This module provides a local, file-backed store for audit data
//!
//! It implements the same [`AuditSource`](crate::traits::AuditSource) contract as the remote
//! [`Client`](crate::client::Client), which makes it a drop-in stand-in for the server: embedders
//! can use it for offline snapshots, and integration tests use it to mock the backend.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::event::{Event, EventId, FileMetadata, NewEvent};
use crate::mock_behaviour::MockBehaviour;
use crate::settings::FILES_BUCKET;
use crate::traits::AuditSource;
use crate::week::{NewWeek, Week, WeekId, WeekPatch};

/// An audit data source that stores its rows in a local file
#[derive(Debug)]
pub struct Cache {
    backing_file: PathBuf,
    data: CachedData,

    /// In case we want to simulate an error in an integration test, this should be set to Some(error_simulator)
    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct CachedData {
    weeks: Vec<Week>,
    events: Vec<Event>,
    next_week_id: WeekId,
    next_event_id: EventId,
}

impl Cache {
    /// Initialize a cache from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let data = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self {
            backing_file: PathBuf::from(path),
            data,
            mock_behaviour: None,
        })
    }

    /// Initialize a cache with the default contents
    pub fn new(path: &Path) -> Self {
        Self {
            backing_file: PathBuf::from(path),
            data: CachedData {
                next_week_id: 1,
                next_event_id: 1,
                ..CachedData::default()
            },
            mock_behaviour: None,
        }
    }

    pub fn set_mock_behaviour(&mut self, mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>) {
        self.mock_behaviour = mock_behaviour;
    }

    /// Store the current contents to the backing file
    fn save_to_file(&mut self) {
        let path = &self.backing_file;
        let file = match std::fs::File::create(path) {
            Err(err) => {
                log::warn!("Unable to save file {:?}: {}", path, err);
                return;
            },
            Ok(f) => f,
        };

        if let Err(err) = serde_json::to_writer(file, &self.data) {
            log::warn!("Unable to serialize: {}", err);
            return;
        };
    }

    /// Compares two Caches to check they have the same current content
    pub fn has_same_contents_than(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

#[async_trait]
impl AuditSource for Cache {
    async fn weeks(&self) -> Result<Vec<Week>, Box<dyn Error>> {
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_list_weeks()?;
        }

        let mut weeks = self.data.weeks.clone();
        weeks.sort_by_key(|week| week.start_date());
        Ok(weeks)
    }

    async fn events_for_week(&self, week: WeekId) -> Result<Vec<Event>, Box<dyn Error>> {
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_list_events()?;
        }

        let mut events: Vec<Event> = self.data.events.iter()
            .filter(|event| event.week_id() == week)
            .cloned()
            .collect();
        events.sort_by_key(|event| *event.created_at());
        Ok(events)
    }

    async fn create_week(&mut self, new_week: NewWeek) -> Result<Week, Box<dyn Error>> {
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_create_week()?;
        }

        let week = Week::new_with_parameters(self.data.next_week_id, new_week);
        self.data.next_week_id = self.data.next_week_id + 1;
        self.data.weeks.push(week.clone());
        self.save_to_file();
        Ok(week)
    }

    async fn update_week(&mut self, week: WeekId, patch: WeekPatch) -> Result<Week, Box<dyn Error>> {
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_update_week()?;
        }

        let stored = match self.data.weeks.iter_mut().find(|stored| stored.id() == week) {
            None => return Err(format!("Storage operation failed: no week has id {}", week).into()),
            Some(stored) => stored,
        };
        stored.apply(&patch);
        let updated = stored.clone();
        self.save_to_file();
        Ok(updated)
    }

    async fn create_event(&mut self, new_event: NewEvent) -> Result<Event, Box<dyn Error>> {
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_create_event()?;
        }

        let event = Event::new_with_parameters(self.data.next_event_id, new_event, Utc::now());
        self.data.next_event_id = self.data.next_event_id + 1;
        self.data.events.push(event.clone());
        self.save_to_file();
        Ok(event)
    }

    async fn upload_file(&mut self, name: &str, mime_type: &str, bytes: Vec<u8>) -> Result<FileMetadata, Box<dyn Error>> {
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_upload_file()?;
        }

        // The content itself is not kept: this store only mirrors the metadata contract
        let file_path = format!("{}_{}", Utc::now().timestamp_millis(), sanitize_filename::sanitize(name));
        let url = Url::parse(&format!("local://{}/{}", FILES_BUCKET, file_path))?;
        log::debug!("Discarding the content of {} ({} bytes)", name, bytes.len());

        Ok(FileMetadata {
            name: name.to_string(),
            url,
            mime_type: mime_type.to_string(),
            size: bytes.len() as u64,
        })
    }
}
