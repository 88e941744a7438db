//! This module provides a client to connect to the hosted audit backend
//!
//! Weeks and events live in backend tables reached through its row-level REST endpoint,
//! uploaded files go to its storage endpoint. There is no transactionality, no retry and
//! no idempotency key: submitting the same write twice produces two records.

use std::error::Error;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::event::{Event, FileMetadata, NewEvent};
use crate::settings::FILES_BUCKET;
use crate::traits::AuditSource;
use crate::week::{NewWeek, Week, WeekId, WeekPatch};

/// An audit data source that fetches its rows from the hosted backend
pub struct Client {
    base_url: Url,
    api_key: String,
    access_token: Option<String>,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>, T: ToString>(base_url: S, api_key: T) -> Result<Self, Box<dyn Error>> {
        let base_url = Url::parse(base_url.as_ref())?;

        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
            access_token: None,
        })
    }

    /// Make row-level requests act on behalf of a signed-in user.
    /// Without this, requests are sent with the anonymous key only.
    pub fn set_access_token(&mut self, access_token: Option<String>) {
        self.access_token = access_token;
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.api_key)
    }

    fn table_url(&self, table: &str) -> Result<Url, Box<dyn Error>> {
        Ok(self.base_url.join(&format!("/rest/v1/{}", table))?)
    }

    async fn fetch_rows<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, Box<dyn Error>> {
        let response = reqwest::Client::new()
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer())
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        Ok(response.json().await?)
    }

    /// Insert one row and return it as stored by the server
    async fn insert_row<P: Serialize, T: DeserializeOwned>(&self, table: &str, payload: &P) -> Result<T, Box<dyn Error>> {
        let url = self.table_url(table)?;

        let response = reqwest::Client::new()
            .post(url)
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .bearer_auth(self.bearer())
            .json(&[payload])
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        let mut rows: Vec<T> = response.json().await?;
        if rows.is_empty() {
            return Err(format!("Storage operation failed: no row returned by insert into {}", table).into());
        }
        Ok(rows.remove(0))
    }
}

#[async_trait]
impl AuditSource for Client {
    async fn weeks(&self) -> Result<Vec<Week>, Box<dyn Error>> {
        let mut url = self.table_url("weeks")?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "start_date.asc");

        self.fetch_rows(url).await
    }

    async fn events_for_week(&self, week: WeekId) -> Result<Vec<Event>, Box<dyn Error>> {
        let mut url = self.table_url("events")?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("week_id", &format!("eq.{}", week))
            .append_pair("order", "created_at.asc");

        self.fetch_rows(url).await
    }

    async fn create_week(&mut self, new_week: NewWeek) -> Result<Week, Box<dyn Error>> {
        self.insert_row("weeks", &new_week).await
    }

    async fn update_week(&mut self, week: WeekId, patch: WeekPatch) -> Result<Week, Box<dyn Error>> {
        let mut url = self.table_url("weeks")?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{}", week));

        let response = reqwest::Client::new()
            .patch(url)
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .bearer_auth(self.bearer())
            .json(&patch)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        let mut rows: Vec<Week> = response.json().await?;
        if rows.is_empty() {
            return Err(format!("Storage operation failed: no week has id {}", week).into());
        }
        Ok(rows.remove(0))
    }

    async fn create_event(&mut self, new_event: NewEvent) -> Result<Event, Box<dyn Error>> {
        self.insert_row("events", &new_event).await
    }

    async fn upload_file(&mut self, name: &str, mime_type: &str, bytes: Vec<u8>) -> Result<FileMetadata, Box<dyn Error>> {
        // Prefixing with the upload timestamp keeps same-named files from overwriting each other
        let file_path = format!("{}_{}", Utc::now().timestamp_millis(), sanitize_filename::sanitize(name));
        let upload_url = self.base_url.join(&format!("/storage/v1/object/{}/{}", FILES_BUCKET, file_path))?;
        let size = bytes.len() as u64;

        let response = reqwest::Client::new()
            .post(upload_url)
            .header("apikey", &self.api_key)
            .header(CONTENT_TYPE, mime_type)
            .header("x-upsert", "true")
            .bearer_auth(self.bearer())
            .body(bytes)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        let public_url = self.base_url.join(&format!("/storage/v1/object/public/{}/{}", FILES_BUCKET, file_path))?;
        log::debug!("Uploaded {} ({} bytes) as {}", name, size, public_url);

        Ok(FileMetadata {
            name: name.to_string(),
            url: public_url,
            mime_type: mime_type.to_string(),
            size,
        })
    }
}
