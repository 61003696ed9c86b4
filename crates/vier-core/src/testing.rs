//! In-memory collaborators for unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::PageFetcher;
use crate::error::{Result, VierError};
use crate::warnings::WarningSink;

/// Serves canned pages and records every request in order.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    forms: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
    bodies: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer GET `url` with `body`
    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// Answer POST `url` with `body`
    pub fn with_form_response(mut self, url: &str, body: &str) -> Self {
        self.forms.insert(url.to_string(), body.to_string());
        self
    }

    /// Requests made so far, as `"METHOD url"`
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Encoded bodies of the POSTs made so far
    pub fn form_bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch_page(&self, url: &str, _id: &str) -> Result<String> {
        self.requests.lock().unwrap().push(format!("GET {}", url));
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| VierError::NotFound(url.to_string()))
    }

    async fn post_form(&self, url: &str, _id: &str, fields: &[(&str, &str)]) -> Result<String> {
        self.requests.lock().unwrap().push(format!("POST {}", url));
        self.bodies
            .lock()
            .unwrap()
            .push(crate::client::encode_form(fields));
        self.forms
            .get(url)
            .cloned()
            .ok_or_else(|| VierError::NotFound(url.to_string()))
    }
}

/// Collects warnings instead of logging them.
#[derive(Default)]
pub struct RecordingWarnings {
    messages: Mutex<Vec<(String, Option<String>)>>,
}

impl RecordingWarnings {
    pub fn messages(&self) -> Vec<(String, Option<String>)> {
        self.messages.lock().unwrap().clone()
    }
}

impl WarningSink for RecordingWarnings {
    fn warn(&self, message: &str, video_id: Option<&str>) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), video_id.map(str::to_string)));
    }
}
