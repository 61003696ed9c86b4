//! Vier Scraper Tauri Integration
//!
//! This crate provides Tauri commands for integrating the vier.be / vijf.be
//! scraper into Tauri 2.0 applications.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vier_tauri::ScraperState;
//! use tauri::Manager;
//!
//! fn main() {
//!     tauri::Builder::default()
//!         .setup(|app| {
//!             app.manage(ScraperState::new()?);
//!             Ok(())
//!         })
//!         .invoke_handler(tauri::generate_handler![
//!             vier_tauri::commands::resolve_video,
//!             vier_tauri::commands::list_videos,
//!             vier_tauri::commands::extract,
//!         ])
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! # Commands
//! - `resolve_video` - Resolve a video or embed page
//! - `list_videos` - Collect the videos of a program listing
//! - `extract` - Dispatch any supported URL

pub mod commands;

use std::sync::Arc;
use tokio::sync::Mutex;

use vier_core::{ScraperConfig, VierScraper};

/// Thread-safe wrapper for VierScraper.
///
/// The resolver keeps its login state between calls, so commands share one
/// scraper behind a mutex.
pub struct ScraperState {
    scraper: Arc<Mutex<VierScraper>>,
}

impl ScraperState {
    /// Create a new anonymous ScraperState with default configuration.
    ///
    /// # Errors
    /// Returns an error string if the scraper cannot be created.
    pub fn new() -> Result<Self, String> {
        Self::with_config(ScraperConfig::default())
    }

    /// Create a new ScraperState, e.g. with credentials from the app settings.
    ///
    /// # Errors
    /// Returns an error string if the scraper cannot be created.
    pub fn with_config(config: ScraperConfig) -> Result<Self, String> {
        let scraper = VierScraper::with_config(config).map_err(|e| e.to_string())?;
        Ok(Self {
            scraper: Arc::new(Mutex::new(scraper)),
        })
    }

    /// Get a reference to the inner scraper.
    pub fn scraper(&self) -> &Arc<Mutex<VierScraper>> {
        &self.scraper
    }
}
