//! Tauri commands for the Vier scraper
//!
//! This module contains all Tauri commands that can be invoked from the frontend.

use tauri::State;

use crate::ScraperState;
use vier_core::{Extraction, PlaylistResult, VideoMetadata};

/// Resolve a video or embed page into metadata and stream variants.
///
/// # Returns
/// * `Ok(VideoMetadata)` with title, description and formats
/// * `Err(String)` with error message if resolution fails
#[tauri::command]
pub async fn resolve_video(
    state: State<'_, ScraperState>,
    url: String,
) -> Result<VideoMetadata, String> {
    let mut scraper = state.scraper().lock().await;
    scraper.resolve(&url).await.map_err(|e| e.to_string())
}

/// List the videos of a program listing page.
///
/// # Returns
/// * `Ok(PlaylistResult)` with the video page references in listing order
/// * `Err(String)` with error message if a listing page cannot be fetched
#[tauri::command]
pub async fn list_videos(
    state: State<'_, ScraperState>,
    url: String,
) -> Result<PlaylistResult, String> {
    let scraper = state.scraper().lock().await;
    scraper.list_videos(&url).await.map_err(|e| e.to_string())
}

/// Extract whatever a supported URL points at.
#[tauri::command]
pub async fn extract(
    state: State<'_, ScraperState>,
    url: String,
) -> Result<Extraction, String> {
    let mut scraper = state.scraper().lock().await;
    scraper.extract(&url).await.map_err(|e| e.to_string())
}
