//! Program video listings
//!
//! Walks the paginated `/{program}/videos` pages of a show and collects the
//! video page URLs they link to.

use std::sync::Arc;

use tracing::{debug, info};

use crate::client::PageFetcher;
use crate::error::Result;
use crate::parser::parse_listing_page;
use crate::patterns::{absolute_url, listing_page_url, parse_listing_url, parse_video_url};
use crate::types::PlaylistResult;
use crate::warnings::{TracingWarnings, WarningSink};

/// Paginator over a program's video listing.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use vier_core::{VideoListing, VierClient};
///
/// # async fn example() -> Result<(), vier_core::VierError> {
/// let listing = VideoListing::new(Arc::new(VierClient::new()?));
/// let playlist = listing.list_videos("http://www.vier.be/demoestuin/videos").await?;
/// println!("{}: {} videos", playlist.id, playlist.entries.len());
/// # Ok(())
/// # }
/// ```
pub struct VideoListing {
    fetcher: Arc<dyn PageFetcher>,
    warnings: Arc<dyn WarningSink>,
    max_pages: Option<u32>,
}

impl VideoListing {
    /// Create a paginator without a page cap.
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            warnings: Arc::new(TracingWarnings),
            max_pages: None,
        }
    }

    /// Stop a full walk after `max_pages` pages even if more are advertised.
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_warning_sink(mut self, warnings: Arc<dyn WarningSink>) -> Self {
        self.warnings = warnings;
        self
    }

    /// List the videos of a program.
    ///
    /// A URL with `?page=N` yields only that page (playlist id
    /// `{program}-page{N}`); without it every page from 0 is fetched until a
    /// page no longer advertises more results.
    ///
    /// # Errors
    /// - `VierError::UnsupportedUrl` if the URL is not a listing page
    /// - Any fetch error of a listing page
    pub async fn list_videos(&self, url: &str) -> Result<PlaylistResult> {
        let request = parse_listing_url(url)?;
        let site = request.site;
        let program = request.program.as_str();

        let (start_page, playlist_id) = match request.page {
            Some(page) => (page, format!("{}-page{}", program, page)),
            None => (0, program.to_string()),
        };

        let mut entries = Vec::new();
        let mut pages_fetched: u32 = 0;

        let mut current_page = start_page;
        loop {
            info!(program, "Downloading page {}", current_page.saturating_add(1));
            let html = self
                .fetcher
                .fetch_page(&listing_page_url(site, program, current_page), program)
                .await?;
            pages_fetched += 1;

            let page = parse_listing_page(&html)?;
            debug!(
                program,
                page = current_page,
                links = page.links.len(),
                "Parsed listing page"
            );

            for link in &page.links {
                match parse_video_url(&absolute_url(site, link)) {
                    Ok(reference) => entries.push(reference),
                    Err(e) => debug!(link = %link, error = %e, "Skipping unrecognised link"),
                }
            }

            if request.page.is_some() || !page.has_more {
                break;
            }

            if self.max_pages.is_some_and(|max| pages_fetched >= max) {
                self.warnings.warn(
                    &format!(
                        "Stopped listing after {} pages although more are available",
                        pages_fetched
                    ),
                    Some(program),
                );
                break;
            }

            match current_page.checked_add(1) {
                Some(next) => current_page = next,
                None => break,
            }
        }

        Ok(PlaylistResult {
            id: playlist_id,
            entries,
        })
    }
}
