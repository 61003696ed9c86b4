//! Main Vier scraper API
//!
//! This module provides the high-level API. It combines the HTTP client with
//! the video resolver and the listing paginator, and dispatches URLs to the
//! one that understands them.

use std::sync::Arc;

use serde::Deserialize;

use crate::client::{ClientConfig, PageFetcher, VierClient};
use crate::error::{Result, VierError};
use crate::listing::VideoListing;
use crate::patterns::{is_listing_url, is_video_url};
use crate::resolver::VideoResolver;
use crate::types::{Credentials, Extraction, PlaylistResult, VideoMetadata};

/// Configuration for the scraper
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// HTTP client settings
    pub client: ClientConfig,
    /// Account used to log in before resolving videos
    pub credentials: Option<Credentials>,
    /// Upper bound on listing pages fetched per walk (default: unbounded)
    pub max_pages: Option<u32>,
}

/// Main scraper API for vier.be and vijf.be
///
/// # Example
/// ```no_run
/// use vier_core::VierScraper;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = VierScraper::new()?;
///
///     let playlist = scraper.list_videos("http://www.vier.be/demoestuin/videos?page=6").await?;
///     println!("Found {} videos", playlist.entries.len());
///
///     Ok(())
/// }
/// ```
pub struct VierScraper {
    resolver: VideoResolver,
    listing: VideoListing,
}

impl VierScraper {
    /// Create a new anonymous scraper with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(ScraperConfig::default())
    }

    /// Create a new scraper with custom configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(config: ScraperConfig) -> Result<Self> {
        let client = VierClient::with_config(config.client.clone())?;
        Ok(Self::with_fetcher(Arc::new(client), config))
    }

    /// Create a new scraper on top of a custom page fetcher.
    ///
    /// The `client` section of `config` is ignored.
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, config: ScraperConfig) -> Self {
        let resolver =
            VideoResolver::new(fetcher.clone()).with_credentials(Arc::new(config.credentials));
        let listing = VideoListing::new(fetcher).with_max_pages(config.max_pages);
        Self { resolver, listing }
    }

    /// Whether any extractor handles the URL
    pub fn suitable(url: &str) -> bool {
        is_video_url(url) || is_listing_url(url)
    }

    /// Resolve a single video or embed page.
    pub async fn resolve(&mut self, url: &str) -> Result<VideoMetadata> {
        self.resolver.resolve(url).await
    }

    /// Collect the video pages of a program listing.
    pub async fn list_videos(&self, url: &str) -> Result<PlaylistResult> {
        self.listing.list_videos(url).await
    }

    /// Extract whatever the URL points at.
    ///
    /// # Errors
    /// `VierError::UnsupportedUrl` if the URL is neither a video nor a listing page.
    pub async fn extract(&mut self, url: &str) -> Result<Extraction> {
        if is_video_url(url) {
            return Ok(Extraction::Video(self.resolve(url).await?));
        }
        if is_listing_url(url) {
            return Ok(Extraction::Playlist(self.list_videos(url).await?));
        }
        Err(VierError::UnsupportedUrl(url.to_string()))
    }
}
