//! Data types for the Vier scraper
//!
//! This module contains all the core data structures used throughout the library.
//! All types implement Serialize and Deserialize for JSON compatibility with Tauri.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Broadcaster site a URL belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    /// vier.be
    Vier,
    /// vijf.be
    Vijf,
}

impl Site {
    /// Site name as it appears in the host (`vier` or `vijf`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Vier => "vier",
            Site::Vijf => "vijf",
        }
    }

    /// Parse the site name captured from a URL
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "vier" => Some(Site::Vier),
            "vijf" => Some(Site::Vijf),
            _ => None,
        }
    }

    /// Bare domain, e.g. `vier.be`
    pub fn domain(&self) -> String {
        format!("{}.be", self.as_str())
    }

    /// Base URL all site requests are made against
    pub fn base_url(&self) -> String {
        format!("http://www.{}.be", self.as_str())
    }

    /// Streamcloud application used when the page does not name one
    pub fn default_application(&self) -> String {
        format!("{}_vod", self.as_str())
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a single video page, as parsed from its URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoReference {
    /// Absolute URL of the video or embed page
    pub url: String,
    /// Site the video is hosted on
    pub site: Site,
    /// Slug identifying the video page (the embed id for embed URLs)
    pub display_id: String,
    /// Numeric video id, when present in the URL
    pub video_id: Option<String>,
    /// Embed id, only set for `/video/v3/embed/{id}` URLs
    pub embed_id: Option<String>,
}

/// Account credentials for the site login form
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Delivery protocol of a stream variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamProtocol {
    /// HTTP Live Streaming (m3u8)
    Hls,
    /// Adobe HTTP Dynamic Streaming (f4m)
    Hds,
    /// MPEG-DASH (mpd)
    Dash,
    Rtmp,
    Rtsp,
}

impl StreamProtocol {
    /// Preference used when ordering otherwise equal variants (higher is better)
    pub fn preference(&self) -> u8 {
        match self {
            StreamProtocol::Hls => 4,
            StreamProtocol::Hds => 3,
            StreamProtocol::Dash => 2,
            StreamProtocol::Rtmp => 1,
            StreamProtocol::Rtsp => 0,
        }
    }
}

/// One downloadable variant of a video stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamVariant {
    /// Short identifier, e.g. `hls-1200` or `rtmp`
    pub format_id: String,
    /// URL of the variant (or of its manifest)
    pub url: String,
    pub protocol: StreamProtocol,
    /// Container extension
    pub ext: String,
    pub width: Option<u64>,
    pub height: Option<u64>,
    /// Peak bandwidth in bits per second
    pub bandwidth: Option<u64>,
    pub codecs: Option<String>,
    pub frame_rate: Option<f64>,
    /// RTMP/RTSP play path
    pub play_path: Option<String>,
}

impl StreamVariant {
    /// Create a variant with only the mandatory fields set
    pub fn new(
        format_id: impl Into<String>,
        url: impl Into<String>,
        protocol: StreamProtocol,
        ext: impl Into<String>,
    ) -> Self {
        Self {
            format_id: format_id.into(),
            url: url.into(),
            protocol,
            ext: ext.into(),
            width: None,
            height: None,
            bandwidth: None,
            codecs: None,
            frame_rate: None,
            play_path: None,
        }
    }
}

/// Metadata and stream variants of a resolved video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Numeric video id (falls back to the URL id or display id)
    pub id: String,
    pub display_id: String,
    pub site: Site,
    /// Page title, the display id when the page has none
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    /// Streamcloud HLS playlist the formats were probed from
    pub playlist_url: String,
    /// Stream variants, worst first
    pub formats: Vec<StreamVariant>,
}

/// Links and pagination state of one listing page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    /// Site-relative video page links in document order
    pub links: Vec<String>,
    /// Whether the page advertises more results
    pub has_more: bool,
}

/// Ordered collection of video references produced by a listing walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistResult {
    /// Program name, suffixed with `-page{N}` for single-page requests
    pub id: String,
    pub entries: Vec<VideoReference>,
}

/// Result of dispatching a URL to the matching extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Extraction {
    Video(VideoMetadata),
    Playlist(PlaylistResult),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_urls() {
        assert_eq!(Site::Vier.base_url(), "http://www.vier.be");
        assert_eq!(Site::Vijf.domain(), "vijf.be");
        assert_eq!(Site::Vijf.default_application(), "vijf_vod");
    }

    #[test]
    fn test_site_from_name() {
        assert_eq!(Site::from_name("vier"), Some(Site::Vier));
        assert_eq!(Site::from_name("vijf"), Some(Site::Vijf));
        assert_eq!(Site::from_name("zes"), None);
    }

    #[test]
    fn test_site_serialization() {
        let json = serde_json::to_string(&Site::Vijf).unwrap();
        assert_eq!(json, "\"vijf\"");
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("jan", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("jan"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_protocol_preference_order() {
        assert!(StreamProtocol::Hls.preference() > StreamProtocol::Dash.preference());
        assert!(StreamProtocol::Rtmp.preference() > StreamProtocol::Rtsp.preference());
    }

    #[test]
    fn test_extraction_serialization_is_tagged() {
        let extraction = Extraction::Playlist(PlaylistResult {
            id: "demoestuin".to_string(),
            entries: Vec::new(),
        });
        let json = serde_json::to_string(&extraction).unwrap();
        assert!(json.contains("\"type\":\"playlist\""));
        assert!(json.contains("\"id\":\"demoestuin\""));
    }

    #[test]
    fn test_listing_page_default() {
        let page = ListingPage::default();
        assert!(page.links.is_empty());
        assert!(!page.has_more);
    }
}
