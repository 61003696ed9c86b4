//! Vier Scraper Core Library
//!
//! This crate provides the core scraping functionality for the Flemish
//! broadcaster sites vier.be and vijf.be.
//!
//! # Features
//! - Resolve video and embed pages into metadata and stream variants
//! - Optional login, with an embed page fallback for access-gated videos
//! - Walk paginated program listings into an ordered playlist
//! - Rate-limited HTTP client with session cookies

pub mod client;
pub mod error;
pub mod formats;
pub mod listing;
pub mod parser;
pub mod patterns;
pub mod resolver;
pub mod scraper;
pub mod types;
pub mod warnings;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for convenience
pub use client::{ClientConfig, PageFetcher, RateLimiter, VierClient};
pub use error::{Result, VierError};
pub use formats::{FormatProber, WowzaProber};
pub use listing::VideoListing;
pub use resolver::{CredentialsProvider, VideoResolver};
pub use scraper::{ScraperConfig, VierScraper};
pub use types::{
    Credentials, Extraction, ListingPage, PlaylistResult, Site, StreamProtocol, StreamVariant,
    VideoMetadata, VideoReference,
};
pub use warnings::{TracingWarnings, WarningSink};
