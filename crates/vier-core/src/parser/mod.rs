//! HTML parsers for vier.be and vijf.be pages
//!
//! This module contains parsers for extracting data from site pages:
//! - `rules`: Ordered field rules for data attributes (video id, application, filename)
//! - `video`: Login detection, login errors and open graph metadata
//! - `listing`: Video links and pagination of program listing pages

pub mod listing;
pub mod rules;
pub mod video;

// Re-export main parsing functions
pub use listing::{has_more_results, parse_listing_page};
pub use rules::{Fallback, FieldRule, APPLICATION, FILENAME, VIDEO_ID};
pub use video::{parse_login_error, parse_og_metadata, requires_login, OgMetadata};
