//! Listing page parser
//!
//! Parses a program's `/videos` listing page into video page links and a
//! "more results" flag.

use regex_lite::Regex;

use crate::error::{Result, VierError};
use crate::types::ListingPage;

/// Heading link to a video page, relative to the site root
const VIDEO_LINK_PATTERN: &str = r#"<h[23]><a href="(/[^/]+/videos/[^/]+(?:/\d+)?)">"#;

/// Label of the "load more" pager link, only rendered when more pages exist
const MORE_RESULTS_MARKER: &str = ">Meer<";

/// Parse a listing page.
///
/// Links are returned in document order, duplicates included.
///
/// # Examples
/// ```
/// use vier_core::parser::parse_listing_page;
///
/// let html = r#"<h2><a href="/demoestuin/videos/aflevering-1/101">1</a></h2><a>Meer</a>"#;
/// let page = parse_listing_page(html).unwrap();
/// assert_eq!(page.links, vec!["/demoestuin/videos/aflevering-1/101".to_string()]);
/// assert!(page.has_more);
/// ```
pub fn parse_listing_page(html: &str) -> Result<ListingPage> {
    let re = Regex::new(VIDEO_LINK_PATTERN)
        .map_err(|e| VierError::ParseError(format!("Invalid pattern: {}", e)))?;

    let links = re
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    Ok(ListingPage {
        links,
        has_more: has_more_results(html),
    })
}

/// Whether the listing advertises a further page.
pub fn has_more_results(html: &str) -> bool {
    html.contains(MORE_RESULTS_MARKER)
}
