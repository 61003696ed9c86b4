//! URL patterns for vier.be and vijf.be
//!
//! Recognises the two video page shapes and the listing page shape, and
//! builds every URL the scraper requests.

use regex_lite::Regex;

use crate::error::{Result, VierError};
use crate::types::{Site, VideoReference};

/// Video page (`/{show}/videos/{slug}[/{id}]`) or embed page (`/video/v3/embed/{id}`)
const VIDEO_URL_PATTERN: &str = r"^https?://(?:www\.)?(?P<site>vier|vijf)\.be/(?:[^/]+/videos/(?P<display_id>[^/]+)(?:/(?P<id>\d+))?|video/v3/embed/(?P<embed_id>\d+))";

/// Listing page (`/{program}/videos`), optionally with a `page` query parameter
const LISTING_URL_PATTERN: &str =
    r"^https?://(?:www\.)?(?P<site>vier|vijf)\.be/(?P<program>[^/]+)/videos(?:\?.*\bpage=(?P<page>\d+)|$)";

/// Streamcloud origin serving the VOD assets of both sites
const STREAMCLOUD_BASE_URL: &str = "http://vod.streamcloud.be";

/// Parsed listing URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub site: Site,
    pub program: String,
    /// Explicit page number; `None` walks every page
    pub page: Option<u32>,
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| VierError::ParseError(format!("Invalid pattern: {}", e)))
}

fn capture_site(caps: &regex_lite::Captures<'_>, url: &str) -> Result<Site> {
    caps.name("site")
        .and_then(|m| Site::from_name(m.as_str()))
        .ok_or_else(|| VierError::UnsupportedUrl(url.to_string()))
}

/// Parse a video or embed page URL.
///
/// For embed URLs both `display_id` and `video_id` default to the embed id.
///
/// # Examples
/// ```
/// use vier_core::patterns::parse_video_url;
///
/// let reference = parse_video_url("http://www.vier.be/planb/videos/het-wordt-warm-de-moestuin/16129").unwrap();
/// assert_eq!(reference.display_id, "het-wordt-warm-de-moestuin");
/// assert_eq!(reference.video_id.as_deref(), Some("16129"));
/// ```
pub fn parse_video_url(url: &str) -> Result<VideoReference> {
    let re = compile(VIDEO_URL_PATTERN)?;
    let caps = re
        .captures(url)
        .ok_or_else(|| VierError::UnsupportedUrl(url.to_string()))?;

    let site = capture_site(&caps, url)?;
    let embed_id = caps.name("embed_id").map(|m| m.as_str().to_string());
    let display_id = caps
        .name("display_id")
        .map(|m| m.as_str().to_string())
        .or_else(|| embed_id.clone())
        .ok_or_else(|| VierError::UnsupportedUrl(url.to_string()))?;
    let video_id = caps
        .name("id")
        .map(|m| m.as_str().to_string())
        .or_else(|| embed_id.clone());

    Ok(VideoReference {
        url: url.to_string(),
        site,
        display_id,
        video_id,
        embed_id,
    })
}

/// Parse a listing page URL.
///
/// # Examples
/// ```
/// use vier_core::patterns::parse_listing_url;
///
/// let request = parse_listing_url("http://www.vier.be/demoestuin/videos?page=6").unwrap();
/// assert_eq!(request.program, "demoestuin");
/// assert_eq!(request.page, Some(6));
/// ```
pub fn parse_listing_url(url: &str) -> Result<ListingRequest> {
    let re = compile(LISTING_URL_PATTERN)?;
    let caps = re
        .captures(url)
        .ok_or_else(|| VierError::UnsupportedUrl(url.to_string()))?;

    let site = capture_site(&caps, url)?;
    let program = caps
        .name("program")
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| VierError::UnsupportedUrl(url.to_string()))?;
    let page = match caps.name("page") {
        Some(m) => Some(
            m.as_str()
                .parse::<u32>()
                .map_err(|_| VierError::UnsupportedUrl(url.to_string()))?,
        ),
        None => None,
    };

    Ok(ListingRequest { site, program, page })
}

/// Whether the URL is a video or embed page
pub fn is_video_url(url: &str) -> bool {
    compile(VIDEO_URL_PATTERN)
        .map(|re| re.is_match(url))
        .unwrap_or(false)
}

/// Whether the URL is a listing page
pub fn is_listing_url(url: &str) -> bool {
    compile(LISTING_URL_PATTERN)
        .map(|re| re.is_match(url))
        .unwrap_or(false)
}

/// Embed page for a video id
pub fn embed_url(site: Site, video_id: &str) -> String {
    format!("{}/video/v3/embed/{}", site.base_url(), video_id)
}

/// Login form endpoint
pub fn login_url(site: Site) -> String {
    format!("{}/user/login", site.base_url())
}

/// Listing page for a program (pages are 0-based)
pub fn listing_page_url(site: Site, program: &str, page: u32) -> String {
    format!("{}/{}/videos?page={}", site.base_url(), program, page)
}

/// Absolute URL for a site-relative path
pub fn absolute_url(site: Site, path: &str) -> String {
    format!("{}{}", site.base_url(), path)
}

/// HLS playlist of an MP4 asset on streamcloud
///
/// # Examples
/// ```
/// use vier_core::patterns::streamcloud_playlist_url;
///
/// assert_eq!(
///     streamcloud_playlist_url("planb_vod", "X"),
///     "http://vod.streamcloud.be/planb_vod/_definst_/mp4:X.mp4/playlist.m3u8"
/// );
/// ```
pub fn streamcloud_playlist_url(application: &str, filename: &str) -> String {
    format!(
        "{}/{}/_definst_/mp4:{}.mp4/playlist.m3u8",
        STREAMCLOUD_BASE_URL, application, filename
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_video_url_with_id() {
        let r = parse_video_url("http://www.vier.be/planb/videos/het-wordt-warm-de-moestuin/16129")
            .unwrap();
        assert_eq!(r.site, Site::Vier);
        assert_eq!(r.display_id, "het-wordt-warm-de-moestuin");
        assert_eq!(r.video_id.as_deref(), Some("16129"));
        assert_eq!(r.embed_id, None);
    }

    #[test]
    fn test_parse_video_url_without_id() {
        let r = parse_video_url("http://www.vier.be/planb/videos/dit-najaar-plan-b").unwrap();
        assert_eq!(r.display_id, "dit-najaar-plan-b");
        assert_eq!(r.video_id, None);
    }

    #[test]
    fn test_parse_video_url_vijf_https_no_www() {
        let r =
            parse_video_url("https://vijf.be/temptationisland/videos/zo-grappig/2561614").unwrap();
        assert_eq!(r.site, Site::Vijf);
        assert_eq!(r.video_id.as_deref(), Some("2561614"));
    }

    #[test]
    fn test_parse_embed_url() {
        let r = parse_video_url("http://www.vier.be/video/v3/embed/16129").unwrap();
        assert_eq!(r.embed_id.as_deref(), Some("16129"));
        assert_eq!(r.display_id, "16129");
        assert_eq!(r.video_id.as_deref(), Some("16129"));
    }

    #[test]
    fn test_parse_video_url_rejects_other_urls() {
        assert!(matches!(
            parse_video_url("http://www.vier.be/demoestuin/videos"),
            Err(VierError::UnsupportedUrl(_))
        ));
        assert!(parse_video_url("http://www.zes.be/planb/videos/x/1").is_err());
        assert!(parse_video_url("http://www.vier.be/video/v3/embed/abc").is_err());
        assert!(parse_video_url("").is_err());
    }

    #[test]
    fn test_parse_listing_url() {
        let r = parse_listing_url("http://www.vier.be/demoestuin/videos").unwrap();
        assert_eq!(r.site, Site::Vier);
        assert_eq!(r.program, "demoestuin");
        assert_eq!(r.page, None);

        let r = parse_listing_url("http://www.vijf.be/temptationisland/videos?page=7").unwrap();
        assert_eq!(r.site, Site::Vijf);
        assert_eq!(r.page, Some(7));
    }

    #[test]
    fn test_parse_listing_url_page_among_other_params() {
        let r = parse_listing_url("http://www.vier.be/demoestuin/videos?sort=new&page=3").unwrap();
        assert_eq!(r.page, Some(3));
    }

    #[test]
    fn test_parse_listing_url_rejects_video_pages() {
        assert!(parse_listing_url("http://www.vier.be/planb/videos/het-wordt-warm/16129").is_err());
        assert!(parse_listing_url("http://www.vier.be/demoestuin/videos/").is_err());
    }

    #[test]
    fn test_url_kinds_are_disjoint() {
        let video = "http://www.vier.be/planb/videos/het-wordt-warm-de-moestuin/16129";
        let listing = "http://www.vier.be/demoestuin/videos?page=6";
        assert!(is_video_url(video));
        assert!(!is_listing_url(video));
        assert!(is_listing_url(listing));
        assert!(!is_video_url(listing));
    }

    #[test]
    fn test_url_builders() {
        assert_eq!(embed_url(Site::Vier, "16129"), "http://www.vier.be/video/v3/embed/16129");
        assert_eq!(login_url(Site::Vijf), "http://www.vijf.be/user/login");
        assert_eq!(
            listing_page_url(Site::Vier, "demoestuin", 0),
            "http://www.vier.be/demoestuin/videos?page=0"
        );
        assert_eq!(
            absolute_url(Site::Vier, "/show/videos/slug-1"),
            "http://www.vier.be/show/videos/slug-1"
        );
    }

    proptest! {
        #[test]
        fn prop_video_url_roundtrips_ids(
            show in "[a-z][a-z0-9-]{0,20}",
            slug in "[a-z][a-z0-9-]{0,40}",
            id in 1u32..10_000_000,
        ) {
            let url = format!("http://www.vier.be/{}/videos/{}/{}", show, slug, id);
            let r = parse_video_url(&url).unwrap();
            let id_str = id.to_string();
            prop_assert_eq!(r.display_id, slug);
            prop_assert_eq!(r.video_id.as_deref(), Some(id_str.as_str()));
        }

        #[test]
        fn prop_playlist_url_contains_parts_once(
            app in "[a-z_]{1,12}",
            file in "[A-Za-z0-9]{1,20}",
        ) {
            let url = streamcloud_playlist_url(&app, &file);
            let app_segment = format!("/{}/_definst_/", app);
            let file_segment = format!("/mp4:{}.mp4/", file);
            prop_assert_eq!(url.matches(app_segment.as_str()).count(), 1);
            prop_assert_eq!(url.matches(file_segment.as_str()).count(), 1);
        }
    }
}
