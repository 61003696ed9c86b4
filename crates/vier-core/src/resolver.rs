//! Single video resolver
//!
//! Resolves a video or embed page into its metadata and stream variants.
//! Logs in first when credentials are available; pages that hide their
//! metadata behind the login form are replaced by the ungated embed page.

use std::sync::Arc;

use tracing::debug;

use crate::client::PageFetcher;
use crate::error::Result;
use crate::formats::{sort_formats, FormatProber, WowzaProber};
use crate::parser::{
    parse_login_error, parse_og_metadata, requires_login, Fallback, APPLICATION, FILENAME,
    VIDEO_ID,
};
use crate::patterns::{embed_url, login_url, parse_video_url, streamcloud_playlist_url};
use crate::types::{Credentials, Site, StreamProtocol, VideoMetadata};
use crate::warnings::{TracingWarnings, WarningSink};

/// Protocols never offered for this site (its DASH packaging does not play)
const SKIPPED_PROTOCOLS: [StreamProtocol; 1] = [StreamProtocol::Dash];

/// Supplies login credentials, if any are configured
pub trait CredentialsProvider: Send + Sync {
    fn credentials(&self) -> Option<Credentials>;
}

impl CredentialsProvider for Option<Credentials> {
    fn credentials(&self) -> Option<Credentials> {
        self.clone()
    }
}

impl CredentialsProvider for Credentials {
    fn credentials(&self) -> Option<Credentials> {
        Some(self.clone())
    }
}

/// Resolver for vier.be / vijf.be video pages.
///
/// Login state belongs to the instance: it starts logged out and a
/// successful login is kept for every later `resolve` call.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use vier_core::{VideoResolver, VierClient};
///
/// # async fn example() -> Result<(), vier_core::VierError> {
/// let mut resolver = VideoResolver::new(Arc::new(VierClient::new()?));
/// let video = resolver
///     .resolve("http://www.vier.be/planb/videos/het-wordt-warm-de-moestuin/16129")
///     .await?;
/// println!("{}: {} formats", video.title, video.formats.len());
/// # Ok(())
/// # }
/// ```
pub struct VideoResolver {
    fetcher: Arc<dyn PageFetcher>,
    prober: Arc<dyn FormatProber>,
    credentials: Arc<dyn CredentialsProvider>,
    warnings: Arc<dyn WarningSink>,
    logged_in: bool,
}

impl VideoResolver {
    /// Create an anonymous resolver probing formats through the same fetcher.
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            prober: Arc::new(WowzaProber::new(fetcher.clone())),
            fetcher,
            credentials: Arc::new(None::<Credentials>),
            warnings: Arc::new(TracingWarnings),
            logged_in: false,
        }
    }

    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_prober(mut self, prober: Arc<dyn FormatProber>) -> Self {
        self.prober = prober;
        self
    }

    pub fn with_warning_sink(mut self, warnings: Arc<dyn WarningSink>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Whether a login succeeded on this instance
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Resolve a video or embed page URL.
    ///
    /// # Errors
    /// - `VierError::UnsupportedUrl` if the URL is not a video or embed page
    /// - `VierError::FieldNotFound` if no page exposes the media filename
    /// - Any fetch error of the page or playlist requests
    pub async fn resolve(&mut self, url: &str) -> Result<VideoMetadata> {
        let reference = parse_video_url(url)?;
        let site = reference.site;
        let display_id = reference.display_id.as_str();

        if !self.logged_in {
            self.login(site).await;
        }

        let mut webpage = self.fetcher.fetch_page(url, display_id).await?;

        if requires_login(&webpage) {
            self.warnings
                .warn("Log in to extract metadata", Some(display_id));
            let fallback_id = reference.video_id.as_deref().unwrap_or(display_id);
            webpage = self
                .fetcher
                .fetch_page(&embed_url(site, fallback_id), display_id)
                .await?;
        }

        let video_id = VIDEO_ID.extract(
            &webpage,
            Fallback::Default(
                reference
                    .video_id
                    .clone()
                    .unwrap_or_else(|| display_id.to_string()),
            ),
        )?;
        let application =
            APPLICATION.extract(&webpage, Fallback::Default(site.default_application()))?;
        let filename = FILENAME.extract(&webpage, Fallback::Required)?;

        let playlist_url = streamcloud_playlist_url(&application, &filename);
        debug!(%video_id, %playlist_url, "Derived streamcloud playlist");

        let mut formats = self
            .prober
            .probe(&playlist_url, display_id, &SKIPPED_PROTOCOLS)
            .await?;
        formats.retain(|f| !SKIPPED_PROTOCOLS.contains(&f.protocol));
        sort_formats(&mut formats);

        let og = parse_og_metadata(&webpage);

        Ok(VideoMetadata {
            id: video_id,
            display_id: display_id.to_string(),
            site,
            title: og.title.unwrap_or_else(|| display_id.to_string()),
            description: og.description,
            thumbnail: og.thumbnail,
            playlist_url,
            formats,
        })
    }

    /// Submit the login form; failures only produce a warning.
    async fn login(&mut self, site: Site) {
        let Some(credentials) = self.credentials.credentials() else {
            return;
        };

        debug!(%site, username = %credentials.username, "Logging in");
        let fields = [
            ("form_id", "user_login"),
            ("name", credentials.username.as_str()),
            ("pass", credentials.password.as_str()),
        ];

        let login_page = match self.fetcher.post_form(&login_url(site), "login", &fields).await {
            Ok(page) => page,
            Err(e) => {
                self.warnings.warn(&format!("Unable to log in: {}", e), None);
                return;
            }
        };

        match parse_login_error(&login_page) {
            Some(error) => self.warnings.warn(&format!("Unable to log in: {}", error), None),
            None => self.logged_in = true,
        }
    }
}
