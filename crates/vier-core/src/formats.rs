//! Stream format probing for Wowza (streamcloud) playlist URLs
//!
//! A Wowza VOD asset is reachable through several manifests that share one
//! base path (`//host/app/_definst_/mp4:file.mp4`). The HLS manifest is
//! downloaded and expanded into its quality variants; the other protocols
//! are derived from the base path without a request. An unreachable or
//! malformed HLS manifest only drops the HLS variants.

use std::sync::Arc;

use async_trait::async_trait;
use m3u8_rs::{MasterPlaylist, Playlist};
use regex_lite::Regex;
use tracing::{debug, warn};
use url::Url;

use crate::client::PageFetcher;
use crate::error::{Result, VierError};
use crate::types::{StreamProtocol, StreamVariant};

/// Manifest file names appended to a Wowza base path
const WOWZA_MANIFESTS: [&str; 4] = [
    "playlist.m3u8",
    "manifest.f4m",
    "manifest.mpd",
    "jwplayer.smil",
];

/// Turns a playlist URL into concrete stream variants
#[async_trait]
pub trait FormatProber: Send + Sync {
    /// Probe `playlist_url`, leaving out every protocol listed in `skip`
    async fn probe(
        &self,
        playlist_url: &str,
        video_id: &str,
        skip: &[StreamProtocol],
    ) -> Result<Vec<StreamVariant>>;
}

/// Prober for Wowza streaming engine URLs
pub struct WowzaProber {
    fetcher: Arc<dyn PageFetcher>,
}

impl WowzaProber {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    async fn probe_hls(&self, m3u8_url: &str, video_id: &str) -> Result<Vec<StreamVariant>> {
        let manifest = self.fetcher.fetch_page(m3u8_url, video_id).await?;
        parse_hls_manifest(m3u8_url, &manifest)
    }

    /// HLS variants of `m3u8_url`, or none if the manifest is unusable
    async fn hls_variants(&self, m3u8_url: &str, video_id: &str) -> Vec<StreamVariant> {
        match self.probe_hls(m3u8_url, video_id).await {
            Ok(variants) => variants,
            Err(e) => {
                warn!(video_id, m3u8_url, error = %e, "Skipping HLS formats");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl FormatProber for WowzaProber {
    async fn probe(
        &self,
        playlist_url: &str,
        video_id: &str,
        skip: &[StreamProtocol],
    ) -> Result<Vec<StreamVariant>> {
        let Some((scheme, base)) = split_wowza_url(playlist_url) else {
            debug!(playlist_url, "Not a Wowza URL, probing as plain HLS");
            if skip.contains(&StreamProtocol::Hls) {
                return Ok(Vec::new());
            }
            return Ok(self.hls_variants(playlist_url, video_id).await);
        };

        let http_base = format!("{}:{}", scheme, base);
        let mut formats = Vec::new();

        if !skip.contains(&StreamProtocol::Hls) {
            formats.extend(
                self.hls_variants(&format!("{}/playlist.m3u8", http_base), video_id)
                    .await,
            );
        }
        if !skip.contains(&StreamProtocol::Hds) {
            formats.push(StreamVariant::new(
                "hds",
                format!("{}/manifest.f4m", http_base),
                StreamProtocol::Hds,
                "flv",
            ));
        }
        if !skip.contains(&StreamProtocol::Dash) {
            formats.push(StreamVariant::new(
                "dash",
                format!("{}/manifest.mpd", http_base),
                StreamProtocol::Dash,
                "mp4",
            ));
        }
        for protocol in [StreamProtocol::Rtmp, StreamProtocol::Rtsp] {
            if skip.contains(&protocol) {
                continue;
            }
            formats.push(streaming_server_variant(protocol, &base));
        }

        debug!(video_id, count = formats.len(), "Probed Wowza formats");
        Ok(formats)
    }
}

/// Split a Wowza manifest URL into its scheme and `//host/.../file` base.
///
/// Returns `None` when the URL does not end in a known Wowza manifest.
pub fn split_wowza_url(url: &str) -> Option<(String, String)> {
    let re = Regex::new(
        r"^(?P<scheme>https?):(?P<base>//[^?#]+?)/(?P<manifest>[^/?#]+)(?:[?#].*)?$",
    )
    .ok()?;
    let caps = re.captures(url)?;
    let manifest = caps.name("manifest")?.as_str();
    if !WOWZA_MANIFESTS.contains(&manifest) {
        return None;
    }
    Some((
        caps.name("scheme")?.as_str().to_string(),
        caps.name("base")?.as_str().to_string(),
    ))
}

/// RTMP/RTSP variant pointing at the streaming server directly
fn streaming_server_variant(protocol: StreamProtocol, base: &str) -> StreamVariant {
    let scheme = match protocol {
        StreamProtocol::Rtsp => "rtsp",
        _ => "rtmp",
    };
    let mut variant = StreamVariant::new(scheme, format!("{}:{}", scheme, base), protocol, "mp4");
    variant.play_path = base
        .rsplit('/')
        .next()
        .filter(|segment| segment.starts_with("mp4:"))
        .map(str::to_string);
    variant
}

/// Parse an HLS manifest into variants.
///
/// A master playlist yields one variant per stream; a media playlist is
/// itself the only variant.
pub fn parse_hls_manifest(m3u8_url: &str, manifest: &str) -> Result<Vec<StreamVariant>> {
    let playlist = m3u8_rs::parse_playlist_res(manifest.as_bytes())
        .map_err(|e| VierError::PlaylistError(format!("{:?}", e)))?;

    match playlist {
        Playlist::MasterPlaylist(pl) => process_master_playlist(pl, m3u8_url),
        Playlist::MediaPlaylist(_) => Ok(vec![StreamVariant::new(
            "hls",
            m3u8_url,
            StreamProtocol::Hls,
            "mp4",
        )]),
    }
}

fn process_master_playlist(
    playlist: MasterPlaylist,
    m3u8_url: &str,
) -> Result<Vec<StreamVariant>> {
    let base_url = Url::parse(m3u8_url).map_err(|e| VierError::PlaylistError(e.to_string()))?;

    playlist
        .variants
        .into_iter()
        .filter(|variant| !variant.is_i_frame)
        .enumerate()
        .map(|(index, variant)| -> Result<StreamVariant> {
            let stream_url = base_url
                .join(&variant.uri)
                .map_err(|e| VierError::PlaylistError(e.to_string()))?;
            let kbps = variant.bandwidth / 1000;
            let format_id = if kbps > 0 {
                format!("hls-{}", kbps)
            } else {
                format!("hls-{}", index)
            };

            let mut stream =
                StreamVariant::new(format_id, stream_url.to_string(), StreamProtocol::Hls, "mp4");
            stream.width = variant.resolution.as_ref().map(|r| r.width);
            stream.height = variant.resolution.as_ref().map(|r| r.height);
            stream.bandwidth = Some(variant.bandwidth).filter(|b| *b > 0);
            stream.codecs = variant.codecs;
            stream.frame_rate = variant.frame_rate;
            Ok(stream)
        })
        .collect()
}

/// Sort variants from worst to best.
///
/// Orders by height, then bandwidth, then protocol preference.
pub fn sort_formats(formats: &mut [StreamVariant]) {
    formats.sort_by_key(|f| {
        (
            f.height.unwrap_or(0),
            f.bandwidth.unwrap_or(0),
            f.protocol.preference(),
        )
    });
}
