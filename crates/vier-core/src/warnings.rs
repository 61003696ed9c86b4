//! Non-fatal advisory output
//!
//! Login failures, access-gated pages and the listing page cap are reported
//! through a `WarningSink` instead of aborting extraction.

use tracing::warn;

/// Receives non-fatal warnings raised during extraction
pub trait WarningSink: Send + Sync {
    fn warn(&self, message: &str, video_id: Option<&str>);
}

/// Default sink: emits each warning as a `tracing` event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingWarnings;

impl WarningSink for TracingWarnings {
    fn warn(&self, message: &str, video_id: Option<&str>) {
        match video_id {
            Some(id) => warn!(video_id = id, "{}", message),
            None => warn!("{}", message),
        }
    }
}
