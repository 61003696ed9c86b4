//! Declarative field rules for scraping data attributes out of page HTML
//!
//! Each rule is an ordered list of alternative patterns; the first one
//! that matches wins.

use regex_lite::Regex;

use crate::error::{Result, VierError};

/// A named field with its alternative extraction patterns.
///
/// Every pattern must contain exactly one capture group holding the value.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Human readable name used in errors and logs
    pub name: &'static str,
    /// Patterns tried in order
    pub patterns: &'static [&'static str],
}

/// What to do when none of a rule's patterns match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// The field is mandatory; a miss is an error
    Required,
    /// Use this value on a miss
    Default(String),
}

/// Numeric video id, from a data attribute or embedded JSON
pub const VIDEO_ID: FieldRule = FieldRule {
    name: "video id",
    patterns: &[r#"data-nid="(\d+)""#, r#""nid"\s*:\s*"(\d+)""#],
};

/// Streamcloud application name
pub const APPLICATION: FieldRule = FieldRule {
    name: "application",
    patterns: &[
        r#"data-application="([^"]+)""#,
        r#""application"\s*:\s*"([^"]+)""#,
    ],
};

/// Streamcloud media filename (without `.mp4`)
pub const FILENAME: FieldRule = FieldRule {
    name: "filename",
    patterns: &[r#"data-filename="([^"]+)""#, r#""filename"\s*:\s*"([^"]+)""#],
};

impl FieldRule {
    /// Return the first captured value, trying patterns in order.
    pub fn find(&self, html: &str) -> Option<String> {
        search_regex(self.patterns, html)
    }

    /// Extract the field, applying the fallback on a miss.
    ///
    /// # Errors
    /// `VierError::FieldNotFound` when nothing matches and the field is required.
    pub fn extract(&self, html: &str, fallback: Fallback) -> Result<String> {
        match (self.find(html), fallback) {
            (Some(value), _) => Ok(value),
            (None, Fallback::Default(value)) => Ok(value),
            (None, Fallback::Required) => Err(VierError::FieldNotFound(self.name.to_string())),
        }
    }
}

/// Search for the first capture of any pattern in `html`.
pub fn search_regex(patterns: &[&str], html: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        let re = Regex::new(pattern).ok()?;
        Some(re.captures(html)?.get(1)?.as_str().to_string())
    })
}
