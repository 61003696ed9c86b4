//! Video and login page parser
//!
//! Detects access-gated pages, reads the login form's error block and the
//! open graph metadata of a video page.

use scraper::{Html, Selector};

use super::rules::search_regex;

/// Marker present on pages that hide their metadata behind the login form
const LOGIN_FORM_MARKER: &str = r#"id="user-login""#;

/// Error block rendered by the login form on a failed attempt
const LOGIN_ERROR_PATTERN: &str =
    r#"(?s)<div class="messages error">\s*<div>\s*<h2.+?</h2>(.+?)<"#;

/// Open graph metadata of a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OgMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

/// Whether the page asks the visitor to log in before showing metadata.
pub fn requires_login(html: &str) -> bool {
    html.contains(LOGIN_FORM_MARKER)
}

/// Extract the error message from a login response, if any.
///
/// The message is stripped of markup and entities and trimmed.
pub fn parse_login_error(html: &str) -> Option<String> {
    let raw = search_regex(&[LOGIN_ERROR_PATTERN], html)?;
    let message = clean_html(&raw);
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

/// Parse the `og:title`, `og:description` and `og:image` meta tags.
pub fn parse_og_metadata(html: &str) -> OgMetadata {
    let document = Html::parse_document(html);
    OgMetadata {
        title: og_property(&document, "title"),
        description: og_property(&document, "description"),
        thumbnail: og_property(&document, "image"),
    }
}

/// Read the content of an `og:{name}` meta tag (`property` or `name` attribute).
fn og_property(document: &Html, name: &str) -> Option<String> {
    let selector_str = format!(
        r#"meta[property="og:{name}"], meta[name="og:{name}"]"#,
        name = name
    );
    let selector = Selector::parse(&selector_str).ok()?;

    document
        .select(&selector)
        .filter_map(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .find(|content| !content.is_empty())
}

/// Decode entities and drop tags from an HTML snippet.
fn clean_html(snippet: &str) -> String {
    let fragment = Html::parse_fragment(snippet);
    let text = fragment.root_element().text().collect::<String>();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_FAILED: &str = r#"
        <html><body>
        <div class="messages error">
            <div>
                <h2 class="element-invisible">Foutmelding</h2>
                Onbekende gebruikersnaam of wachtwoord &amp; probeer opnieuw.</div>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_requires_login() {
        assert!(requires_login(r#"<form id="user-login" action="/user/login">"#));
        assert!(!requires_login("<form id=\"search\">"));
    }

    #[test]
    fn test_parse_login_error() {
        let error = parse_login_error(LOGIN_FAILED);
        assert_eq!(
            error.as_deref(),
            Some("Onbekende gebruikersnaam of wachtwoord & probeer opnieuw.")
        );
    }

    #[test]
    fn test_parse_login_error_absent() {
        assert_eq!(parse_login_error("<html><body>Welkom terug</body></html>"), None);
    }

    #[test]
    fn test_parse_og_metadata() {
        let html = r#"
            <html><head>
            <meta property="og:title" content="Het wordt warm in De Moestuin" />
            <meta property="og:description" content="De vele uren werk eisen hun tol." />
            <meta property="og:image" content="http://www.vier.be/thumb.jpg" />
            </head></html>
        "#;
        let og = parse_og_metadata(html);
        assert_eq!(og.title.as_deref(), Some("Het wordt warm in De Moestuin"));
        assert_eq!(og.description.as_deref(), Some("De vele uren werk eisen hun tol."));
        assert_eq!(og.thumbnail.as_deref(), Some("http://www.vier.be/thumb.jpg"));
    }

    #[test]
    fn test_parse_og_metadata_name_attribute_and_entities() {
        let html = r#"<html><head><meta name="og:title" content="Jani &amp; Tokio"></head></html>"#;
        let og = parse_og_metadata(html);
        assert_eq!(og.title.as_deref(), Some("Jani & Tokio"));
        assert_eq!(og.description, None);
    }

    #[test]
    fn test_parse_og_metadata_empty_page() {
        assert_eq!(parse_og_metadata("<html></html>"), OgMetadata::default());
    }

    #[test]
    fn test_empty_og_content_is_ignored() {
        let html = r#"<html><head><meta property="og:title" content="  "></head></html>"#;
        assert_eq!(parse_og_metadata(html).title, None);
    }
}
