//! HTML parser for extracting image references
//!
//! Scans a page for image-bearing elements and resolves their sources into
//! absolute URLs. This is a pure function of the page URL and HTML text.

use crate::url::resolve_reference;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Image-bearing tags and the attribute holding each one's source
pub const IMAGE_SOURCE_ATTRIBUTES: &[(&str, &str)] =
    &[("img", "src"), ("object", "data"), ("embed", "src")];

/// Extracts image references from an HTML page
///
/// # Extraction Rules
///
/// - Elements listed in [`IMAGE_SOURCE_ATTRIBUTES`], in document order
/// - Empty sources and `data:` URIs are skipped
/// - Sources are resolved against `base_url` (the page's final URL)
/// - Duplicates are dropped, keeping the first occurrence
///
/// # Example
///
/// ```
/// use image_survey::crawler::extract_image_references;
/// use url::Url;
///
/// let html = r#"<img src="a.png"><embed src="/a.png"><object data="b.gif"></object>"#;
/// let base = Url::parse("https://example.com/").unwrap();
/// let refs = extract_image_references(html, &base);
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].as_str(), "https://example.com/a.png");
/// ```
pub fn extract_image_references(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let selector_text = IMAGE_SOURCE_ATTRIBUTES
        .iter()
        .map(|(tag, _)| *tag)
        .collect::<Vec<_>>()
        .join(", ");

    let selector = match Selector::parse(&selector_text) {
        Ok(selector) => selector,
        Err(e) => {
            tracing::error!("Invalid image selector {:?}: {:?}", selector_text, e);
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut references = Vec::new();

    for element in document.select(&selector) {
        let Some(attribute) = source_attribute(element.value().name()) else {
            continue;
        };
        let Some(source) = element.value().attr(attribute) else {
            continue;
        };
        let Some(resolved) = resolve_reference(base_url, source) else {
            continue;
        };

        if seen.insert(resolved.as_str().to_string()) {
            references.push(resolved);
        }
    }

    references
}

/// Looks up which attribute carries the source for a tag
fn source_attribute(tag: &str) -> Option<&'static str> {
    IMAGE_SOURCE_ATTRIBUTES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(tag))
        .map(|(_, attribute)| *attribute)
}
