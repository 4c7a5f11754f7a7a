use url::Url;

/// Resolves a tag's source attribute against the page URL
///
/// Returns None if the source should be skipped:
/// - empty after trimming
/// - `data:` URIs (inline content, nothing to fetch)
/// - sources that do not join into a valid URL
/// - non-HTTP(S) URLs after resolution
///
/// # Examples
///
/// ```
/// use image_survey::url::resolve_reference;
/// use url::Url;
///
/// let base = Url::parse("http://example.com/dir/page.html").unwrap();
/// let resolved = resolve_reference(&base, "../img/a.jpg").unwrap();
/// assert_eq!(resolved.as_str(), "http://example.com/img/a.jpg");
/// ```
pub fn resolve_reference(base_url: &Url, source: &str) -> Option<Url> {
    let source = source.trim();

    if source.is_empty() || is_data_uri(source) {
        return None;
    }

    match base_url.join(source) {
        Ok(resolved) if resolved.scheme() == "http" || resolved.scheme() == "https" => {
            Some(resolved)
        }
        Ok(resolved) => {
            tracing::debug!("Skipping non-HTTP reference: {}", resolved);
            None
        }
        Err(e) => {
            tracing::debug!("Skipping unresolvable reference {:?}: {}", source, e);
            None
        }
    }
}

/// Returns true for inline `data:` URIs
pub fn is_data_uri(source: &str) -> bool {
    source
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}
