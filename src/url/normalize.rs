use crate::UrlError;
use url::Url;

/// Scheme prepended to input entries that carry none
const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// Prepends `http://` to a raw page URL unless it already has an HTTP(S) scheme
///
/// The prefix check ignores ASCII case. No other validation happens here;
/// malformed entries surface later as fetch failures.
///
/// # Examples
///
/// ```
/// use image_survey::url::ensure_scheme;
///
/// assert_eq!(ensure_scheme("example.com"), "http://example.com");
/// assert_eq!(ensure_scheme("https://example.com/a"), "https://example.com/a");
/// ```
pub fn ensure_scheme(raw: &str) -> String {
    if has_http_scheme(raw) {
        raw.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, raw)
    }
}

/// Parses a raw input entry into an absolute HTTP(S) URL, defaulting the scheme
///
/// # Returns
///
/// * `Ok(Url)` - The parsed page URL
/// * `Err(UrlError)` - The entry is not a usable URL even with a scheme added
pub fn parse_page_url(raw: &str) -> Result<Url, UrlError> {
    let url = Url::parse(&ensure_scheme(raw)).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    Ok(url)
}

fn has_http_scheme(raw: &str) -> bool {
    ["http://", "https://"].iter().any(|prefix| {
        raw.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}
