use crate::UrlError;
use url::{Position, Url};

/// Resolves a possibly-relative reference against a base URL
///
/// # Resolution Steps
///
/// 1. Parse the base; reject if malformed
/// 2. Join the reference onto the base using RFC 3986 reference resolution
///    (scheme-relative, absolute-path, relative-path, query-only)
/// 3. Remove the fragment (fragments never affect identity)
///
/// A fragment-only reference such as `#section` resolves to the base page
/// itself, which the dedup set has already seen.
///
/// # Arguments
///
/// * `href` - The raw reference as found in the document
/// * `base` - The URL the reference is resolved against
///
/// # Returns
///
/// * `Ok(Url)` - The absolute, fragment-free URL
/// * `Err(UrlError)` - Either input failed to parse
///
/// # Examples
///
/// ```
/// use sitecrawl::url::resolve;
///
/// let url = resolve("/test1", "https://test1.com/test2").unwrap();
/// assert_eq!(url.as_str(), "https://test1.com/test1");
/// ```
pub fn resolve(href: &str, base: &str) -> Result<Url, UrlError> {
    let base = Url::parse(base)?;
    resolve_against(href, &base)
}

/// Same as [`resolve`] but with an already parsed base
pub fn resolve_against(href: &str, base: &Url) -> Result<Url, UrlError> {
    let mut url = base.join(href.trim())?;
    url.set_fragment(None);
    Ok(url)
}

/// Computes the dedup identity of a URL
///
/// With `slash_alias` enabled, a path ending in `/` and the same path without
/// it share one identity, so admitting either form claims both. The query is
/// kept as part of the identity.
pub fn identity_key(url: &Url, slash_alias: bool) -> String {
    let mut key = String::with_capacity(url.as_str().len());
    key.push_str(&url[..Position::BeforePath]);

    let path = url.path();
    if slash_alias {
        key.push_str(path.strip_suffix('/').unwrap_or(path));
    } else {
        key.push_str(path);
    }

    if let Some(query) = url.query() {
        key.push('?');
        key.push_str(query);
    }

    key
}
