use crate::UrlError;
use url::Url;

/// The host a crawl is restricted to
///
/// Derived once from the seed URL; every discovered link is compared against
/// it before it can reach the dedup set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    host: String,
}

impl Scope {
    /// Builds a scope from the seed URL's hostname
    ///
    /// # Returns
    ///
    /// * `Ok(Scope)` - The seed has a host
    /// * `Err(UrlError)` - The seed has no host (e.g. `mailto:`)
    pub fn from_seed(seed: &Url) -> Result<Self, UrlError> {
        seed.host_str()
            .map(|host| Self {
                host: host.to_string(),
            })
            .ok_or_else(|| UrlError::MissingHost(seed.to_string()))
    }

    /// The scope hostname
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns true if the URL is on the scope host
    pub fn contains(&self, url: &Url) -> bool {
        in_scope(url, &self.host)
    }
}

/// Compares a URL's hostname to the crawl's scope hostname
///
/// The comparison is exact on the host as parsed: ports and schemes are not
/// part of the scope, and subdomains are different hosts.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitecrawl::url::in_scope;
///
/// let url = Url::parse("https://a.com/x").unwrap();
/// assert!(in_scope(&url, "a.com"));
/// assert!(!in_scope(&url, "other.com"));
/// ```
pub fn in_scope(url: &Url, host: &str) -> bool {
    url.host_str() == Some(host)
}
