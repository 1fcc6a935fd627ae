//! URL handling module for Sitecrawl
//!
//! This module provides reference resolution against a base URL, the dedup
//! identity of a URL, and host-scope membership.

mod normalize;
mod scope;

// Re-export main functions
pub use normalize::{identity_key, resolve, resolve_against};
pub use scope::{in_scope, Scope};

use ::url::Url;

/// Resolves a discovered href and applies the scope filter
///
/// Returns `None` when the link must be dropped: either it failed to parse
/// or it points at a different host. Neither case is an error for the crawl.
pub fn resolve_in_scope(href: &str, base: &Url, scope: &Scope) -> Option<Url> {
    let resolved = match resolve_against(href, base) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Dropping malformed link {:?}: {}", href, e);
            return None;
        }
    };

    if !scope.contains(&resolved) {
        tracing::trace!("Dropping out-of-scope link {}", resolved);
        return None;
    }

    Some(resolved)
}
