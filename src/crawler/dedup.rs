//! Dedup set: every URL ever admitted to the frontier
//!
//! Admission is a single atomic test-and-set on the URL's identity key, so
//! exactly one caller wins per identity no matter how many race for it. With
//! the slash alias enabled, `path` and `path/` share one key, which is what
//! makes admitting one form claim the other.

use crate::url::identity_key;
use dashmap::DashSet;
use url::Url;

/// Concurrent set of admitted URL identities
#[derive(Debug)]
pub struct DedupSet {
    seen: DashSet<String>,
    slash_alias: bool,
}

impl DedupSet {
    /// Creates an empty set
    ///
    /// # Arguments
    ///
    /// * `slash_alias` - Treat a trailing-slash path as the same URL as the bare path
    pub fn new(slash_alias: bool) -> Self {
        Self {
            seen: DashSet::new(),
            slash_alias,
        }
    }

    /// Atomically admits a URL
    ///
    /// # Returns
    ///
    /// * `true` - This caller is the first to admit the URL (or its alias)
    /// * `false` - The URL was already admitted
    pub fn try_admit(&self, url: &Url) -> bool {
        self.seen.insert(identity_key(url, self.slash_alias))
    }

    /// Number of distinct identities admitted
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
