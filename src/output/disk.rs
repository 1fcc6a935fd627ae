//! Body persistence under a storage root

use crate::output::traits::{BodyStore, OutputError, OutputResult};
use std::path::PathBuf;

/// Writes each fetched body to `<root>/<sequence>.html`
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Creates a store rooted at an existing directory
    ///
    /// The root is validated with the rest of the configuration, so no check
    /// is repeated here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, sequence: u64) -> PathBuf {
        self.root.join(format!("{}.html", sequence))
    }
}

impl BodyStore for DiskStore {
    fn persist(&self, body: &str, sequence: u64) -> OutputResult<PathBuf> {
        let path = self.path_for(sequence);
        std::fs::write(&path, body).map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
