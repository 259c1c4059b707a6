//! Layer source port
//!
//! Defines how the session discovers and reads layer files.

use std::path::{Path, PathBuf};

/// Read access to candidate layer files.
///
/// Missing or unreadable files are not errors: most candidate paths of a
/// layered configuration do not exist on any given system.
pub trait LayerSource: Send + Sync {
    /// `*.conf` files directly inside `dir`, sorted lexically.
    ///
    /// Returns an empty list when `dir` does not exist or is not a directory.
    fn drop_in_files(&self, dir: &Path) -> Vec<PathBuf>;

    /// Content of a regular file, or `None` when it is missing or unreadable.
    fn read_layer(&self, path: &Path) -> Option<String>;

    /// Whether a regular file exists at `path`
    fn is_present(&self, path: &Path) -> bool {
        self.read_layer(path).is_some()
    }
}
