//! Ordering of layer files
//!
//! For every search root, lowest precedence first:
//!
//! ```text
//! <root>/<base_dir>/<base_name>.d/*.conf   (sorted)
//! <root>/<base_dir>/<base_name>
//! ```
//!
//! followed by the output file, which always comes last.

use crate::ports::layer_source::LayerSource;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Where layer files are looked for and which file receives edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLayout {
    /// Search roots, lowest precedence first
    pub roots: Vec<PathBuf>,
    /// Directory below each root (e.g. `lightdm`)
    pub base_dir: PathBuf,
    /// File name of the main layer (e.g. `lightdm-gtk-greeter.conf`)
    pub base_name: String,
    /// The only file ever written
    pub output_path: PathBuf,
}

impl SearchLayout {
    pub fn new(
        roots: Vec<PathBuf>,
        base_dir: impl Into<PathBuf>,
        base_name: impl Into<String>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            roots,
            base_dir: base_dir.into(),
            base_name: base_name.into(),
            output_path: output_path.into(),
        }
    }

    /// `<root>/<base_dir>/<base_name>.d`
    pub fn drop_in_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.base_dir)
            .join(format!("{}.d", self.base_name))
    }

    /// `<root>/<base_dir>/<base_name>`
    pub fn main_file(&self, root: &Path) -> PathBuf {
        root.join(&self.base_dir).join(&self.base_name)
    }

    /// Every candidate layer file in merge order.
    ///
    /// Files listed here may not exist. A path reached twice is merged once, and
    /// the output path is moved to the end if a root already produced it.
    pub fn candidate_files(&self, source: &dyn LayerSource) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for root in &self.roots {
            files.extend(source.drop_in_files(&self.drop_in_dir(root)));
            files.push(self.main_file(root));
        }

        files.retain(|path| path != &self.output_path);
        let mut seen = HashSet::new();
        files.retain(|path| seen.insert(path.clone()));
        files.push(self.output_path.clone());
        files
    }
}
