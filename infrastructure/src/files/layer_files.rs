//! Layer files on the local file system

use glob::{MatchOptions, Pattern, glob_with};
use greeter_settings_application::LayerSource;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Drop-in files must end with this suffix
const DROP_IN_PATTERN: &str = "*.conf";

/// Reads layer files straight from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLayerSource;

impl FsLayerSource {
    pub fn new() -> Self {
        Self
    }
}

impl LayerSource for FsLayerSource {
    fn drop_in_files(&self, dir: &Path) -> Vec<PathBuf> {
        if !dir.is_dir() {
            return Vec::new();
        }

        let pattern = format!(
            "{}/{}",
            Pattern::escape(&dir.to_string_lossy()),
            DROP_IN_PATTERN
        );
        // Hidden files (editor backups, `.#lock`) are not layers
        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };

        let entries = match glob_with(&pattern, options) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Invalid drop-in pattern for {}: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    debug!("Skipping unreadable drop-in entry: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file())
            .collect();
        files.sort();
        files
    }

    fn read_layer(&self, path: &Path) -> Option<String> {
        if !path.is_file() {
            return None;
        }
        match fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("Cannot read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn is_present(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_drop_in_files_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("50-theme.conf"), "[greeter]\n").unwrap();
        fs::write(root.join("10-base.conf"), "[greeter]\n").unwrap();
        fs::write(root.join("README"), "not a layer").unwrap();
        fs::write(root.join(".hidden.conf"), "[greeter]\n").unwrap();
        fs::create_dir(root.join("30-dir.conf")).unwrap();

        let files = FsLayerSource.drop_in_files(root);
        assert_eq!(
            files,
            vec![root.join("10-base.conf"), root.join("50-theme.conf")]
        );
    }

    #[test]
    fn test_drop_in_dir_with_glob_characters() {
        let dir = tempdir().unwrap();
        let odd = dir.path().join("conf[1].d");
        fs::create_dir(&odd).unwrap();
        fs::write(odd.join("a.conf"), "").unwrap();

        assert_eq!(FsLayerSource.drop_in_files(&odd), vec![odd.join("a.conf")]);
    }

    #[test]
    fn test_missing_dir_yields_nothing() {
        let dir = tempdir().unwrap();
        assert!(FsLayerSource.drop_in_files(&dir.path().join("nope")).is_empty());
    }

    #[test]
    fn test_read_layer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layer.conf");
        fs::write(&path, "[greeter]\nkeyboard = onboard\n").unwrap();

        let source = FsLayerSource::new();
        assert_eq!(
            source.read_layer(&path).as_deref(),
            Some("[greeter]\nkeyboard = onboard\n")
        );
        assert!(source.is_present(&path));
        assert!(source.read_layer(&dir.path().join("missing.conf")).is_none());
        assert!(source.read_layer(dir.path()).is_none());
    }

    #[test]
    fn test_non_utf8_layer_is_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.conf");
        fs::write(&path, b"[greeter]\nfont-name = \xe9\n").unwrap();
        assert!(FsLayerSource.read_layer(&path).is_none());
    }
}
