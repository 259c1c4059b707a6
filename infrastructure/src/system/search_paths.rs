//! System search roots
//!
//! Follows the XDG base directory conventions: data directories come first,
//! configuration directories override them, and the system configuration root
//! (`/etc`) overrides everything.

use std::env;
use std::path::{Path, PathBuf};

/// Used when `XDG_DATA_DIRS` is unset or empty
pub const DEFAULT_DATA_DIRS: &str = "/usr/local/share:/usr/share";
/// Used when `XDG_CONFIG_DIRS` is unset or empty
pub const DEFAULT_CONFIG_DIRS: &str = "/etc/xdg";
/// Highest-precedence search root
pub const SYSTEM_CONFIG_ROOT: &str = "/etc";

pub const DEFAULT_BASE_DIR: &str = "lightdm";
pub const DEFAULT_BASE_NAME: &str = "lightdm-gtk-greeter.conf";
pub const DEFAULT_OUTPUT_PATH: &str = "/etc/lightdm/lightdm-gtk-greeter.conf";

/// XDG directory lists, most important first as in the environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemDirs {
    pub data_dirs: Vec<PathBuf>,
    pub config_dirs: Vec<PathBuf>,
}

impl SystemDirs {
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("XDG_DATA_DIRS").ok().as_deref(),
            env::var("XDG_CONFIG_DIRS").ok().as_deref(),
        )
    }

    pub fn from_vars(data_dirs: Option<&str>, config_dirs: Option<&str>) -> Self {
        Self {
            data_dirs: split_dirs(data_dirs, DEFAULT_DATA_DIRS),
            config_dirs: split_dirs(config_dirs, DEFAULT_CONFIG_DIRS),
        }
    }

    /// Search roots, lowest precedence first, ending with `system_root`.
    pub fn roots(&self, system_root: &Path) -> Vec<PathBuf> {
        self.data_dirs
            .iter()
            .rev()
            .chain(self.config_dirs.iter().rev())
            .cloned()
            .chain(std::iter::once(system_root.to_path_buf()))
            .collect()
    }
}

impl Default for SystemDirs {
    fn default() -> Self {
        Self::from_vars(None, None)
    }
}

/// Split a colon-separated list, ignoring empty and relative entries.
fn split_dirs(value: Option<&str>, fallback: &str) -> Vec<PathBuf> {
    let parse = |list: &str| -> Vec<PathBuf> {
        list.split(':')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(PathBuf::from)
            .filter(|path| path.is_absolute())
            .collect()
    };

    match value.map(parse) {
        Some(dirs) if !dirs.is_empty() => dirs,
        _ => parse(fallback),
    }
}
