//! Settings of the tool itself (raw TOML structure)

use crate::system::access::DEFAULT_GREETER_USER;
use crate::system::search_paths::{
    DEFAULT_BASE_DIR, DEFAULT_BASE_NAME, DEFAULT_OUTPUT_PATH, SYSTEM_CONFIG_ROOT, SystemDirs,
};
use greeter_settings_application::SearchLayout;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the greeter configuration lives and who reads it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Explicit search roots, lowest precedence first.
    /// Derived from the XDG directories when absent.
    pub roots: Option<Vec<PathBuf>>,
    /// Root searched after the XDG directories
    pub system_root: PathBuf,
    pub base_dir: PathBuf,
    pub base_name: String,
    /// The only file edits are written to
    pub output: PathBuf,
    /// Account the greeter runs as
    pub greeter_user: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            roots: None,
            system_root: PathBuf::from(SYSTEM_CONFIG_ROOT),
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            base_name: DEFAULT_BASE_NAME.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            greeter_user: DEFAULT_GREETER_USER.to_string(),
        }
    }
}

impl ToolSettings {
    /// Search roots in merge order
    pub fn roots(&self, dirs: &SystemDirs) -> Vec<PathBuf> {
        match &self.roots {
            Some(roots) => roots.clone(),
            None => dirs.roots(&self.system_root),
        }
    }

    pub fn search_layout(&self, dirs: &SystemDirs) -> SearchLayout {
        SearchLayout::new(
            self.roots(dirs),
            self.base_dir.clone(),
            self.base_name.clone(),
            self.output.clone(),
        )
    }

    /// Effective settings as a TOML document
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let settings = ToolSettings::default();
        let layout = settings.search_layout(&SystemDirs::default());
        assert_eq!(layout.roots.last(), Some(&PathBuf::from("/etc")));
        assert_eq!(
            layout.main_file(&PathBuf::from("/etc")),
            PathBuf::from("/etc/lightdm/lightdm-gtk-greeter.conf")
        );
        assert_eq!(layout.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    }

    #[test]
    fn test_explicit_roots_win() {
        let settings = ToolSettings {
            roots: Some(vec![PathBuf::from("/srv/conf")]),
            ..ToolSettings::default()
        };
        assert_eq!(
            settings.roots(&SystemDirs::default()),
            vec![PathBuf::from("/srv/conf")]
        );
    }

    #[test]
    fn test_partial_toml() {
        let settings: ToolSettings = toml::from_str(
            r#"
output = "/tmp/greeter.conf"
greeter_user = "gdm"
"#,
        )
        .unwrap();
        assert_eq!(settings.output, PathBuf::from("/tmp/greeter.conf"));
        assert_eq!(settings.greeter_user, "gdm");
        assert_eq!(settings.base_name, DEFAULT_BASE_NAME);
    }

    #[test]
    fn test_to_toml_round_trips() {
        let settings = ToolSettings::default();
        let text = settings.to_toml().unwrap();
        let parsed: ToolSettings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
