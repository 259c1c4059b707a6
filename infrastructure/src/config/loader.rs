//! Tool settings loader with multi-source merging

use super::tool_settings::ToolSettings;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Prefix of environment variables overriding tool settings
pub const ENV_PREFIX: &str = "GREETER_SETTINGS_";

/// Errors loading tool settings
#[derive(Error, Debug)]
pub enum SettingsLoadError {
    #[error("Settings file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid settings: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Settings loader that handles file discovery and merging
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `GREETER_SETTINGS_*` environment variables
    /// 2. Explicit settings path (if provided)
    /// 3. `$XDG_CONFIG_HOME/greeter-settings/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&Path>) -> Result<ToolSettings, SettingsLoadError> {
        if let Some(path) = config_path
            && !path.is_file()
        {
            return Err(SettingsLoadError::NotFound(path.to_path_buf()));
        }

        let global = Self::global_config_path().filter(|path| path.is_file());
        Self::figment(global.as_deref(), config_path)
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| SettingsLoadError::Invalid(Box::new(e)))
    }

    /// Load only default settings (for --no-config)
    pub fn load_defaults() -> ToolSettings {
        ToolSettings::default()
    }

    fn figment(global: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(ToolSettings::default()));

        if let Some(path) = global {
            debug!("Loading settings from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = explicit {
            debug!("Loading settings from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
        figment
    }

    /// Get the per-user settings file path
    ///
    /// Returns XDG_CONFIG_HOME/greeter-settings/config.toml if set,
    /// otherwise falls back to ~/.config/greeter-settings/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("greeter-settings").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_defaults() {
        let settings = SettingsLoader::load_defaults();
        assert!(settings.roots.is_none());
        assert_eq!(settings.greeter_user, "lightdm");
    }

    #[test]
    fn test_explicit_file_overrides_global() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let explicit = dir.path().join("explicit.toml");
        fs::write(&global, "output = \"/a.conf\"\ngreeter_user = \"gdm\"\n").unwrap();
        fs::write(&explicit, "output = \"/b.conf\"\nroots = [\"/x\", \"/y\"]\n").unwrap();

        let settings: ToolSettings = SettingsLoader::figment(Some(&global), Some(&explicit))
            .extract()
            .unwrap();
        assert_eq!(settings.output, PathBuf::from("/b.conf"));
        assert_eq!(settings.greeter_user, "gdm");
        assert_eq!(
            settings.roots,
            Some(vec![PathBuf::from("/x"), PathBuf::from("/y")])
        );
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            SettingsLoader::load(Some(&missing)),
            Err(SettingsLoadError::NotFound(path)) if path == missing
        ));
    }

    #[test]
    fn test_invalid_file_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "roots = 42\n").unwrap();
        assert!(matches!(
            SettingsLoader::load(Some(&path)),
            Err(SettingsLoadError::Invalid(_))
        ));
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = SettingsLoader::global_config_path().unwrap();
        assert!(path.to_string_lossy().contains("greeter-settings"));
    }
}
