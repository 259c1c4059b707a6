//! Settings of the tool itself
//!
//! The priority order (highest to lowest):
//!
//! 1. Command-line flags (`--root`, `--output`)
//! 2. `GREETER_SETTINGS_*` environment variables
//! 3. `--config <path>` specified file
//! 4. XDG config: `$XDG_CONFIG_HOME/greeter-settings/config.toml`
//! 5. Default values

mod loader;
mod tool_settings;

pub use loader::{ENV_PREFIX, SettingsLoadError, SettingsLoader};
pub use tool_settings::ToolSettings;
