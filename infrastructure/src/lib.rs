//! Infrastructure layer for greeter-settings
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, host system discovery, and loading of the
//! tool's own settings.

pub mod config;
pub mod files;
pub mod system;

// Re-export commonly used types
pub use config::{SettingsLoadError, SettingsLoader, ToolSettings};
pub use files::{FsLayerSource, FsOutputSink};
pub use system::{
    AccessContext, AccessError, AccessProblem, SystemDirs, check_path_accessibility,
};
