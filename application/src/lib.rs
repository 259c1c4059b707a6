//! Application layer for greeter-settings
//!
//! This crate contains the settings session use case and the port definitions
//! it needs from the outside world. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    layer_source::LayerSource,
    output_sink::{OutputError, OutputSink},
};
pub use use_cases::search_layout::SearchLayout;
pub use use_cases::settings_session::{ReadReport, SessionError, SessionState, SettingsSession};
