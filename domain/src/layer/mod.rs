//! Provenance-tracked configuration store
//!
//! - [`ConfigValue`]: one layer's value for a key, tagged with its file
//! - [`ConfigGroup`]: keys of a group, each with its ordered layer history
//! - [`LayeredConfig`]: all groups, plus the output-layer write-back delta

mod config;
mod group;
mod value;

pub use config::LayeredConfig;
pub use group::{ConfigGroup, Edit};
pub use value::ConfigValue;
