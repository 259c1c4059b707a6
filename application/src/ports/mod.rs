//! Ports (interfaces) for external dependencies
//!
//! Implemented by the infrastructure layer.

pub mod layer_source;
pub mod output_sink;
