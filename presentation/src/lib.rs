//! Presentation layer for greeter-settings
//!
//! This crate contains CLI definitions, serializable views of the
//! configuration, and output formatters.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::views::{
    CheckItem, CheckReport, EditView, EntryView, KeyView, LayerValueView, SourceView, ValueView,
};
