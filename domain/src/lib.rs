//! Domain layer for greeter-settings
//!
//! This crate contains the configuration model: INI parsing and writing, the
//! provenance-tracked store, and the registry of known greeter keys.
//! It has no dependencies on the file system or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Layers
//!
//! The greeter configuration is spread over several files. Each file is a
//! *layer*; later layers take precedence. The last layer is the *output* file,
//! the only one this tool writes.
//!
//! ## Provenance
//!
//! Every key keeps the ordered list of layers that defined it. The last entry
//! is the effective value. Edits are recorded at the output layer, and only
//! output-layer entries are written back.

pub mod config;
pub mod core;
pub mod ini;
pub mod layer;

// Re-export commonly used types
pub use config::{ConfigKeyInfo, GREETER_GROUP, ValueKind, default_for, known_keys, lookup_key};
pub use core::error::{NameError, ParseDiagnostic, ParseError};
pub use ini::{IniDocument, IniGroup, ParsedEntry, ParsedFile, parse};
pub use layer::{ConfigGroup, ConfigValue, Edit, LayeredConfig};
