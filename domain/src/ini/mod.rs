//! INI text format used by every configuration layer.
//!
//! ```text
//! [greeter]
//! theme-name = Adwaita
//! -background =
//! ```
//!
//! A `-` in front of a key is the explicit unset marker: the layer says the
//! key has no value, hiding whatever a lower layer defined.

mod names;
mod parser;
mod writer;

pub use names::{normalize_key, validate_group, validate_key, validate_value};
pub use parser::{ParsedEntry, ParsedFile, parse};
pub use writer::{IniDocument, IniGroup};

/// Group name that is never merged
pub const DEFAULT_GROUP: &str = "DEFAULT";

/// Key prefix marking an explicit unset
pub const UNSET_PREFIX: char = '-';
