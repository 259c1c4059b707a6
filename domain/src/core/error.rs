//! Domain error types

use thiserror::Error;

/// A file that cannot be merged at all.
///
/// Any of these aborts parsing of the file it occurs in; the caller is
/// expected to skip the whole layer and continue with the next one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: '{key}' appears before any [group] header")]
    MissingSectionHeader { line: usize, key: String },

    #[error("line {line}: malformed group header '{text}'")]
    MalformedHeader { line: usize, text: String },
}

/// A single line that was dropped while the rest of the file was kept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDiagnostic {
    #[error("line {line}: [{group}] {key} has no value (use '-{key} =' to unset it)")]
    KeyWithoutValue {
        line: usize,
        group: String,
        key: String,
    },

    #[error("line {line}: [{group}] entry has an empty key")]
    EmptyKey { line: usize, group: String },
}

/// Rejected names or values passed to an edit operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("group name cannot be empty")]
    EmptyGroup,

    #[error("invalid group name '{0}'")]
    InvalidGroup(String),

    #[error("key cannot be empty")]
    EmptyKey,

    #[error("invalid key '{0}'")]
    InvalidKey(String),

    #[error("value for '{key}' cannot span multiple lines")]
    MultilineValue { key: String },
}
