//! Core domain concepts shared across all subdomains.
//!
//! - [`error::ParseError`]: a layer file that cannot be merged
//! - [`error::ParseDiagnostic`]: a dropped line inside an otherwise valid layer
//! - [`error::NameError`]: rejected group/key/value in an edit

pub mod error;
