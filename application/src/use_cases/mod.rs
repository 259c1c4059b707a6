//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod search_layout;
pub mod settings_session;
