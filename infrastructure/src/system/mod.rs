//! Facts about the host system: search roots and account permissions

pub mod access;
pub mod search_paths;

pub use access::{AccessContext, AccessError, AccessProblem, check_path_accessibility};
pub use search_paths::SystemDirs;
