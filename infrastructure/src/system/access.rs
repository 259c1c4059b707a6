//! Whether the greeter account can reach a file
//!
//! The greeter runs as its own system account, so a background image that the
//! administrator can open may still be invisible to it. Every directory on the
//! way must be traversable and the file itself readable, judged by the
//! account's uid and primary gid.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Account the greeter runs as on most distributions
pub const DEFAULT_GREETER_USER: &str = "lightdm";

const READ: u32 = 0o4;
const EXECUTE: u32 = 0o1;

/// Errors resolving the greeter account
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Account lookup is not supported on this platform")]
    Unsupported,
}

/// First path component the greeter account cannot use
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessProblem {
    #[error("{} does not exist", .0.display())]
    Missing(PathBuf),

    #[error("{} is not readable by the greeter", .0.display())]
    NotReadable(PathBuf),

    #[error("{} is not accessible by the greeter", .0.display())]
    NotTraversable(PathBuf),
}

impl AccessProblem {
    pub fn path(&self) -> &Path {
        match self {
            AccessProblem::Missing(path)
            | AccessProblem::NotReadable(path)
            | AccessProblem::NotTraversable(path) => path,
        }
    }
}

/// Identity the checks are made for; resolved once and passed around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    pub user: String,
    pub uid: u32,
    pub gid: u32,
}

impl AccessContext {
    pub fn new(user: impl Into<String>, uid: u32, gid: u32) -> Self {
        Self {
            user: user.into(),
            uid,
            gid,
        }
    }

    /// Look up an account in the password database.
    #[cfg(unix)]
    pub fn for_user(user: &str) -> Result<Self, AccessError> {
        use std::ffi::CString;

        let name = CString::new(user).map_err(|_| AccessError::UnknownUser(user.to_string()))?;
        // SAFETY: name outlives the call; the returned record is copied out
        // before any other passwd function runs
        let (uid, gid) = unsafe {
            let entry = libc::getpwnam(name.as_ptr());
            if entry.is_null() {
                return Err(AccessError::UnknownUser(user.to_string()));
            }
            ((*entry).pw_uid, (*entry).pw_gid)
        };
        Ok(Self::new(user, uid, gid))
    }

    #[cfg(not(unix))]
    pub fn for_user(_user: &str) -> Result<Self, AccessError> {
        Err(AccessError::Unsupported)
    }

    /// Whether a file with the given owner and mode grants `bit` to this account
    fn permits(&self, owner: u32, group: u32, mode: u32, bit: u32) -> bool {
        let shift = if owner == self.uid {
            6
        } else if group == self.gid {
            3
        } else {
            0
        };
        (mode >> shift) & bit != 0
    }
}

/// Check that every directory leading to `path` is traversable and that
/// `path` is readable.
pub fn check_path_accessibility(ctx: &AccessContext, path: &Path) -> Result<(), AccessProblem> {
    let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut dirs: Vec<&Path> = path.ancestors().skip(1).collect();
    dirs.reverse();
    for dir in dirs {
        let Ok(meta) = std::fs::metadata(dir) else {
            return Err(AccessProblem::Missing(dir.to_path_buf()));
        };
        if !granted(ctx, &meta, EXECUTE) {
            return Err(AccessProblem::NotTraversable(dir.to_path_buf()));
        }
    }

    let Ok(meta) = std::fs::metadata(&path) else {
        return Err(AccessProblem::Missing(path));
    };
    let mut needed = READ;
    if meta.is_dir() {
        needed |= EXECUTE;
    }
    if !granted(ctx, &meta, needed) {
        return Err(AccessProblem::NotReadable(path));
    }
    Ok(())
}

#[cfg(unix)]
fn granted(ctx: &AccessContext, meta: &std::fs::Metadata, bits: u32) -> bool {
    use std::os::unix::fs::MetadataExt;

    [READ, EXECUTE]
        .into_iter()
        .filter(|bit| bits & bit != 0)
        .all(|bit| ctx.permits(meta.uid(), meta.gid(), meta.mode(), bit))
}

#[cfg(not(unix))]
fn granted(_ctx: &AccessContext, _meta: &std::fs::Metadata, _bits: u32) -> bool {
    true
}
