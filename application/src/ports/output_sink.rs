//! Output sink port
//!
//! Defines how the serialized output layer reaches the disk.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors writing the output file
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Permission denied writing {}", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OutputError {
    /// Classify an I/O failure on `path`.
    pub fn from_io(path: &Path, source: std::io::Error) -> Self {
        let path = path.to_path_buf();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            OutputError::PermissionDenied { path, source }
        } else {
            OutputError::Io { path, source }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            OutputError::PermissionDenied { path, .. } | OutputError::Io { path, .. } => path,
        }
    }
}

/// Destination of the output layer.
pub trait OutputSink: Send + Sync {
    /// Replace the file at `path` with `content`.
    ///
    /// Either the whole document lands or the previous file is left as it was.
    fn write_output(&self, path: &Path, content: &str) -> Result<(), OutputError>;

    /// Whether `path` can be written: the file itself when it exists,
    /// otherwise its parent directory.
    fn is_writable(&self, path: &Path) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_from_io_classifies_permission_denied() {
        let path = Path::new("/etc/lightdm/lightdm-gtk-greeter.conf");
        let err = OutputError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, OutputError::PermissionDenied { .. }));
        assert_eq!(err.path(), path);

        let err = OutputError::from_io(path, io::Error::other("disk full"));
        assert!(matches!(err, OutputError::Io { .. }));
        assert!(err.to_string().contains("disk full"));
    }
}
