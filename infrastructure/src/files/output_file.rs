//! Output file writer
//!
//! The document is written to a temporary file next to the target and renamed
//! over it, so readers (the greeter itself) never see a half-written file.
//! When the directory does not allow creating files but the target itself is
//! writable, the target is overwritten in place instead.

use greeter_settings_application::{OutputError, OutputSink};
use std::fs::{self, Permissions};
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Mode of a newly created output file; the greeter account must read it.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Writes the output layer to disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsOutputSink;

impl FsOutputSink {
    pub fn new() -> Self {
        Self
    }

    fn write_atomic(path: &Path, dir: &Path, content: &str) -> io::Result<()> {
        let permissions = match fs::metadata(path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => new_file_permissions(),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(content.as_bytes())?;
        file.as_file().sync_all()?;
        if let Some(permissions) = permissions {
            file.as_file().set_permissions(permissions)?;
        }
        file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl OutputSink for FsOutputSink {
    fn write_output(&self, path: &Path, content: &str) -> Result<(), OutputError> {
        let dir = parent_dir(path);
        fs::create_dir_all(dir).map_err(|e| OutputError::from_io(path, e))?;

        match Self::write_atomic(path, dir, content) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied && path.is_file() => {
                debug!(
                    "Cannot create files in {}, overwriting {} in place",
                    dir.display(),
                    path.display()
                );
                fs::write(path, content).map_err(|e| OutputError::from_io(path, e))?;
            }
            Err(e) => return Err(OutputError::from_io(path, e)),
        }

        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    fn is_writable(&self, path: &Path) -> bool {
        if path.exists() && can_write(path, false) {
            return true;
        }
        // A missing file can be created in the nearest existing ancestor
        path.ancestors()
            .skip(1)
            .map(|dir| if dir.as_os_str().is_empty() { Path::new(".") } else { dir })
            .find(|dir| dir.exists())
            .is_some_and(|dir| dir.is_dir() && can_write(dir, true))
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

/// Write access for the current process; directories also need search access.
#[cfg(unix)]
fn can_write(path: &Path, is_dir: bool) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    let mode = if is_dir {
        libc::W_OK | libc::X_OK
    } else {
        libc::W_OK
    };
    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call
    unsafe { libc::access(c_path.as_ptr(), mode) == 0 }
}

#[cfg(not(unix))]
fn can_write(path: &Path, _is_dir: bool) -> bool {
    fs::metadata(path).is_ok_and(|meta| !meta.permissions().readonly())
}
