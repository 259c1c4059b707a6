use std::path::{Path, PathBuf};

/// One layer's contribution to a key: the file it came from and its value.
///
/// A `None` value is an explicit unset recorded by that layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValue {
    source: PathBuf,
    value: Option<String>,
}

impl ConfigValue {
    pub fn new(source: impl Into<PathBuf>, value: Option<String>) -> Self {
        Self {
            source: source.into(),
            value,
        }
    }

    pub fn set(source: impl Into<PathBuf>, value: impl Into<String>) -> Self {
        Self::new(source, Some(value.into()))
    }

    pub fn unset(source: impl Into<PathBuf>) -> Self {
        Self::new(source, None)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_unset(&self) -> bool {
        self.value.is_none()
    }

    pub fn is_from(&self, path: &Path) -> bool {
        self.source == path
    }
}
