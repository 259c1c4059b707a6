//! Checks that an edited group, key or value survives a write/read cycle

use super::{DEFAULT_GROUP, UNSET_PREFIX};
use crate::core::error::NameError;

/// Keys are matched case-insensitively; the stored form is lowercase.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

pub fn validate_group(name: &str) -> Result<(), NameError> {
    if name.trim().is_empty() {
        return Err(NameError::EmptyGroup);
    }
    if name != name.trim()
        || name == DEFAULT_GROUP
        || name.contains(['[', ']', '\n', '\r'])
    {
        return Err(NameError::InvalidGroup(name.to_string()));
    }
    Ok(())
}

pub fn validate_key(key: &str) -> Result<(), NameError> {
    if key.trim().is_empty() {
        return Err(NameError::EmptyKey);
    }
    let first = key.chars().next();
    if key != key.trim()
        || first == Some(UNSET_PREFIX)
        || matches!(first, Some('[' | '#' | ';'))
        || key.contains(['=', '\n', '\r'])
    {
        return Err(NameError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Values are trimmed on read, so only line breaks are rejected here.
pub fn validate_value(key: &str, value: &str) -> Result<(), NameError> {
    if value.contains(['\n', '\r']) {
        return Err(NameError::MultilineValue {
            key: key.to_string(),
        });
    }
    Ok(())
}
