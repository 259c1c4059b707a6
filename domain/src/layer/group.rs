//! Per-group provenance store

use super::value::ConfigValue;
use std::path::Path;

/// What an edit did to the stored history of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Nothing recorded; the effective value already matched
    Unchanged,
    /// A new output-layer entry was added on top of the history
    Appended,
    /// The existing output-layer entry was replaced
    Overwritten,
    /// The output-layer entry was dropped because a lower layer already agrees
    Collapsed,
    /// The output-layer entry was dropped, exposing the lower layer again
    Reverted,
    /// An output-layer unset marker now hides the lower layer
    Shadowed,
    /// The key has no history left and was removed
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct KeyHistory {
    key: String,
    /// Oldest layer first; never empty
    values: Vec<ConfigValue>,
}

/// Keys of one `[group]`, each with the ordered list of layers that defined it.
///
/// The effective value of a key is always its last entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigGroup {
    keys: Vec<KeyHistory>,
}

impl ConfigGroup {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Effective value; `None` when the key is absent or explicitly unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.effective(key).and_then(ConfigValue::value)
    }

    /// The highest-precedence entry of a key
    pub fn effective(&self, key: &str) -> Option<&ConfigValue> {
        self.history(key).and_then(|values| values.last())
    }

    /// File that supplied the effective entry
    pub fn source_of(&self, key: &str) -> Option<&Path> {
        self.effective(key).map(ConfigValue::source)
    }

    pub fn history(&self, key: &str) -> Option<&[ConfigValue]> {
        self.position(key).map(|i| self.keys[i].values.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ConfigValue])> {
        self.keys
            .iter()
            .map(|k| (k.key.as_str(), k.values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Record an entry read from a layer file, verbatim.
    ///
    /// An unset marker for a key nobody defined yet has nothing to hide and is
    /// dropped; returns whether the entry was stored.
    pub(crate) fn append(&mut self, key: &str, value: ConfigValue) -> bool {
        match self.position(key) {
            Some(index) => {
                self.keys[index].values.push(value);
                true
            }
            None if value.is_unset() => false,
            None => {
                self.keys.push(KeyHistory {
                    key: key.to_string(),
                    values: vec![value],
                });
                true
            }
        }
    }

    /// Record an edit made at the output layer.
    ///
    /// - an output-layer entry is overwritten in place, unless the value is
    ///   redundant (equal to `default` with nothing below, or the same value
    ///   written twice while the layer below already holds it); redundant
    ///   entries are dropped
    /// - with only lower layers, a new entry is appended unless the lower layer
    ///   already holds the default value
    /// - an absent key equal to `default` is not recorded at all
    pub(crate) fn set(
        &mut self,
        output: &Path,
        key: &str,
        value: &str,
        default: Option<&str>,
    ) -> Edit {
        let defaulted = default == Some(value);

        let Some(index) = self.position(key) else {
            if defaulted {
                return Edit::Unchanged;
            }
            self.keys.push(KeyHistory {
                key: key.to_string(),
                values: vec![ConfigValue::set(output, value)],
            });
            return Edit::Appended;
        };

        let values = &mut self.keys[index].values;
        let owned = values.last().is_some_and(|v| v.is_from(output));
        let lower_len = if owned { values.len() - 1 } else { values.len() };
        let agrees_with_lower =
            lower_len > 0 && values[lower_len - 1].value() == Some(value);

        if !owned {
            if defaulted && agrees_with_lower {
                return Edit::Unchanged;
            }
            values.push(ConfigValue::set(output, value));
            return Edit::Appended;
        }

        let repeated = values.last().and_then(ConfigValue::value) == Some(value);
        let redundant = (defaulted && lower_len == 0) || (repeated && agrees_with_lower);

        if redundant {
            values.pop();
            if values.is_empty() {
                self.keys.remove(index);
                return Edit::Removed;
            }
            return Edit::Collapsed;
        }

        if let Some(last) = values.last_mut() {
            *last = ConfigValue::set(output, value);
        }
        Edit::Overwritten
    }

    /// Remove the output layer's say on a key.
    ///
    /// Drops the output-layer entry when there is one, including an output
    /// unset marker (the key disappears if nothing else defines it). When only
    /// lower layers define the key, an unset marker is appended so the lower
    /// value stays on disk but is hidden.
    pub(crate) fn unset(&mut self, output: &Path, key: &str) -> Edit {
        let Some(index) = self.position(key) else {
            return Edit::Unchanged;
        };
        let values = &mut self.keys[index].values;

        if values.last().is_some_and(|v| v.is_from(output)) {
            values.pop();
            if values.is_empty() {
                self.keys.remove(index);
                return Edit::Removed;
            }
            return Edit::Reverted;
        }

        // Already hidden by a lower layer
        if values.last().is_some_and(ConfigValue::is_unset) {
            return Edit::Unchanged;
        }

        values.push(ConfigValue::unset(output));
        Edit::Shadowed
    }

    /// Leave every key of the group without an effective value.
    ///
    /// Keys only the output layer defined are removed; everything a lower layer
    /// defines ends with an output-layer unset marker.
    pub(crate) fn unset_all(&mut self, output: &Path) {
        self.keys.retain_mut(|history| {
            let values = &mut history.values;
            let owned = values.last().is_some_and(|v| v.is_from(output));
            if owned {
                values.pop();
            }
            match values.last() {
                None => false,
                Some(last) if last.is_unset() => true,
                Some(_) => {
                    values.push(ConfigValue::unset(output));
                    true
                }
            }
        });
    }
}
