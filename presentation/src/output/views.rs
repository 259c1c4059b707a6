//! Serializable views of the configuration for display

use greeter_settings_domain::{ConfigKeyInfo, Edit, LayeredConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One layer's contribution to a key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerValueView {
    pub source: PathBuf,
    pub value: Option<String>,
}

/// Effective value of a key with its origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub group: String,
    pub key: String,
    pub value: Option<String>,
    pub source: PathBuf,
    /// Whether the value belongs to the output file
    pub edited: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<LayerValueView>,
}

impl EntryView {
    /// Entries in merge order.
    ///
    /// Unset keys and the per-layer history are included only with `all`.
    pub fn collect(config: &LayeredConfig, all: bool) -> Vec<EntryView> {
        config
            .entries()
            .filter_map(|(group, key, values)| {
                let last = values.last()?;
                if last.is_unset() && !all {
                    return None;
                }
                let history = if all {
                    values
                        .iter()
                        .map(|v| LayerValueView {
                            source: v.source().to_path_buf(),
                            value: v.value().map(str::to_string),
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                Some(EntryView {
                    group: group.to_string(),
                    key: key.to_string(),
                    value: last.value().map(str::to_string),
                    source: last.source().to_path_buf(),
                    edited: last.is_from(config.output_path()),
                    history,
                })
            })
            .collect()
    }
}

/// Effective value of a single key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueView {
    pub group: String,
    pub key: String,
    pub value: Option<String>,
    pub source: Option<PathBuf>,
}

impl ValueView {
    pub fn new(config: &LayeredConfig, group: &str, key: &str) -> Self {
        Self {
            group: group.to_string(),
            key: key.to_string(),
            value: config.get(group, key).map(str::to_string),
            source: config.source_of(group, key).map(Path::to_path_buf),
        }
    }
}

/// Outcome of an edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditView {
    pub group: String,
    pub key: Option<String>,
    pub edit: String,
    pub output: PathBuf,
}

impl EditView {
    pub fn new(group: &str, key: Option<&str>, edit: Edit, output: &Path) -> Self {
        Self {
            group: group.to_string(),
            key: key.map(str::to_string),
            edit: format!("{:?}", edit).to_lowercase(),
            output: output.to_path_buf(),
        }
    }
}

/// A candidate layer file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceView {
    pub path: PathBuf,
    pub present: bool,
    pub output: bool,
}

impl SourceView {
    pub fn new(path: impl Into<PathBuf>, present: bool, output_path: &Path) -> Self {
        let path = path.into();
        let output = path == output_path;
        Self {
            path,
            present,
            output,
        }
    }
}

/// A known key with its current value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyView {
    pub group: String,
    pub key: String,
    pub kind: String,
    pub description: String,
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub valid_values: Vec<String>,
    pub current: Option<String>,
}

impl KeyView {
    pub fn new(info: &ConfigKeyInfo, config: &LayeredConfig) -> Self {
        Self {
            group: info.group.to_string(),
            key: info.key.to_string(),
            kind: info.kind.as_str().to_string(),
            description: info.description.to_string(),
            default: info.default.map(str::to_string),
            valid_values: info.valid_values.iter().map(|v| v.to_string()).collect(),
            current: config.get(info.group, info.key).map(str::to_string),
        }
    }
}

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckItem {
    pub subject: String,
    /// `None` when the check passed
    pub problem: Option<String>,
}

impl CheckItem {
    pub fn passed(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            problem: None,
        }
    }

    pub fn failed(subject: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            problem: Some(problem.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.problem.is_none()
    }
}

/// Result of the `check` command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub items: Vec<CheckItem>,
}

impl CheckReport {
    pub fn push(&mut self, item: CheckItem) {
        self.items.push(item);
    }

    pub fn is_ok(&self) -> bool {
        self.items.iter().all(CheckItem::is_ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeter_settings_domain::{lookup_key, parse};

    const VENDOR: &str = "/usr/share/lightdm/lightdm-gtk-greeter.conf";
    const OUTPUT: &str = "/etc/lightdm/lightdm-gtk-greeter.conf";

    fn config() -> LayeredConfig {
        let mut config = LayeredConfig::new(OUTPUT);
        config.merge_layer(
            Path::new(VENDOR),
            &parse("[greeter]\ntheme-name = Adwaita\nbackground = #fff\n").unwrap(),
        );
        config.merge_layer(
            Path::new(OUTPUT),
            &parse("[greeter]\n-background =\ntheme-name = Breeze\n").unwrap(),
        );
        config
    }

    #[test]
    fn test_entries_hide_unset_keys() {
        let entries = EntryView::collect(&config(), false);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "theme-name");
        assert_eq!(entries[0].value.as_deref(), Some("Breeze"));
        assert!(entries[0].edited);
        assert!(entries[0].history.is_empty());
    }

    #[test]
    fn test_entries_all_include_history() {
        let entries = EntryView::collect(&config(), true);
        assert_eq!(entries.len(), 2);
        let background = &entries[1];
        assert_eq!(background.value, None);
        assert_eq!(background.history.len(), 2);
        assert_eq!(background.history[0].source, PathBuf::from(VENDOR));
    }

    #[test]
    fn test_key_view() {
        let info = lookup_key("greeter", "theme-name").unwrap();
        let view = KeyView::new(info, &config());
        assert_eq!(view.current.as_deref(), Some("Breeze"));
        assert_eq!(view.kind, "text");
    }

    #[test]
    fn test_entry_json_shape() {
        let entries = EntryView::collect(&config(), false);
        let json = serde_json::to_value(&entries).unwrap();
        assert_eq!(json[0]["source"], OUTPUT);
        assert!(json[0].get("history").is_none());
    }

    #[test]
    fn test_value_view() {
        let view = ValueView::new(&config(), "greeter", "background");
        assert_eq!(view.value, None);
        assert_eq!(view.source, Some(PathBuf::from(OUTPUT)));
        let edit = EditView::new("greeter", Some("background"), Edit::Shadowed, Path::new(OUTPUT));
        assert_eq!(edit.edit, "shadowed");
    }

    #[test]
    fn test_check_report() {
        let mut report = CheckReport::default();
        report.push(CheckItem::passed("output"));
        assert!(report.is_ok());
        report.push(CheckItem::failed("background", "missing"));
        assert!(!report.is_ok());
    }
}
