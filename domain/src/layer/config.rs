//! Merged view over all layers plus the write-back delta

use super::group::{ConfigGroup, Edit};
use super::value::ConfigValue;
use crate::ini::{IniDocument, IniGroup, ParsedFile};
use std::path::{Path, PathBuf};

/// All groups merged from every layer, tagged with the file each value came from.
///
/// Only `output_path` is ever written; edits made through [`set`](Self::set),
/// [`unset`](Self::unset) and [`unset_group`](Self::unset_group) are recorded
/// at that layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayeredConfig {
    output_path: PathBuf,
    groups: Vec<(String, ConfigGroup)>,
}

impl LayeredConfig {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            groups: Vec::new(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|(_, group)| group.is_empty())
    }

    /// Merge every entry of a parsed layer, in file order.
    ///
    /// Returns the number of entries stored. Groups are created only for
    /// entries that are kept, so a group holding nothing but orphan unset
    /// markers never appears.
    pub fn merge_layer(&mut self, source: &Path, parsed: &ParsedFile) -> usize {
        let mut stored = 0;
        for entry in &parsed.entries {
            let known = self
                .group(&entry.group)
                .is_some_and(|group| group.contains(&entry.key));
            if entry.value.is_none() && !known {
                continue;
            }
            let value = ConfigValue::new(source, entry.value.clone());
            if self.ensure_group(&entry.group).append(&entry.key, value) {
                stored += 1;
            }
        }
        stored
    }

    pub fn group(&self, name: &str) -> Option<&ConfigGroup> {
        self.groups
            .iter()
            .find(|(group_name, _)| group_name == name)
            .map(|(_, group)| group)
    }

    /// Get or create a group.
    pub fn ensure_group(&mut self, name: &str) -> &mut ConfigGroup {
        let index = match self.groups.iter().position(|(n, _)| n == name) {
            Some(index) => index,
            None => {
                self.groups.push((name.to_string(), ConfigGroup::new()));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index].1
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &ConfigGroup)> {
        self.groups.iter().map(|(name, group)| (name.as_str(), group))
    }

    /// Every `(group, key, history)` triple in merge order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &[ConfigValue])> {
        self.groups().flat_map(|(name, group)| {
            group.iter().map(move |(key, values)| (name, key, values))
        })
    }

    /// Effective value of a key
    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.group(group)?.get(key)
    }

    pub fn source_of(&self, group: &str, key: &str) -> Option<&Path> {
        self.group(group)?.source_of(key)
    }

    pub fn history(&self, group: &str, key: &str) -> Option<&[ConfigValue]> {
        self.group(group)?.history(key)
    }

    /// See [`ConfigGroup`] for the collapse rules applied here.
    pub fn set(&mut self, group: &str, key: &str, value: &str, default: Option<&str>) -> Edit {
        let output = self.output_path.clone();
        let edit = self.ensure_group(group).set(&output, key, value, default);
        self.prune(group);
        edit
    }

    pub fn unset(&mut self, group: &str, key: &str) -> Edit {
        let output = self.output_path.clone();
        let Some((_, target)) = self.groups.iter_mut().find(|(name, _)| name == group) else {
            return Edit::Unchanged;
        };
        let edit = target.unset(&output, key);
        self.prune(group);
        edit
    }

    /// Hide a whole group: afterwards none of its keys has an effective value.
    pub fn unset_group(&mut self, group: &str) {
        let output = self.output_path.clone();
        if let Some((_, target)) = self.groups.iter_mut().find(|(name, _)| name == group) {
            target.unset_all(&output);
        }
        self.prune(group);
    }

    fn prune(&mut self, group: &str) {
        self.groups
            .retain(|(name, target)| name != group || !target.is_empty());
    }

    /// The part of the configuration that belongs in the output file.
    ///
    /// A key is emitted only when its effective entry comes from the output
    /// layer. Unset markers are emitted only when a lower layer defines the key,
    /// and a sole output entry holding the registered default (as reported by
    /// `is_default(group, key, value)`) is left out.
    pub fn output_document<F>(&self, is_default: F) -> IniDocument
    where
        F: Fn(&str, &str, &str) -> bool,
    {
        let mut document = IniDocument::new();
        for (name, group) in self.groups() {
            let mut out = IniGroup::new(name);
            for (key, values) in group.iter() {
                let Some(last) = values.last() else {
                    continue;
                };
                if !last.is_from(&self.output_path) {
                    continue;
                }
                match last.value() {
                    Some(value) if values.len() == 1 && is_default(name, key, value) => {}
                    Some(value) => out.push(key, Some(value.to_string())),
                    None if values.len() > 1 => out.push(key, None),
                    None => {}
                }
            }
            document.push_group(out);
        }
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ini::parse;

    const OUTPUT: &str = "/etc/lightdm/lightdm-gtk-greeter.conf";
    const VENDOR: &str = "/usr/share/lightdm/lightdm-gtk-greeter.conf.d/50-vendor.conf";

    fn no_defaults(_: &str, _: &str, _: &str) -> bool {
        false
    }

    fn layered(layers: &[(&str, &str)]) -> LayeredConfig {
        let mut config = LayeredConfig::new(OUTPUT);
        for (path, content) in layers {
            config.merge_layer(Path::new(path), &parse(content).unwrap());
        }
        config
    }

    #[test]
    fn test_higher_layer_wins() {
        let config = layered(&[
            (VENDOR, "[greeter]\ntheme-name = Adwaita\nfont-name = Sans 10\n"),
            ("/etc/xdg/lightdm/lightdm-gtk-greeter.conf", "[greeter]\ntheme-name = Numix\n"),
        ]);
        assert_eq!(config.get("greeter", "theme-name"), Some("Numix"));
        assert_eq!(config.get("greeter", "font-name"), Some("Sans 10"));
        assert_eq!(
            config.source_of("greeter", "font-name"),
            Some(Path::new(VENDOR))
        );
    }

    #[test]
    fn test_merge_layer_counts_stored_entries() {
        let mut config = LayeredConfig::new(OUTPUT);
        let parsed = parse("[greeter]\n-background =\ntheme-name = A\n").unwrap();
        assert_eq!(config.merge_layer(Path::new(VENDOR), &parsed), 1);
    }

    #[test]
    fn test_orphan_unset_markers_create_no_group() {
        let mut config = layered(&[(OUTPUT, "[monitor: X]\n-laptop =\n")]);
        assert!(config.group("monitor: X").is_none());
        assert_eq!(config.groups().count(), 0);

        let before = config.clone();
        config.unset_group("monitor: X");
        assert_eq!(config, before);
    }

    #[test]
    fn test_unset_of_output_marker_restores_lower_value() {
        let mut config = layered(&[
            (VENDOR, "[greeter]\nbackground = /bg.png\n"),
            (OUTPUT, "[greeter]\n-background =\n"),
        ]);
        assert_eq!(config.unset("greeter", "background"), Edit::Reverted);
        assert_eq!(config.get("greeter", "background"), Some("/bg.png"));
        assert_eq!(config.history("greeter", "background").unwrap().len(), 1);
        assert!(config.output_document(no_defaults).is_empty());
    }

    #[test]
    fn test_fresh_read_writes_nothing() {
        let config = layered(&[(VENDOR, "[greeter]\ntheme-name = Adwaita\n")]);
        assert!(config.output_document(no_defaults).is_empty());
    }

    #[test]
    fn test_set_then_output_document() {
        let mut config = layered(&[(VENDOR, "[greeter]\ntheme-name = Adwaita\n")]);
        config.set("greeter", "theme-name", "Breeze", None);
        assert_eq!(
            config.output_document(no_defaults).to_string(),
            "[greeter]\ntheme-name = Breeze\n"
        );
    }

    #[test]
    fn test_shadow_emits_unset_marker() {
        let mut config = layered(&[(VENDOR, "[greeter]\nbackground = #ffffff\n")]);
        assert_eq!(config.unset("greeter", "background"), Edit::Shadowed);
        assert_eq!(config.get("greeter", "background"), None);

        let text = config.output_document(no_defaults).to_string();
        assert_eq!(text, "[greeter]\n-background =\n");

        let reread = layered(&[
            (VENDOR, "[greeter]\nbackground = #ffffff\n"),
            (OUTPUT, text.as_str()),
        ]);
        assert_eq!(reread.get("greeter", "background"), None);
        assert_eq!(reread.output_document(no_defaults).to_string(), text);
    }

    #[test]
    fn test_default_collapse_leaves_no_trace() {
        let mut config = LayeredConfig::new(OUTPUT);
        config.set("greeter", "font-name", "Sans 10", Some("Sans 10"));
        assert!(config.group("greeter").is_none());
        assert!(config.output_document(no_defaults).is_empty());
    }

    #[test]
    fn test_sole_default_entry_read_from_output_is_not_written() {
        let config = layered(&[(OUTPUT, "[greeter]\nfont-name = Sans 10\nkeyboard = onboard\n")]);
        let doc = config.output_document(|group, key, value| {
            group == "greeter" && key == "font-name" && value == "Sans 10"
        });
        assert_eq!(doc.to_string(), "[greeter]\nkeyboard = onboard\n");
    }

    #[test]
    fn test_output_layer_overridden_below_precedence_is_not_written() {
        let mut config = layered(&[(VENDOR, "[greeter]\na = 1\n")]);
        config.set("greeter", "a", "2", None);
        config.merge_layer(
            Path::new("/etc/lightdm/other.conf"),
            &parse("[greeter]\na = 3\n").unwrap(),
        );
        assert!(config.output_document(no_defaults).is_empty());
    }

    #[test]
    fn test_unset_group_hides_all_keys() {
        let mut config = layered(&[(VENDOR, "[monitor: HDMI-1]\nlaptop = true\n[greeter]\na = 1\n")]);
        config.set("monitor: HDMI-1", "background", "#202020", None);
        config.unset_group("monitor: HDMI-1");

        assert_eq!(config.get("monitor: HDMI-1", "laptop"), None);
        assert_eq!(config.get("monitor: HDMI-1", "background"), None);
        assert_eq!(
            config.output_document(no_defaults).to_string(),
            "[monitor: HDMI-1]\n-laptop =\n"
        );
    }

    #[test]
    fn test_unset_group_owned_only_removes_group() {
        let mut config = LayeredConfig::new(OUTPUT);
        config.set("monitor: DP-2", "laptop", "false", None);
        config.unset_group("monitor: DP-2");
        assert!(config.group("monitor: DP-2").is_none());
    }

    #[test]
    fn test_entries_iterates_in_merge_order() {
        let config = layered(&[(VENDOR, "[b]\nx = 1\n[a]\ny = 2\nz = 3\n")]);
        let keys: Vec<_> = config.entries().map(|(g, k, _)| (g, k)).collect();
        assert_eq!(keys, vec![("b", "x"), ("a", "y"), ("a", "z")]);
    }
}
