//! Serialization of the output layer

use super::UNSET_PREFIX;
use std::fmt;

/// Ordered group of a document to be written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniGroup {
    pub name: String,
    /// `None` values are written as unset markers
    pub entries: Vec<(String, Option<String>)>,
}

impl IniGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: Option<String>) {
        self.entries.push((key.into(), value));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An INI document, built fully in memory before anything touches the disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    pub groups: Vec<IniGroup>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group; empty groups are kept out of the document.
    pub fn push_group(&mut self, group: IniGroup) {
        if !group.is_empty() {
            self.groups.push(group);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of entries across all groups
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, group) in self.groups.iter().filter(|g| !g.is_empty()).enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{}]", group.name)?;
            for (key, value) in &group.entries {
                match value {
                    Some(value) if value.is_empty() => writeln!(f, "{} =", key)?,
                    Some(value) => writeln!(f, "{} = {}", key, value)?,
                    None => writeln!(f, "{}{} =", UNSET_PREFIX, key)?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ini::parse;

    #[test]
    fn test_write_single_group() {
        let mut group = IniGroup::new("greeter");
        group.push("theme-name", Some("Breeze".to_string()));
        let mut doc = IniDocument::new();
        doc.push_group(group);

        assert_eq!(doc.to_string(), "[greeter]\ntheme-name = Breeze\n");
    }

    #[test]
    fn test_write_unset_marker_and_empty_value() {
        let mut group = IniGroup::new("greeter");
        group.push("background", None);
        group.push("clock-format", Some(String::new()));
        let mut doc = IniDocument::new();
        doc.push_group(group);

        assert_eq!(doc.to_string(), "[greeter]\n-background =\nclock-format =\n");
    }

    #[test]
    fn test_groups_separated_by_blank_line() {
        let mut first = IniGroup::new("greeter");
        first.push("a", Some("1".to_string()));
        let mut second = IniGroup::new("monitor: DP-1");
        second.push("laptop", Some("false".to_string()));
        let mut doc = IniDocument::new();
        doc.push_group(first);
        doc.push_group(second);

        assert_eq!(
            doc.to_string(),
            "[greeter]\na = 1\n\n[monitor: DP-1]\nlaptop = false\n"
        );
    }

    #[test]
    fn test_empty_groups_are_dropped() {
        let mut doc = IniDocument::new();
        doc.push_group(IniGroup::new("greeter"));
        assert!(doc.is_empty());
        assert_eq!(doc.to_string(), "");
    }

    #[test]
    fn test_written_document_parses_back() {
        let mut group = IniGroup::new("greeter");
        group.push("theme-name", Some("Breeze".to_string()));
        group.push("background", None);
        let mut doc = IniDocument::new();
        doc.push_group(group);

        let parsed = parse(&doc.to_string()).unwrap();
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.entries[0].value.as_deref(), Some("Breeze"));
        assert_eq!(parsed.entries[1].value, None);
    }
}
