//! Line-oriented parser for a single layer file

use super::names::normalize_key;
use super::{DEFAULT_GROUP, UNSET_PREFIX};
use crate::core::error::{ParseDiagnostic, ParseError};
use std::collections::HashMap;

/// One `(group, key, value)` triple read from a layer.
///
/// `value` is `None` for an explicit unset marker (`-key =`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub group: String,
    pub key: String,
    pub value: Option<String>,
}

impl ParsedEntry {
    pub fn new(group: impl Into<String>, key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            group: group.into(),
            key: key.into(),
            value,
        }
    }
}

/// Result of parsing one file: entries in file order plus the lines that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFile {
    pub entries: Vec<ParsedEntry>,
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl ParsedFile {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse the content of one layer file.
///
/// Rules:
/// - blank lines and lines starting with `#` or `;` are ignored
/// - a repeated `[group]` header re-opens that group
/// - keys are lowercased; a key repeated inside the same file keeps its first
///   position and its last value
/// - text after the closing `]` of a header is ignored
/// - entries of the `DEFAULT` group are dropped
/// - a bare `key` (no `=`, no `-` prefix) is reported and skipped
///
/// A key before the first header, or an unterminated header, fails the whole file.
pub fn parse(content: &str) -> Result<ParsedFile, ParseError> {
    let mut parsed = ParsedFile::default();
    let mut positions: HashMap<(String, String), usize> = HashMap::new();
    let mut current: Option<String> = None;

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') {
            current = Some(parse_header(line, line_no)?);
            continue;
        }

        let (raw_key, raw_value) = match line.split_once('=') {
            Some((key, value)) => (key.trim(), Some(value.trim())),
            None => (line, None),
        };

        let Some(group) = current.as_deref() else {
            return Err(ParseError::MissingSectionHeader {
                line: line_no,
                key: raw_key.to_string(),
            });
        };

        let (key, value) = match raw_key.strip_prefix(UNSET_PREFIX) {
            Some(stripped) => (stripped.trim(), None),
            None => match raw_value {
                Some(value) => (raw_key, Some(value.to_string())),
                None => {
                    parsed.diagnostics.push(ParseDiagnostic::KeyWithoutValue {
                        line: line_no,
                        group: group.to_string(),
                        key: raw_key.to_string(),
                    });
                    continue;
                }
            },
        };

        if key.is_empty() {
            parsed.diagnostics.push(ParseDiagnostic::EmptyKey {
                line: line_no,
                group: group.to_string(),
            });
            continue;
        }

        if group == DEFAULT_GROUP {
            continue;
        }

        let key = normalize_key(key);
        let slot = (group.to_string(), key.clone());
        match positions.get(&slot) {
            Some(&position) => parsed.entries[position].value = value,
            None => {
                positions.insert(slot, parsed.entries.len());
                parsed.entries.push(ParsedEntry::new(group, key, value));
            }
        }
    }

    Ok(parsed)
}

fn parse_header(line: &str, line_no: usize) -> Result<String, ParseError> {
    let malformed = || ParseError::MalformedHeader {
        line: line_no,
        text: line.to_string(),
    };

    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.split_once(']'))
        .map(|(name, _)| name.trim())
        .ok_or_else(malformed)?;

    if inner.is_empty() || inner.contains(['[', ']']) {
        return Err(malformed());
    }
    Ok(inner.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(group: &str, key: &str, value: Option<&str>) -> ParsedEntry {
        ParsedEntry::new(group, key, value.map(str::to_string))
    }

    #[test]
    fn test_parse_basic_groups() {
        let content = r#"
# system defaults
[greeter]
theme-name = Adwaita
font-name=Sans 10

[monitor: HDMI-1]
laptop = true
"#;
        let parsed = parse(content).unwrap();
        assert_eq!(
            parsed.entries,
            vec![
                entry("greeter", "theme-name", Some("Adwaita")),
                entry("greeter", "font-name", Some("Sans 10")),
                entry("monitor: HDMI-1", "laptop", Some("true")),
            ]
        );
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_parse_unset_marker() {
        let parsed = parse("[greeter]\n-background =\n-keyboard\n").unwrap();
        assert_eq!(
            parsed.entries,
            vec![
                entry("greeter", "background", None),
                entry("greeter", "keyboard", None),
            ]
        );
    }

    #[test]
    fn test_parse_empty_value_is_not_unset() {
        let parsed = parse("[greeter]\nclock-format =\n").unwrap();
        assert_eq!(parsed.entries, vec![entry("greeter", "clock-format", Some(""))]);
    }

    #[test]
    fn test_value_keeps_inner_equals_sign() {
        let parsed = parse("[greeter]\na11y-states = contrast=on\n").unwrap();
        assert_eq!(parsed.entries[0].value.as_deref(), Some("contrast=on"));
    }

    #[test]
    fn test_key_without_value_is_reported_and_skipped() {
        let parsed = parse("[greeter]\nshow-clock\nposition = 50%,center\n").unwrap();
        assert_eq!(parsed.entries, vec![entry("greeter", "position", Some("50%,center"))]);
        assert_eq!(
            parsed.diagnostics,
            vec![ParseDiagnostic::KeyWithoutValue {
                line: 2,
                group: "greeter".to_string(),
                key: "show-clock".to_string(),
            }]
        );
    }

    #[test]
    fn test_empty_key_is_reported() {
        let parsed = parse("[greeter]\n= orphan\n").unwrap();
        assert!(parsed.entries.is_empty());
        assert!(matches!(
            parsed.diagnostics[0],
            ParseDiagnostic::EmptyKey { line: 2, .. }
        ));
    }

    #[test]
    fn test_duplicate_key_last_wins_first_position() {
        let content = "[greeter]\ntheme-name = A\nfont-name = B\ntheme-name = C\n";
        let parsed = parse(content).unwrap();
        assert_eq!(
            parsed.entries,
            vec![
                entry("greeter", "theme-name", Some("C")),
                entry("greeter", "font-name", Some("B")),
            ]
        );
    }

    #[test]
    fn test_duplicate_section_is_merged() {
        let content = "[greeter]\na = 1\n[other]\nb = 2\n[greeter]\na = 3\nc = 4\n";
        let parsed = parse(content).unwrap();
        assert_eq!(
            parsed.entries,
            vec![
                entry("greeter", "a", Some("3")),
                entry("other", "b", Some("2")),
                entry("greeter", "c", Some("4")),
            ]
        );
    }

    #[test]
    fn test_default_group_is_skipped() {
        let parsed = parse("[DEFAULT]\na = 1\n[greeter]\nb = 2\n").unwrap();
        assert_eq!(parsed.entries, vec![entry("greeter", "b", Some("2"))]);
    }

    #[test]
    fn test_missing_section_header_fails_file() {
        let err = parse("theme-name = Adwaita\n[greeter]\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingSectionHeader {
                line: 1,
                key: "theme-name".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_header_fails_file() {
        assert!(matches!(
            parse("[greeter\na = 1\n"),
            Err(ParseError::MalformedHeader { line: 1, .. })
        ));
        assert!(matches!(
            parse("[]\n"),
            Err(ParseError::MalformedHeader { line: 1, .. })
        ));
        assert!(matches!(
            parse("[a[b]\n"),
            Err(ParseError::MalformedHeader { line: 1, .. })
        ));
    }

    #[test]
    fn test_header_trailing_text_is_ignored() {
        let parsed = parse("[greeter] # login screen\ntheme-name = Adwaita\n").unwrap();
        assert_eq!(parsed.entries, vec![entry("greeter", "theme-name", Some("Adwaita"))]);
    }

    #[test]
    fn test_keys_are_lowercased() {
        let content = "[greeter]\nTheme-Name = A\ntheme-name = B\n-BACKGROUND =\n";
        let parsed = parse(content).unwrap();
        assert_eq!(
            parsed.entries,
            vec![
                entry("greeter", "theme-name", Some("B")),
                entry("greeter", "background", None),
            ]
        );
    }

    #[test]
    fn test_comments_and_blank_lines_only() {
        let parsed = parse("; nothing here\n\n# still nothing\n").unwrap();
        assert!(parsed.is_empty());
    }
}
