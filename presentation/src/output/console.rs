//! Console output formatter for command results

use crate::output::views::{CheckReport, EntryView, KeyView, SourceView};
use colored::Colorize;
use greeter_settings_domain::Edit;
use serde::Serialize;
use std::path::Path;

/// Formats command results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format as JSON
    pub fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// What an edit did to the output file
    pub fn format_edit(group: &str, key: Option<&str>, edit: Edit, output: &Path) -> String {
        let target = match key {
            Some(key) => format!("[{}] {}", group, key),
            None => format!("[{}]", group),
        };
        let action = match edit {
            Edit::Unchanged => "unchanged".dimmed().to_string(),
            Edit::Appended | Edit::Overwritten => "set".green().to_string(),
            Edit::Collapsed => "matches a lower layer, entry dropped".green().to_string(),
            Edit::Reverted => "reverted to the lower layer value".green().to_string(),
            Edit::Shadowed => "hidden by an unset marker".yellow().to_string(),
            Edit::Removed => "removed".green().to_string(),
        };
        format!("{}: {} ({})", target.bold(), action, output.display())
    }

    /// Entries grouped by section, with the file each comes from
    pub fn format_entries(entries: &[EntryView]) -> String {
        let mut output = String::new();
        let mut current_group: Option<&str> = None;

        for entry in entries {
            if current_group != Some(entry.group.as_str()) {
                if current_group.is_some() {
                    output.push('\n');
                }
                output.push_str(&format!("{}\n", format!("[{}]", entry.group).cyan().bold()));
                current_group = Some(entry.group.as_str());
            }

            let line = match &entry.value {
                Some(value) => format!("{} = {}", entry.key, value),
                None => format!("-{}", entry.key).red().to_string(),
            };
            let source = entry.source.display().to_string();
            let source = if entry.edited {
                source.green()
            } else {
                source.dimmed()
            };
            output.push_str(&format!("{}  {}\n", line, source));

            // Older layers, most recent first
            if entry.history.len() > 1 {
                for layer in entry.history.iter().rev().skip(1) {
                    let value = layer.value.as_deref().unwrap_or("(unset)");
                    output.push_str(&format!(
                        "    {} {}\n",
                        format!("{} <-", value).dimmed(),
                        layer.source.display().to_string().dimmed()
                    ));
                }
            }
        }

        if output.is_empty() {
            output.push_str(&format!("{}\n", "No values defined".dimmed()));
        }
        output
    }

    /// Candidate files in merge order
    pub fn format_sources(sources: &[SourceView]) -> String {
        let mut output = String::new();
        for source in sources {
            let marker = if source.present {
                "[FOUND]".green().bold()
            } else {
                "[     ]".dimmed()
            };
            let path = source.path.display().to_string();
            let path = if source.output {
                format!("{} {}", path.bold(), "(output)".cyan())
            } else {
                path
            };
            output.push_str(&format!("  {} {}\n", marker, path));
        }
        output
    }

    /// Known keys with defaults and current values
    pub fn format_keys(keys: &[KeyView]) -> String {
        let mut output = String::new();
        for key in keys {
            output.push_str(&format!(
                "{} {}\n",
                format!("[{}] {}", key.group, key.key).cyan().bold(),
                format!("({})", key.kind).dimmed()
            ));
            output.push_str(&format!("    {}\n", key.description));
            if !key.valid_values.is_empty() {
                output.push_str(&format!("    one of: {}\n", key.valid_values.join(", ")));
            }
            if let Some(default) = &key.default {
                output.push_str(&format!("    default: {}\n", default));
            }
            if let Some(current) = &key.current {
                output.push_str(&format!("    current: {}\n", current.green()));
            }
        }
        output
    }

    pub fn format_check(report: &CheckReport) -> String {
        let mut output = String::new();
        for item in &report.items {
            match &item.problem {
                None => output.push_str(&format!("  {} {}\n", "ok".green().bold(), item.subject)),
                Some(problem) => output.push_str(&format!(
                    "  {} {}: {}\n",
                    "!!".red().bold(),
                    item.subject,
                    problem
                )),
            }
        }
        output
    }
}
