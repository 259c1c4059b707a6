//! Settings session use case
//!
//! The façade the front-end talks to: it reads every layer into a
//! [`LayeredConfig`], records edits at the output layer and writes back only
//! what belongs there.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized -> read() -> Read -> set/unset -> Modified -> write() -> Written
//!                              ^                                            |
//!                              +------------------- read() -----------------+
//! ```
//!
//! `read()` always rebuilds the whole store, so calling it twice with unchanged
//! files yields the same state.
//!
//! # Example
//!
//! ```ignore
//! let mut session = SettingsSession::new(layout, Arc::new(source), Arc::new(sink));
//! session.read();
//! session.set("greeter", "theme-name", "Breeze", None)?;
//! session.write()?;
//! ```

use crate::ports::layer_source::LayerSource;
use crate::ports::output_sink::{OutputError, OutputSink};
use crate::use_cases::search_layout::SearchLayout;
use greeter_settings_domain::config::known_keys::{
    GREETER_GROUP, INDICATORS_KEY, LEGACY_INDICATORS_KEY, default_for, is_default,
};
use greeter_settings_domain::ini::{normalize_key, validate_group, validate_key, validate_value};
use greeter_settings_domain::{
    Edit, IniDocument, LayeredConfig, NameError, ParseDiagnostic, ParseError, parse,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced to the front-end
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Configuration has not been read yet")]
    NotRead,

    #[error("Invalid entry: {0}")]
    InvalidName(#[from] NameError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Where a session is in its read/edit/write cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Read,
    Modified,
    Written,
}

/// What the last `read()` found.
#[derive(Debug, Clone, Default)]
pub struct ReadReport {
    /// Layers merged, in precedence order
    pub merged: Vec<PathBuf>,
    /// Candidate files that were absent or unreadable
    pub missing: Vec<PathBuf>,
    /// Files skipped because they could not be parsed
    pub rejected: Vec<(PathBuf, ParseError)>,
    /// Lines dropped from merged files
    pub diagnostics: Vec<(PathBuf, ParseDiagnostic)>,
}

impl ReadReport {
    pub fn has_problems(&self) -> bool {
        !self.rejected.is_empty() || !self.diagnostics.is_empty()
    }
}

/// Use case owning the merged configuration of one editing session
pub struct SettingsSession<S: LayerSource, O: OutputSink> {
    layout: SearchLayout,
    source: Arc<S>,
    sink: Arc<O>,
    config: LayeredConfig,
    state: SessionState,
    report: ReadReport,
}

impl<S: LayerSource, O: OutputSink> SettingsSession<S, O> {
    pub fn new(layout: SearchLayout, source: Arc<S>, sink: Arc<O>) -> Self {
        let config = LayeredConfig::new(layout.output_path.clone());
        Self {
            layout,
            source,
            sink,
            config,
            state: SessionState::Uninitialized,
            report: ReadReport::default(),
        }
    }

    pub fn layout(&self) -> &SearchLayout {
        &self.layout
    }

    pub fn output_path(&self) -> &Path {
        &self.layout.output_path
    }

    pub fn config(&self) -> &LayeredConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_modified(&self) -> bool {
        self.state == SessionState::Modified
    }

    pub fn last_read(&self) -> &ReadReport {
        &self.report
    }

    /// Rebuild the merged configuration from every layer.
    ///
    /// Never fails: absent files are skipped silently, unparsable files are
    /// skipped with a warning. The previous state is replaced only once the
    /// new one is fully built.
    pub fn read(&mut self) {
        let files = self.layout.candidate_files(self.source.as_ref());
        let mut config = LayeredConfig::new(self.layout.output_path.clone());
        let mut report = ReadReport::default();

        for path in files {
            let Some(content) = self.source.read_layer(&path) else {
                debug!("Layer {} not present", path.display());
                report.missing.push(path);
                continue;
            };

            let parsed = match parse(&content) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("Skipping layer {}: {}", path.display(), e);
                    report.rejected.push((path, e));
                    continue;
                }
            };

            for diagnostic in &parsed.diagnostics {
                warn!("{}: {}", path.display(), diagnostic);
            }
            let stored = config.merge_layer(&path, &parsed);
            debug!("Merged {} entries from {}", stored, path.display());

            report.diagnostics.extend(
                parsed
                    .diagnostics
                    .into_iter()
                    .map(|diagnostic| (path.clone(), diagnostic)),
            );
            report.merged.push(path);
        }

        info!(
            "Read {} layer(s), {} candidate(s) absent",
            report.merged.len(),
            report.missing.len()
        );
        self.config = config;
        self.report = report;
        self.state = SessionState::Read;
    }

    /// Effective value of a key
    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.config.get(group, &normalize_key(key))
    }

    pub fn get_or<'a>(&'a self, group: &str, key: &str, fallback: &'a str) -> &'a str {
        self.get(group, key).unwrap_or(fallback)
    }

    /// Record a new value at the output layer.
    ///
    /// Without an explicit `default`, the registered default of a known key is
    /// used for the collapse rules.
    pub fn set(
        &mut self,
        group: &str,
        key: &str,
        value: &str,
        default: Option<&str>,
    ) -> Result<Edit, SessionError> {
        self.ensure_read()?;
        validate_group(group)?;
        validate_key(key)?;
        validate_value(key, value)?;

        let key = normalize_key(key);
        let default = default.or_else(|| default_for(group, &key));
        let edit = self.config.set(group, &key, value, default);
        debug!("[{}] {} = {} -> {:?}", group, key, value, edit);
        self.touch(edit);
        Ok(edit)
    }

    /// Remove the output layer's value, or hide a lower layer's value.
    pub fn unset(&mut self, group: &str, key: &str) -> Result<Edit, SessionError> {
        self.ensure_read()?;
        validate_group(group)?;
        validate_key(key)?;

        let key = normalize_key(key);
        let edit = self.config.unset(group, &key);
        debug!("[{}] unset {} -> {:?}", group, key, edit);
        self.touch(edit);
        Ok(edit)
    }

    /// Hide every key of a group.
    pub fn unset_group(&mut self, group: &str) -> Result<(), SessionError> {
        self.ensure_read()?;
        validate_group(group)?;

        let before = self.config.clone();
        self.config.unset_group(group);
        if self.config != before {
            debug!("[{}] group unset", group);
            self.state = SessionState::Modified;
        }
        Ok(())
    }

    /// Move a legacy `show-indicators` value to `indicators`.
    ///
    /// Returns whether anything was migrated.
    pub fn migrate_legacy_keys(&mut self) -> bool {
        if self.state == SessionState::Uninitialized
            || self.config.get(GREETER_GROUP, INDICATORS_KEY).is_some()
        {
            return false;
        }
        let Some(legacy) = self
            .config
            .get(GREETER_GROUP, LEGACY_INDICATORS_KEY)
            .map(str::to_string)
        else {
            return false;
        };

        if !legacy.is_empty() {
            self.config.set(GREETER_GROUP, INDICATORS_KEY, &legacy, None);
        }
        self.config.unset(GREETER_GROUP, LEGACY_INDICATORS_KEY);
        info!(
            "Migrated [{}] {} to {}",
            GREETER_GROUP, LEGACY_INDICATORS_KEY, INDICATORS_KEY
        );
        self.state = SessionState::Modified;
        true
    }

    /// The document `write()` would produce
    pub fn output_document(&self) -> IniDocument {
        self.config.output_document(is_default)
    }

    /// Persist the output layer.
    ///
    /// The document is built in memory before the sink is called; lower layers
    /// are never touched.
    pub fn write(&mut self) -> Result<(), SessionError> {
        self.ensure_read()?;
        let document = self.output_document();
        let content = document.to_string();

        self.sink.write_output(&self.layout.output_path, &content)?;
        info!(
            "Wrote {} entries to {}",
            document.entry_count(),
            self.layout.output_path.display()
        );
        self.state = SessionState::Written;
        Ok(())
    }

    /// Whether the output file (or its directory) can be written
    pub fn is_writable(&self) -> bool {
        self.sink.is_writable(&self.layout.output_path)
    }

    fn ensure_read(&self) -> Result<(), SessionError> {
        if self.state == SessionState::Uninitialized {
            return Err(SessionError::NotRead);
        }
        Ok(())
    }

    fn touch(&mut self, edit: Edit) {
        if edit != Edit::Unchanged {
            self.state = SessionState::Modified;
        }
    }
}
