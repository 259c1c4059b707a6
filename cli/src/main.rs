//! CLI entrypoint for greeter-settings
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use greeter_settings_application::{LayerSource, SettingsSession};
use greeter_settings_domain::Edit;
use greeter_settings_domain::config::known_keys::{ValueKind, known_keys, lookup_key};
use greeter_settings_infrastructure::{
    AccessContext, FsLayerSource, FsOutputSink, SettingsLoader, SystemDirs, ToolSettings,
    check_path_accessibility,
};
use greeter_settings_presentation::{
    CheckItem, CheckReport, Cli, Command, ConsoleFormatter, EditView, EntryView, KeyView,
    OutputFormat, SourceView, ValueView,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

type Session = SettingsSession<FsLayerSource, FsOutputSink>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = load_settings(&cli)?;
    if cli.command == Command::Settings {
        print!("{}", settings.to_toml().context("Failed to serialize settings")?);
        return Ok(());
    }

    // === Dependency Injection ===
    let layout = settings.search_layout(&SystemDirs::from_env());
    let source = Arc::new(FsLayerSource::new());
    let mut session = SettingsSession::new(layout, source.clone(), Arc::new(FsOutputSink::new()));
    session.read();
    if cli.command.is_mutating() {
        session.migrate_legacy_keys();
    }

    let format = cli.format;
    match &cli.command {
        Command::Get { group, key } => {
            let view = ValueView::new(session.config(), group, key);
            match format {
                OutputFormat::Text => match &view.value {
                    Some(value) => println!("{}", value),
                    None => bail!("[{}] {} is not set", group, key),
                },
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&view)),
            }
        }
        Command::Set {
            group,
            key,
            value,
            default,
        } => {
            if let Some(info) = lookup_key(group, key)
                && !info.accepts(value)
            {
                warn!(
                    "'{}' is not a valid {} value for [{}] {}",
                    value,
                    info.kind.as_str(),
                    group,
                    key
                );
            }
            let edit = session.set(group, key, value, default.as_deref())?;
            commit(&mut session)?;
            report_edit(format, &session, group, Some(key.as_str()), edit);
        }
        Command::Unset { group, key } => {
            let edit = session.unset(group, key)?;
            commit(&mut session)?;
            report_edit(format, &session, group, Some(key.as_str()), edit);
        }
        Command::UnsetGroup { group } => {
            let existed = session.config().group(group).is_some();
            session.unset_group(group)?;
            let edit = if !existed {
                Edit::Unchanged
            } else if session.config().group(group).is_some() {
                Edit::Shadowed
            } else {
                Edit::Removed
            };
            commit(&mut session)?;
            report_edit(format, &session, group, None, edit);
        }
        Command::List { all } => {
            let entries = EntryView::collect(session.config(), *all);
            match format {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_entries(&entries)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&entries)),
            }
        }
        Command::Sources => {
            let output = session.output_path();
            let sources: Vec<SourceView> = session
                .layout()
                .candidate_files(source.as_ref())
                .into_iter()
                .map(|path| {
                    let present = source.is_present(&path);
                    SourceView::new(path, present, output)
                })
                .collect();
            match format {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_sources(&sources)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&sources)),
            }
        }
        Command::Keys => {
            let keys: Vec<KeyView> = known_keys()
                .iter()
                .map(|info| KeyView::new(info, session.config()))
                .collect();
            match format {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_keys(&keys)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&keys)),
            }
        }
        Command::Check => {
            let report = check(&session, &settings);
            match format {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_check(&report)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&report)),
            }
            if !report.is_ok() {
                bail!("Configuration check found problems");
            }
        }
        // Printed before the session is created
        Command::Settings => {}
    }

    Ok(())
}

/// Tool settings with command-line overrides applied
fn load_settings(cli: &Cli) -> Result<ToolSettings> {
    let mut settings = if cli.no_config {
        SettingsLoader::load_defaults()
    } else {
        SettingsLoader::load(cli.config.as_deref())?
    };

    if !cli.roots.is_empty() {
        settings.roots = Some(cli.roots.clone());
    }
    if let Some(output) = &cli.output {
        settings.output = output.clone();
    }
    Ok(settings)
}

/// Write the output file if anything changed
fn commit(session: &mut Session) -> Result<()> {
    if !session.is_modified() {
        info!("Nothing to write");
        return Ok(());
    }
    session
        .write()
        .with_context(|| format!("Changes to {} were not saved", session.output_path().display()))
}

fn report_edit(format: OutputFormat, session: &Session, group: &str, key: Option<&str>, edit: Edit) {
    let output = session.output_path();
    match format {
        OutputFormat::Text => println!("{}", ConsoleFormatter::format_edit(group, key, edit, output)),
        OutputFormat::Json => println!(
            "{}",
            ConsoleFormatter::format_json(&EditView::new(group, key, edit, output))
        ),
    }
}

/// Problems that would keep the greeter from using the configuration
fn check(session: &Session, settings: &ToolSettings) -> CheckReport {
    let mut report = CheckReport::default();

    let read = session.last_read();
    for (path, error) in &read.rejected {
        report.push(CheckItem::failed(path.display().to_string(), error.to_string()));
    }
    for (path, diagnostic) in &read.diagnostics {
        report.push(CheckItem::failed(
            path.display().to_string(),
            diagnostic.to_string(),
        ));
    }

    let output = session.output_path().display().to_string();
    if session.is_writable() {
        report.push(CheckItem::passed(format!("{} is writable", output)));
    } else {
        report.push(CheckItem::failed(output, "not writable by the current user"));
    }

    let ctx = match AccessContext::for_user(&settings.greeter_user) {
        Ok(ctx) => ctx,
        Err(e) => {
            report.push(CheckItem::failed(
                format!("greeter account '{}'", settings.greeter_user),
                e.to_string(),
            ));
            return report;
        }
    };

    // Image keys apply to monitor groups too
    let image_keys: Vec<&str> = known_keys()
        .iter()
        .filter(|info| info.kind == ValueKind::Image)
        .map(|info| info.key)
        .collect();
    for (group, key, values) in session.config().entries() {
        if !image_keys.contains(&key) {
            continue;
        }
        let Some(value) = values.last().and_then(|v| v.value()) else {
            continue;
        };
        // `#rrggbb` colors and `#icon-name` themed icons are not files
        if value.is_empty() || value.starts_with('#') {
            continue;
        }
        let subject = format!("[{}] {}", group, key);
        match check_path_accessibility(&ctx, Path::new(value)) {
            Ok(()) => report.push(CheckItem::passed(subject)),
            Err(problem) => report.push(CheckItem::failed(subject, problem.to_string())),
        }
    }

    report
}
