//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored when writing to a terminal
    #[default]
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for greeter-settings
#[derive(Parser, Debug)]
#[command(name = "greeter-settings")]
#[command(author, version, about = "Edit the layered LightDM GTK greeter configuration")]
#[command(long_about = r#"
The greeter reads its configuration from several files. Files installed by
packages and drop-ins in `lightdm-gtk-greeter.conf.d` directories are merged
first; /etc/lightdm/lightdm-gtk-greeter.conf overrides them all.

Edits are only ever written to that last file. Removing a value another file
defines writes an unset marker (`-key =`) instead of touching the other file.

Tool settings are loaded from (in priority order):
1. --root / --output            Command-line flags
2. GREETER_SETTINGS_*           Environment variables
3. --config <path>              Explicit settings file
4. ~/.config/greeter-settings/config.toml

Example:
  greeter-settings get greeter theme-name
  greeter-settings set greeter theme-name Adwaita-dark
  greeter-settings unset greeter background
  greeter-settings list --all
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to settings file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of settings files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Search root, lowest precedence first (can be specified multiple times)
    #[arg(long = "root", value_name = "DIR", global = true)]
    pub roots: Vec<PathBuf>,

    /// File edits are written to
    #[arg(long, value_name = "PATH", global = true)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the effective value of a key
    Get { group: String, key: String },

    /// Set a key in the output file
    Set {
        group: String,
        key: String,
        value: String,

        /// Value the greeter uses when the key is absent
        #[arg(long, value_name = "VALUE")]
        default: Option<String>,
    },

    /// Remove a key, hiding values from other files
    Unset { group: String, key: String },

    /// Remove every key of a group
    UnsetGroup { group: String },

    /// List effective values and the file each comes from
    List {
        /// Include unset keys and the full history of every key
        #[arg(short, long)]
        all: bool,
    },

    /// List candidate configuration files in merge order
    Sources,

    /// Describe the known greeter keys
    Keys,

    /// Check that the output file is writable and images are readable by the greeter
    Check,

    /// Print the effective tool settings as TOML
    Settings,
}

impl Command {
    /// Whether the command changes the output file
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Set { .. } | Command::Unset { .. } | Command::UnsetGroup { .. }
        )
    }
}
