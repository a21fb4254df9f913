//! Clap derive structures for the `fleetmon` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use fleetmon_core::{DeviceCategory, DeviceStatus, SortField};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fleetmon -- equipment inventory from the command line
#[derive(Debug, Parser)]
#[command(
    name = "fleetmon",
    version,
    about = "Track equipment inventory and sync it with the data pipeline",
    long_about = "Maintain a local equipment inventory (servers, printers, PCs),\n\
        import and export it as JSON or SQLite, and synchronize it with the\n\
        central staging/transform pipeline.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FLEETMON_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Directory holding devices.json and settings.json
    #[arg(long, env = "FLEETMON_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Pipeline service host (overrides config)
    #[arg(long, env = "FLEETMON_HOST", global = true)]
    pub host: Option<String>,

    /// Pipeline service port (overrides config)
    #[arg(long, env = "FLEETMON_PORT", global = true)]
    pub port: Option<u16>,

    /// Pipeline API key
    #[arg(long, env = "FLEETMON_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List devices, optionally filtered, sorted, or grouped
    #[command(alias = "ls")]
    List(ListArgs),

    /// Add a device to the inventory
    Add(AddArgs),

    /// Remove a device by serial number
    #[command(alias = "rm")]
    Remove(RemoveArgs),

    /// Edit fields of an existing device
    Edit(EditArgs),

    /// Import devices from a JSON or SQLite file
    Import(ImportArgs),

    /// Export devices to a JSON or SQLite file
    Export(ExportArgs),

    /// Replace the local set with the remote authoritative one
    Pull(PullArgs),

    /// Stage the local set remotely and transform it
    Commit,

    /// Trigger a full remote pipeline run
    Push,

    /// View or modify configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── List ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only devices with this status
    #[arg(long)]
    pub status: Option<DeviceStatus>,

    /// Only devices in this category
    #[arg(long)]
    pub category: Option<DeviceCategory>,

    /// Substring match on name or serial number (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only devices installed on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<chrono::NaiveDate>,

    /// Only devices installed on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<chrono::NaiveDate>,

    /// Sort / group field (overrides saved setting)
    #[arg(long)]
    pub sort: Option<SortField>,

    /// Group rows by the sort field (overrides saved setting)
    #[arg(long, conflicts_with = "flat")]
    pub group: bool,

    /// Force a flat sorted list (overrides saved setting)
    #[arg(long)]
    pub flat: bool,
}

// ── Add / Remove / Edit ──────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Device name
    pub name: String,

    /// Device category
    #[arg(long, default_value = "server")]
    pub category: DeviceCategory,

    /// Serial number
    #[arg(long, default_value = "")]
    pub serial: String,

    /// Install date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<chrono::NaiveDate>,

    /// Device status
    #[arg(long, default_value = "working")]
    pub status: DeviceStatus,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Serial number of the device to remove
    pub serial: String,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Serial number of the device to edit
    pub serial: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New category
    #[arg(long)]
    pub category: Option<DeviceCategory>,

    /// New serial number
    #[arg(long)]
    pub new_serial: Option<String>,

    /// New install date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<chrono::NaiveDate>,

    /// New status
    #[arg(long)]
    pub status: Option<DeviceStatus>,
}

// ── Import / Export ──────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum FileFormat {
    /// JSON interchange document
    Json,
    /// SQLite database with a Devices table
    Sqlite,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ConflictPolicy {
    /// Prompt per conflict (interactive)
    Ask,
    /// Replace the stored device
    Overwrite,
    /// Keep both devices
    KeepBoth,
    /// Drop the incoming record
    Skip,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// File to import from
    pub path: PathBuf,

    /// File format (inferred from the extension when omitted)
    #[arg(long)]
    pub format: Option<FileFormat>,

    /// How to resolve serial-number conflicts
    #[arg(long, default_value = "ask")]
    pub on_conflict: ConflictPolicy,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// File to export to
    pub path: PathBuf,

    /// File format (inferred from the extension when omitted)
    #[arg(long)]
    pub format: Option<FileFormat>,

    /// Export only devices with these serial numbers (repeatable)
    #[arg(long)]
    pub serial: Vec<String>,
}

// ── Sync ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PullArgs {
    /// Replace the local set without confirmation
    #[arg(long)]
    pub force: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the active configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,

    /// Set the remote pipeline connection
    Set(ConfigSetArgs),
}

#[derive(Debug, Args)]
pub struct ConfigSetArgs {
    /// Pipeline service host
    #[arg(long)]
    pub host: String,

    /// Pipeline service port
    #[arg(long, default_value = "8080")]
    pub port: u16,

    /// Use HTTPS
    #[arg(long)]
    pub https: bool,

    /// Environment variable to read the API key from
    #[arg(long)]
    pub api_key_env: Option<String>,

    /// API key stored in plaintext (prefer --api-key-env)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
