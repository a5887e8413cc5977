//! Clap derive structures for the `akuvox` CLI.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// akuvox -- inspect and sync SmartPlus temporary door keys
#[derive(Debug, Parser)]
#[command(
    name = "akuvox",
    version,
    about = "Inspect and sync Akuvox SmartPlus temporary door keys",
    long_about = "Reads the persisted personal door log of an Akuvox SmartPlus\n\
        integration and shows which temporary door keys are currently usable.",
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
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "AKUVOX_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Persisted door key store (overrides store_path from config)
    #[arg(long, short = 's', env = "AKUVOX_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "AKUVOX_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one key name per line (scripting)
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List temporary door keys from the store
    #[command(alias = "k")]
    Keys(KeysArgs),

    /// Keep refreshing the door key view until interrupted
    Watch(WatchArgs),

    /// Inspect configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct KeysArgs {
    /// Only show keys that are active
    #[arg(long)]
    pub active: bool,

    /// Evaluate activity at this local time instead of now ("YYYY-MM-DD HH:MM:SS")
    #[arg(long, value_parser = parse_instant)]
    pub at: Option<NaiveDateTime>,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Refresh interval in seconds (overrides poll_interval_secs)
    #[arg(long, short = 'i')]
    pub interval: Option<u64>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}

fn parse_instant(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("expected \"YYYY-MM-DD HH:MM:SS\": {e}"))
}
