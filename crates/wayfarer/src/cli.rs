//! Clap derive structures for the `wayfarer` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Kept free of workspace crates so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wayfarer -- plan trips around holidays, events, and the weather
#[derive(Debug, Parser)]
#[command(
    name = "wayfarer",
    version,
    about = "Explore a country's holidays, events, weather, and sun times",
    long_about = "Pick a country (and optionally a city and year) to pull public holidays,\n\
        long weekends, local events, the weather forecast, and sunrise/sunset times\n\
        from public data providers. Bookmark what you like in My Plans.",
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
    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "WAYFARER_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "WAYFARER_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Directory holding saved plans
    #[arg(long, env = "WAYFARER_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List countries with holiday data
    #[command(alias = "c")]
    Countries(CountriesArgs),

    /// Select a destination and load every view
    #[command(alias = "x")]
    Explore(ExploreArgs),

    /// Manage saved plans (My Plans)
    #[command(alias = "p")]
    Plans(PlansArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COUNTRIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CountriesArgs {
    /// Only countries whose name starts with this (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EXPLORE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ExploreArgs {
    /// ISO 3166-1 alpha-2 country code (e.g. DE)
    pub country: String,

    /// City for events, weather, and sun times [default: the capital]
    #[arg(long)]
    pub city: Option<String>,

    /// Year for holidays and long weekends [default: from config]
    #[arg(long)]
    pub year: Option<i32>,

    /// Only print these views (all views still load)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<ViewName>,

    /// Save every card of these views to My Plans
    #[arg(long, value_delimiter = ',')]
    pub save: Vec<SaveTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewName {
    /// Country overview and local time
    #[value(alias = "dashboard")]
    Overview,
    Holidays,
    Events,
    Weather,
    #[value(alias = "longWeekends")]
    LongWeekends,
    #[value(alias = "sun")]
    SunTimes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SaveTarget {
    Holidays,
    Events,
    #[value(alias = "longWeekends")]
    LongWeekends,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PLANS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PlansArgs {
    #[command(subcommand)]
    pub command: PlansCommand,
}

#[derive(Debug, Subcommand)]
pub enum PlansCommand {
    /// List saved plans
    #[command(alias = "ls")]
    List {
        /// all, holiday, event, or longWeekend
        #[arg(long, short = 'f', default_value = "all")]
        filter: String,
    },

    /// Save a plan by hand
    Add(PlanAddArgs),

    /// Remove a saved plan by list number or name
    #[command(alias = "rm")]
    Remove {
        /// 1-based number from `plans list`, or the plan's name/date
        target: String,
    },

    /// Remove every saved plan
    Clear,
}

#[derive(Debug, Args)]
pub struct PlanAddArgs {
    /// Kind of plan
    pub kind: PlanKindArg,

    /// Plan name (required for holidays and events)
    #[arg(long)]
    pub name: Option<String>,

    /// Local name of a holiday
    #[arg(long)]
    pub local_name: Option<String>,

    /// Date, or the first day of a long weekend (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Last day of a long weekend (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Long weekend needs a bridge day off
    #[arg(long)]
    pub bridge: bool,

    /// City of an event
    #[arg(long)]
    pub city: Option<String>,

    /// Country name
    #[arg(long, default_value = "")]
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlanKindArg {
    Holiday,
    Event,
    #[value(alias = "longWeekend")]
    LongWeekend,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display the current configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,

    /// Store the Ticketmaster API key
    SetKey {
        /// The key; prompted for when omitted
        key: Option<String>,

        /// Write the key into the config file instead of the keyring
        #[arg(long)]
        plaintext: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
