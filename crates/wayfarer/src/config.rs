//! CLI configuration -- thin wrapper around `wayfarer_config`.
//!
//! Resolves the settings every command needs, letting `GlobalOpts` flags
//! override the config file (--output, --color, --timeout, --data-dir).

use std::path::PathBuf;

use clap::ValueEnum;

use wayfarer_core::ServiceConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Re-exports from shared crate ────────────────────────────────────

pub use wayfarer_config::{Config, config_path, load_config, load_config_or_default, save_config};

// ── Resolved settings ────────────────────────────────────────────────

/// Presentation settings after flags and config are merged.
#[derive(Debug, Clone)]
pub struct Settings {
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
    pub default_year: i32,
}

impl Settings {
    pub fn resolve(global: &GlobalOpts, cfg: &Config) -> Result<Self, CliError> {
        let output = match &global.output {
            Some(format) => format.clone(),
            None => parse_choice("defaults.output", &cfg.defaults.output)?,
        };
        let color_mode = match &global.color {
            Some(mode) => mode.clone(),
            None => parse_choice::<ColorMode>("defaults.color", &cfg.defaults.color)?,
        };

        Ok(Self {
            output,
            color: output::should_color(&color_mode),
            quiet: global.quiet,
            yes: global.yes,
            default_year: cfg.defaults.year,
        })
    }
}

fn parse_choice<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}

/// Data directory: --data-dir (or WAYFARER_DATA_DIR), else config, else platform default.
pub fn data_dir(global: &GlobalOpts, cfg: &Config) -> PathBuf {
    global.data_dir.clone().unwrap_or_else(|| cfg.data_dir())
}

/// Provider endpoints, credentials, and timeout for the core.
pub fn service_config(global: &GlobalOpts, cfg: &Config) -> Result<ServiceConfig, CliError> {
    Ok(wayfarer_config::to_service_config(cfg, global.timeout)?)
}
