//! Command dispatch: bridges CLI args -> dashboard operations -> output formatting.

pub mod config_cmd;
pub mod countries;
pub mod explore;
pub mod plans;
pub mod util;

use wayfarer_core::Dashboard;

use crate::cli::Command;
use crate::config::Settings;
use crate::error::CliError;

/// Dispatch a provider-bound command to its handler.
pub async fn dispatch(
    cmd: Command,
    dashboard: &Dashboard,
    settings: &Settings,
) -> Result<(), CliError> {
    match cmd {
        Command::Countries(args) => countries::handle(dashboard, args, settings).await,
        Command::Explore(args) => explore::handle(dashboard, args, settings).await,
        // Handled before a dashboard is built
        Command::Plans(_) | Command::Config(_) | Command::Completions(_) => Err(
            CliError::Internal("command dispatched without a handler".into()),
        ),
    }
}
