//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use wayfarer_config::ConfigError;
use wayfarer_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Providers ────────────────────────────────────────────────────

    #[error("Could not reach {url}: {reason}")]
    #[diagnostic(
        code(wayfarer::connection_failed),
        help("Check your network connection, or the provider URLs in your config.")
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(wayfarer::timeout),
        help("Increase the timeout with --timeout or try again later.")
    )]
    Timeout,

    #[error("Provider error: {message}")]
    #[diagnostic(code(wayfarer::provider))]
    Provider { message: String },

    #[error("No API key configured for {provider}")]
    #[diagnostic(
        code(wayfarer::no_api_key),
        help(
            "Store one with: wayfarer config set-key\n\
             Or set the TICKETMASTER_API_KEY environment variable."
        )
    )]
    MissingApiKey { provider: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(wayfarer::not_found),
        help("Run: wayfarer {list_command} to see what is available")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(wayfarer::validation))]
    Validation { field: String, reason: String },

    // ── Storage ──────────────────────────────────────────────────────

    #[error("Could not save plans: {reason}")]
    #[diagnostic(
        code(wayfarer::persistence),
        help("Check that the data directory is writable, or pass --data-dir.")
    )]
    Persistence { reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(wayfarer::config),
        help("Check the file at `wayfarer config path` and any WAYFARER_* variables.")
    )]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(wayfarer::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render output: {0}")]
    #[diagnostic(code(wayfarer::render))]
    Render(String),

    #[error("Internal error: {0}")]
    #[diagnostic(code(wayfarer::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::MissingApiKey { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoCountrySelected => CliError::Validation {
                field: "country".into(),
                reason: "select a country first".into(),
            },

            CoreError::CountryNotFound { code } => CliError::NotFound {
                resource_type: "country".into(),
                identifier: code,
                list_command: "countries".into(),
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }

            CoreError::Timeout => CliError::Timeout,

            CoreError::Provider { message, status: _ } => CliError::Provider { message },

            CoreError::MissingApiKey { provider } => CliError::MissingApiKey { provider },

            CoreError::Persistence { key: _, reason } => CliError::Persistence { reason },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_country_maps_to_not_found() {
        let err = CliError::from(CoreError::CountryNotFound { code: "XX".into() });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(err.to_string(), "country 'XX' not found");
    }

    #[test]
    fn provider_failures_keep_their_exit_codes() {
        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
        let missing = CliError::from(CoreError::MissingApiKey {
            provider: "ticketmaster".into(),
        });
        assert_eq!(missing.exit_code(), exit_code::AUTH);
        let down = CliError::from(CoreError::Provider {
            message: "503".into(),
            status: Some(503),
        });
        assert_eq!(down.exit_code(), exit_code::GENERAL);
    }
}
