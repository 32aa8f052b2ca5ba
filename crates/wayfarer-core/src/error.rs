// ── Core error types ──
//
// User-facing errors from wayfarer-core. Consumers never see reqwest
// errors or JSON parse failures directly: the `From<wayfarer_api::Error>`
// impl translates transport-layer errors into provider-level variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation ───────────────────────────────────────────────────
    #[error("No country selected")]
    NoCountrySelected,

    #[error("Unknown country code: {code}")]
    CountryNotFound { code: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Provider errors (wrapped, not exposed raw) ───────────────────
    #[error("Cannot reach {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Provider request timed out")]
    Timeout,

    #[error("Provider error: {message}")]
    Provider {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("No API key configured for {provider}")]
    MissingApiKey { provider: String },

    // ── Persistence ──────────────────────────────────────────────────
    #[error("Failed to persist '{key}': {reason}")]
    Persistence { key: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether the error came from a data provider (network, status, body).
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. }
                | Self::Timeout
                | Self::Provider { .. }
                | Self::MissingApiKey { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<wayfarer_api::Error> for CoreError {
    fn from(err: wayfarer_api::Error) -> Self {
        match err {
            wayfarer_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e.url().map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Provider {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            wayfarer_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            wayfarer_api::Error::ClientBuild(message) => CoreError::Config { message },
            wayfarer_api::Error::Status {
                provider,
                status,
                url,
            } => CoreError::Provider {
                message: format!("{provider} returned HTTP {status} for {url}"),
                status: Some(status),
            },
            wayfarer_api::Error::Provider { provider, message } => CoreError::Provider {
                message: format!("{provider}: {message}"),
                status: None,
            },
            wayfarer_api::Error::MissingApiKey { provider } => CoreError::MissingApiKey {
                provider: provider.into(),
            },
            wayfarer_api::Error::Deserialization { message, body: _ } => CoreError::Provider {
                message: format!("Malformed response: {message}"),
                status: None,
            },
        }
    }
}
