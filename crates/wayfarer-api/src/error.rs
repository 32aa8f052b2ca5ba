use thiserror::Error;

/// Top-level error type for the `wayfarer-api` crate.
///
/// Covers every failure mode across the provider clients: transport,
/// non-success HTTP status, malformed bodies, and in-band provider errors.
/// `wayfarer-core` treats all of them as "no data" for the owning view.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Building the underlying HTTP client failed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Provider responses ──────────────────────────────────────────
    /// The provider answered with a non-2xx status.
    #[error("{provider} returned HTTP {status} for {url}")]
    Status {
        provider: &'static str,
        status: u16,
        url: String,
    },

    /// The provider answered 2xx but reported a failure in the body.
    #[error("{provider} reported an error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    /// A provider that requires an API key was called without one.
    #[error("No API key configured for {provider}")]
    MissingApiKey { provider: &'static str },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying later.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Status { status: 404, .. } => true,
            _ => false,
        }
    }

    /// The HTTP status behind this error, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
