// ── Runtime provider configuration ──
//
// These types describe *where* the data providers live and which secrets
// they need. They never touch disk: the CLI builds a `ServiceConfig` from
// `wayfarer-config` and hands it in.

use std::time::Duration;

use secrecy::SecretString;

use wayfarer_api::{nager, open_meteo, restcountries, sunrise_sunset, ticketmaster};

/// Base URLs for every provider. Overridable for tests and mirrors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub nager: String,
    pub restcountries: String,
    pub ticketmaster: String,
    pub open_meteo: String,
    pub sunrise_sunset: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            nager: nager::DEFAULT_BASE_URL.into(),
            restcountries: restcountries::DEFAULT_BASE_URL.into(),
            ticketmaster: ticketmaster::DEFAULT_BASE_URL.into(),
            open_meteo: open_meteo::DEFAULT_BASE_URL.into(),
            sunrise_sunset: sunrise_sunset::DEFAULT_BASE_URL.into(),
        }
    }
}

impl ProviderEndpoints {
    /// Point every provider at one host, each under its own path prefix.
    ///
    /// `{root}/nager/`, `{root}/restcountries/`, ... -- handy for a single
    /// mock server in tests.
    pub fn rooted_at(root: &str) -> Self {
        let root = root.trim_end_matches('/');
        Self {
            nager: format!("{root}/nager/"),
            restcountries: format!("{root}/restcountries/"),
            ticketmaster: format!("{root}/ticketmaster/"),
            open_meteo: format!("{root}/open-meteo/"),
            sunrise_sunset: format!("{root}/sunrise-sunset/"),
        }
    }
}

/// Everything the dashboard needs to reach its providers.
///
/// Built by the CLI, passed to `Dashboard` -- core never reads config files.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub endpoints: ProviderEndpoints,
    /// Ticketmaster Discovery key. Without it the events view reports a failure.
    pub ticketmaster_api_key: Option<SecretString>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoints: ProviderEndpoints::default(),
            ticketmaster_api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}
