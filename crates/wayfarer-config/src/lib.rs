//! Shared configuration for wayfarer.
//!
//! TOML config file + `WAYFARER_` environment overrides (figment),
//! platform paths (directories), Ticketmaster key resolution
//! (env + keyring + plaintext), and translation to
//! `wayfarer_core::ServiceConfig`. The CLI layers its flags on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use wayfarer_core::{DEFAULT_YEAR, ProviderEndpoints, ServiceConfig};

/// Keyring service name.
pub const KEYRING_SERVICE: &str = "wayfarer";
/// Keyring user for the Ticketmaster key.
pub const KEYRING_TICKETMASTER: &str = "ticketmaster";
/// Env var consulted when the config names none.
pub const DEFAULT_TICKETMASTER_KEY_ENV: &str = "TICKETMASTER_API_KEY";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Provider endpoints and credentials.
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Where saved plans live. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Year explored when none is given.
    #[serde(default = "default_year")]
    pub year: i32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            year: default_year(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_year() -> i32 {
    DEFAULT_YEAR
}

/// Base URL overrides and the Ticketmaster credential.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProvidersConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nager_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restcountries_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticketmaster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_meteo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunrise_sunset_url: Option<String>,

    /// Ticketmaster key (plaintext -- prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticketmaster_api_key: Option<String>,

    /// Environment variable holding the Ticketmaster key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticketmaster_api_key_env: Option<String>,
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "wayfarer", "wayfarer")
}

fn home_fallback(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.extend(parts);
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".config", "wayfarer", "config.toml"]),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Platform data directory for saved plans.
pub fn default_data_dir() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".local", "share", "wayfarer"]),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

impl Config {
    /// Configured data directory, or the platform default.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

// ── Loading and saving ──────────────────────────────────────────────

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("WAYFARER_").split("__"))
}

/// Load the full Config from file + environment.
///
/// Environment keys nest with a double underscore, e.g.
/// `WAYFARER_DEFAULTS__YEAR=2027` or `WAYFARER_DATA_DIR=/srv/plans`.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    Ok(figment_for(path).extract()?)
}

/// Load config, returning a default if it cannot be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Where a resolved key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Env,
    Keyring,
    ConfigFile,
}

/// Resolve the Ticketmaster key: env var, then keyring, then plaintext.
///
/// `None` is not an error; the events view reports it when loaded.
pub fn resolve_ticketmaster_key(providers: &ProvidersConfig) -> Option<(SecretString, KeySource)> {
    // 1. Env var (configured name, else the conventional one)
    let env_name = providers
        .ticketmaster_api_key_env
        .as_deref()
        .unwrap_or(DEFAULT_TICKETMASTER_KEY_ENV);
    if let Ok(val) = std::env::var(env_name) {
        if !val.is_empty() {
            return Some((SecretString::from(val), KeySource::Env));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_TICKETMASTER) {
        if let Ok(secret) = entry.get_password() {
            return Some((SecretString::from(secret), KeySource::Keyring));
        }
    }

    // 3. Plaintext in config
    providers
        .ticketmaster_api_key
        .as_ref()
        .filter(|k| !k.is_empty())
        .map(|k| (SecretString::from(k.clone()), KeySource::ConfigFile))
}

/// Store the Ticketmaster key in the system keyring.
pub fn store_ticketmaster_key(key: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, KEYRING_TICKETMASTER)?.set_password(key)?;
    Ok(())
}

// ── Translation to core ─────────────────────────────────────────────

fn endpoint(field: &str, value: Option<&String>, default: String) -> Result<String, ConfigError> {
    let Some(raw) = value else {
        return Ok(default);
    };
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(url.into())
}

/// Build the core `ServiceConfig`. `timeout_override` wins over the file.
pub fn to_service_config(
    cfg: &Config,
    timeout_override: Option<u64>,
) -> Result<ServiceConfig, ConfigError> {
    let defaults = ProviderEndpoints::default();
    let p = &cfg.providers;
    let endpoints = ProviderEndpoints {
        nager: endpoint("providers.nager_url", p.nager_url.as_ref(), defaults.nager)?,
        restcountries: endpoint(
            "providers.restcountries_url",
            p.restcountries_url.as_ref(),
            defaults.restcountries,
        )?,
        ticketmaster: endpoint(
            "providers.ticketmaster_url",
            p.ticketmaster_url.as_ref(),
            defaults.ticketmaster,
        )?,
        open_meteo: endpoint(
            "providers.open_meteo_url",
            p.open_meteo_url.as_ref(),
            defaults.open_meteo,
        )?,
        sunrise_sunset: endpoint(
            "providers.sunrise_sunset_url",
            p.sunrise_sunset_url.as_ref(),
            defaults.sunrise_sunset,
        )?,
    };

    let timeout = timeout_override.unwrap_or(cfg.defaults.timeout);
    if timeout == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least one second".into(),
        });
    }

    Ok(ServiceConfig {
        endpoints,
        ticketmaster_api_key: resolve_ticketmaster_key(p).map(|(key, _)| key),
        timeout: Duration::from_secs(timeout),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults_apply_without_a_file() {
        Jail::expect_with(|jail| {
            let cfg = load_config_from(&jail.directory().join("missing.toml")).unwrap();
            assert_eq!(cfg.defaults.output, "table");
            assert_eq!(cfg.defaults.year, DEFAULT_YEAR);
            assert_eq!(cfg.defaults.timeout, 30);
            assert!(cfg.data_dir.is_none());
            Ok(())
        });
    }

    #[test]
    fn file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                data_dir = "/srv/plans"

                [defaults]
                output = "json"
                year = 2027

                [providers]
                nager_url = "http://localhost:9000/nager/"
                "#,
            )?;
            jail.set_env("WAYFARER_DEFAULTS__YEAR", "2028");

            let cfg = load_config_from(&jail.directory().join("config.toml")).unwrap();
            assert_eq!(cfg.defaults.output, "json");
            assert_eq!(cfg.defaults.year, 2028);
            assert_eq!(cfg.data_dir(), PathBuf::from("/srv/plans"));
            assert_eq!(
                cfg.providers.nager_url.as_deref(),
                Some("http://localhost:9000/nager/")
            );
            Ok(())
        });
    }

    #[test]
    fn save_then_load_round_trips() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("nested").join("config.toml");
            let mut cfg = Config::default();
            cfg.defaults.color = "never".into();
            cfg.providers.ticketmaster_api_key_env = Some("MY_TM_KEY".into());
            save_config_to(&cfg, &path).unwrap();

            let loaded = load_config_from(&path).unwrap();
            assert_eq!(loaded.defaults.color, "never");
            assert_eq!(
                loaded.providers.ticketmaster_api_key_env.as_deref(),
                Some("MY_TM_KEY")
            );
            Ok(())
        });
    }

    #[test]
    fn env_key_wins_over_plaintext() {
        Jail::expect_with(|jail| {
            jail.set_env("WAYFARER_TEST_TM_KEY", "from-env");
            let providers = ProvidersConfig {
                ticketmaster_api_key: Some("from-file".into()),
                ticketmaster_api_key_env: Some("WAYFARER_TEST_TM_KEY".into()),
                ..ProvidersConfig::default()
            };

            let (key, source) = resolve_ticketmaster_key(&providers).unwrap();
            assert_eq!(key.expose_secret(), "from-env");
            assert_eq!(source, KeySource::Env);
            Ok(())
        });
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let cfg = Config {
            providers: ProvidersConfig {
                open_meteo_url: Some("ftp://example.com/".into()),
                ..ProvidersConfig::default()
            },
            ..Config::default()
        };
        let err = to_service_config(&cfg, None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "providers.open_meteo_url"));
    }

    #[test]
    fn timeout_override_and_default_endpoints() {
        let cfg = Config::default();
        let service = to_service_config(&cfg, Some(5)).unwrap();
        assert_eq!(service.timeout, Duration::from_secs(5));
        assert_eq!(service.endpoints, ProviderEndpoints::default());

        assert!(to_service_config(&cfg, Some(0)).is_err());
    }
}
