// Shared transport configuration and JSON request plumbing.
//
// Every provider client is a thin wrapper around one `reqwest::Client`
// plus a base URL. Client construction, URL joining, and response
// handling live here so the provider modules only describe endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;

const USER_AGENT: &str = concat!("wayfarer/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: USER_AGENT.into(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }
}

/// A provider endpoint: HTTP client + base URL + a provider label for errors.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    http: reqwest::Client,
    base_url: Url,
    provider: &'static str,
}

impl Endpoint {
    /// Parse `base_url`, forcing a trailing slash so relative joins append
    /// instead of replacing the last path segment.
    pub(crate) fn new(
        provider: &'static str,
        base_url: &str,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        let mut url = Url::parse(base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self {
            http,
            base_url: url,
            provider,
        })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `{base}{path}` with query params and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.base_url.join(path)?;
        debug!(provider = self.provider, "GET {url}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                provider: self.provider,
                status: status.as_u16(),
                url: resp.url().to_string(),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let ep = Endpoint::new("test", "https://date.nager.at/api/v3", reqwest::Client::new())
            .unwrap();
        assert_eq!(ep.base_url().as_str(), "https://date.nager.at/api/v3/");
        assert_eq!(
            ep.base_url().join("AvailableCountries").unwrap().as_str(),
            "https://date.nager.at/api/v3/AvailableCountries"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = Endpoint::new("test", "not a url", reqwest::Client::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
