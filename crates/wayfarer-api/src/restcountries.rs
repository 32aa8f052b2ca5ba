// REST Countries client: country facts and capital coordinates.

use crate::error::Error;
use crate::transport::{Endpoint, TransportConfig};
use crate::types::CountryDetails;

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1/";

#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    endpoint: Endpoint,
}

impl RestCountriesClient {
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        Self::from_reqwest(base_url, transport.build_client()?)
    }

    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            endpoint: Endpoint::new("restcountries", base_url, http)?,
        })
    }

    /// Look up one country by ISO code.
    ///
    /// `alpha/{code}` answers with an array; an empty array is reported as
    /// a provider error rather than a panic on indexing.
    pub async fn country(&self, country_code: &str) -> Result<CountryDetails, Error> {
        let mut found: Vec<CountryDetails> = self
            .endpoint
            .get_json(&format!("alpha/{country_code}"), &[])
            .await?;

        if found.is_empty() {
            return Err(Error::Provider {
                provider: "restcountries",
                message: format!("no country with code {country_code}"),
            });
        }
        Ok(found.swap_remove(0))
    }
}
