// Nager.Date client: country list, public holidays, long weekends.

use crate::error::Error;
use crate::transport::{Endpoint, TransportConfig};
use crate::types::{AvailableCountry, LongWeekend, PublicHoliday};

pub const DEFAULT_BASE_URL: &str = "https://date.nager.at/api/v3/";

/// Async client for the Nager.Date public holiday API.
#[derive(Debug, Clone)]
pub struct NagerClient {
    endpoint: Endpoint,
}

impl NagerClient {
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        Self::from_reqwest(base_url, transport.build_client()?)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            endpoint: Endpoint::new("nager.date", base_url, http)?,
        })
    }

    /// Every country the holiday API knows about, in provider order.
    pub async fn available_countries(&self) -> Result<Vec<AvailableCountry>, Error> {
        self.endpoint.get_json("AvailableCountries", &[]).await
    }

    pub async fn public_holidays(
        &self,
        year: i32,
        country_code: &str,
    ) -> Result<Vec<PublicHoliday>, Error> {
        self.endpoint
            .get_json(&format!("PublicHolidays/{year}/{country_code}"), &[])
            .await
    }

    pub async fn long_weekends(
        &self,
        year: i32,
        country_code: &str,
    ) -> Result<Vec<LongWeekend>, Error> {
        self.endpoint
            .get_json(&format!("LongWeekend/{year}/{country_code}"), &[])
            .await
    }
}
