// Ticketmaster Discovery client: events by city and country.
//
// Auth: `apikey` query parameter on every request.

use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;
use crate::transport::{Endpoint, TransportConfig};
use crate::types::{DiscoveryEvent, EventSearch};

pub const DEFAULT_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2/";

/// Page size used by the events view.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone)]
pub struct TicketmasterClient {
    endpoint: Endpoint,
    api_key: Option<SecretString>,
}

impl TicketmasterClient {
    pub fn new(
        base_url: &str,
        api_key: Option<SecretString>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        Self::from_reqwest(base_url, api_key, transport.build_client()?)
    }

    pub fn from_reqwest(
        base_url: &str,
        api_key: Option<SecretString>,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        Ok(Self {
            endpoint: Endpoint::new("ticketmaster", base_url, http)?,
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search events in `city` within `country_code`.
    ///
    /// A response without `_embedded` means no matches and yields an empty vec.
    pub async fn events(
        &self,
        city: &str,
        country_code: &str,
        size: u32,
    ) -> Result<Vec<DiscoveryEvent>, Error> {
        let key = self.api_key.as_ref().ok_or(Error::MissingApiKey {
            provider: "ticketmaster",
        })?;

        let params = [
            ("apikey", key.expose_secret().to_owned()),
            ("city", city.to_owned()),
            ("countryCode", country_code.to_owned()),
            ("size", size.to_string()),
        ];
        let search: EventSearch = self.endpoint.get_json("events.json", &params).await?;
        Ok(search.into_events())
    }
}
