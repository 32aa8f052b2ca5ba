// sunrise-sunset.org client.

use chrono::NaiveDate;

use crate::error::Error;
use crate::transport::{Endpoint, TransportConfig};
use crate::types::{SunEnvelope, SunTimes};

pub const DEFAULT_BASE_URL: &str = "https://api.sunrise-sunset.org/";

#[derive(Debug, Clone)]
pub struct SunriseSunsetClient {
    endpoint: Endpoint,
}

impl SunriseSunsetClient {
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        Self::from_reqwest(base_url, transport.build_client()?)
    }

    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            endpoint: Endpoint::new("sunrise-sunset", base_url, http)?,
        })
    }

    /// Sun times for a coordinate on `date`, with unformatted (RFC 3339) output.
    ///
    /// The provider answers 200 with `status != "OK"` for bad input; that is
    /// surfaced as [`Error::Provider`].
    pub async fn sun_times(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Result<SunTimes, Error> {
        let params = [
            ("lat", latitude.to_string()),
            ("lng", longitude.to_string()),
            ("date", date.format("%Y-%m-%d").to_string()),
            ("formatted", "0".to_owned()),
        ];
        let envelope: SunEnvelope = self.endpoint.get_json("json", &params).await?;

        if envelope.status != "OK" {
            return Err(Error::Provider {
                provider: "sunrise-sunset",
                message: format!("status {}", envelope.status),
            });
        }

        serde_json::from_value(envelope.results).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: String::new(),
        })
    }
}
