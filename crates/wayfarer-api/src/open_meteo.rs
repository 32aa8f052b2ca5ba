// Open-Meteo client: current conditions plus hourly and daily forecast.

use crate::error::Error;
use crate::transport::{Endpoint, TransportConfig};
use crate::types::Forecast;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
weather_code,wind_speed_10m,uv_index";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    endpoint: Endpoint,
}

impl OpenMeteoClient {
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        Self::from_reqwest(base_url, transport.build_client()?)
    }

    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            endpoint: Endpoint::new("open-meteo", base_url, http)?,
        })
    }

    /// Forecast for a coordinate, in the location's own timezone.
    pub async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast, Error> {
        let params = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", CURRENT_FIELDS.to_owned()),
            ("hourly", HOURLY_FIELDS.to_owned()),
            ("daily", DAILY_FIELDS.to_owned()),
            ("timezone", "auto".to_owned()),
        ];
        self.endpoint.get_json("forecast", &params).await
    }
}
