// ── Data provider seams ──
//
// One small async trait per data domain. The view updaters depend on
// these, not on concrete HTTP clients, so tests can substitute fakes.
// Implementations for the `wayfarer-api` clients live at the bottom.

use async_trait::async_trait;
use chrono::NaiveDate;

use wayfarer_api::types::{
    AvailableCountry, CountryDetails, DiscoveryEvent, Forecast, LongWeekend, PublicHoliday,
    SunTimes,
};
use wayfarer_api::{
    NagerClient, OpenMeteoClient, RestCountriesClient, SunriseSunsetClient, TicketmasterClient,
    ticketmaster,
};

use crate::error::CoreError;

#[async_trait]
pub trait CountryDirectory: Send + Sync {
    async fn available_countries(&self) -> Result<Vec<AvailableCountry>, CoreError>;
}

#[async_trait]
pub trait CountryProvider: Send + Sync {
    async fn country(&self, country_code: &str) -> Result<CountryDetails, CoreError>;
}

#[async_trait]
pub trait HolidayProvider: Send + Sync {
    async fn public_holidays(
        &self,
        year: i32,
        country_code: &str,
    ) -> Result<Vec<PublicHoliday>, CoreError>;
}

#[async_trait]
pub trait LongWeekendProvider: Send + Sync {
    async fn long_weekends(
        &self,
        year: i32,
        country_code: &str,
    ) -> Result<Vec<LongWeekend>, CoreError>;
}

#[async_trait]
pub trait EventProvider: Send + Sync {
    async fn events(&self, city: &str, country_code: &str)
    -> Result<Vec<DiscoveryEvent>, CoreError>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast, CoreError>;
}

#[async_trait]
pub trait SunTimesProvider: Send + Sync {
    async fn sun_times(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Result<SunTimes, CoreError>;
}

// ── wayfarer-api implementations ───────────────────────────────────

#[async_trait]
impl CountryDirectory for NagerClient {
    async fn available_countries(&self) -> Result<Vec<AvailableCountry>, CoreError> {
        Ok(NagerClient::available_countries(self).await?)
    }
}

#[async_trait]
impl HolidayProvider for NagerClient {
    async fn public_holidays(
        &self,
        year: i32,
        country_code: &str,
    ) -> Result<Vec<PublicHoliday>, CoreError> {
        Ok(NagerClient::public_holidays(self, year, country_code).await?)
    }
}

#[async_trait]
impl LongWeekendProvider for NagerClient {
    async fn long_weekends(
        &self,
        year: i32,
        country_code: &str,
    ) -> Result<Vec<LongWeekend>, CoreError> {
        Ok(NagerClient::long_weekends(self, year, country_code).await?)
    }
}

#[async_trait]
impl CountryProvider for RestCountriesClient {
    async fn country(&self, country_code: &str) -> Result<CountryDetails, CoreError> {
        Ok(RestCountriesClient::country(self, country_code).await?)
    }
}

#[async_trait]
impl EventProvider for TicketmasterClient {
    async fn events(
        &self,
        city: &str,
        country_code: &str,
    ) -> Result<Vec<DiscoveryEvent>, CoreError> {
        Ok(TicketmasterClient::events(self, city, country_code, ticketmaster::DEFAULT_PAGE_SIZE).await?)
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast, CoreError> {
        Ok(OpenMeteoClient::forecast(self, latitude, longitude).await?)
    }
}

#[async_trait]
impl SunTimesProvider for SunriseSunsetClient {
    async fn sun_times(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Result<SunTimes, CoreError> {
        Ok(SunriseSunsetClient::sun_times(self, latitude, longitude, date).await?)
    }
}
