// Provider response types
//
// Wire models for the six public providers. Only the fields the dashboard
// consumes are modelled; `#[serde(default)]` is used liberally because the
// providers omit fields freely (a country without borders, an event without
// images, a forecast without UV index).

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ── Nager.Date ───────────────────────────────────────────────────────

/// Entry from `AvailableCountries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableCountry {
    pub country_code: String,
    pub name: String,
}

/// Entry from `PublicHolidays/{year}/{countryCode}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicHoliday {
    pub date: NaiveDate,
    pub local_name: String,
    pub name: String,
    pub country_code: String,
    #[serde(default)]
    pub global: bool,
    #[serde(default)]
    pub counties: Option<Vec<String>>,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Entry from `LongWeekend/{year}/{countryCode}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongWeekend {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub day_count: u32,
    #[serde(default)]
    pub need_bridge_day: bool,
    #[serde(default)]
    pub bridge_days: Vec<NaiveDate>,
}

// ── REST Countries ───────────────────────────────────────────────────

/// Country record from `alpha/{code}` (the endpoint returns a one-element array).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDetails {
    pub name: CountryName,
    #[serde(default)]
    pub cca2: String,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub capital_info: CapitalInfo,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub idd: Option<Idd>,
    #[serde(default)]
    pub car: Option<Car>,
    #[serde(default)]
    pub start_of_week: Option<String>,
    #[serde(default)]
    pub currencies: BTreeMap<String, Currency>,
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
    #[serde(default)]
    pub borders: Vec<String>,
    #[serde(default)]
    pub maps: Maps,
    #[serde(default)]
    pub timezones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapitalInfo {
    /// `[latitude, longitude]` of the capital, when known.
    #[serde(default)]
    pub latlng: Vec<f64>,
}

impl CapitalInfo {
    pub fn latitude(&self) -> Option<f64> {
        self.latlng.first().copied()
    }

    pub fn longitude(&self) -> Option<f64> {
        self.latlng.get(1).copied()
    }
}

/// International dialling prefix: `root` + each of `suffixes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idd {
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub suffixes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    #[serde(default)]
    pub side: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maps {
    #[serde(default)]
    pub google_maps: Option<String>,
}

// ── Ticketmaster Discovery ───────────────────────────────────────────

/// Response of `events.json`. `_embedded` is absent when nothing matched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventSearch {
    #[serde(default, rename = "_embedded")]
    pub embedded: Option<EmbeddedEvents>,
}

impl EventSearch {
    pub fn into_events(self) -> Vec<DiscoveryEvent> {
        self.embedded.map(|e| e.events).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbeddedEvents {
    #[serde(default)]
    pub events: Vec<DiscoveryEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub images: Vec<EventImage>,
    #[serde(default)]
    pub dates: Option<EventDates>,
    #[serde(default)]
    pub classifications: Vec<Classification>,
    #[serde(default, rename = "_embedded")]
    pub embedded: Option<EventVenues>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventImage {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDates {
    #[serde(default)]
    pub start: Option<EventStart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStart {
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub local_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(default)]
    pub segment: Option<NamedRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventVenues {
    #[serde(default)]
    pub venues: Vec<Venue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<NamedRef>,
}

// ── Open-Meteo ───────────────────────────────────────────────────────

/// Response of `forecast`. Hourly and daily blocks are column-oriented:
/// index `i` of every vector describes the same slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub utc_offset_seconds: i32,
    #[serde(default)]
    pub current: Option<CurrentConditions>,
    #[serde(default)]
    pub hourly: HourlySeries,
    #[serde(default)]
    pub daily: DailySeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub time: Option<String>,
    pub temperature_2m: f64,
    #[serde(default)]
    pub relative_humidity_2m: Option<f64>,
    #[serde(default)]
    pub apparent_temperature: Option<f64>,
    #[serde(default)]
    pub weather_code: u8,
    #[serde(default)]
    pub wind_speed_10m: Option<f64>,
    #[serde(default)]
    pub uv_index: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    /// Local wall-clock times, `YYYY-MM-DDTHH:MM`.
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<f64>,
    #[serde(default)]
    pub weather_code: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    #[serde(default)]
    pub time: Vec<NaiveDate>,
    #[serde(default)]
    pub weather_code: Vec<u8>,
    #[serde(default)]
    pub temperature_2m_max: Vec<f64>,
    #[serde(default)]
    pub temperature_2m_min: Vec<f64>,
}

// ── Sunrise-Sunset ───────────────────────────────────────────────────

/// Envelope of the `json` endpoint. `status` is `"OK"` on success; on
/// failure `results` is an empty string, so it is kept untyped until the
/// status has been checked.
#[derive(Debug, Clone, Deserialize)]
pub struct SunEnvelope {
    #[serde(default)]
    pub results: serde_json::Value,
    pub status: String,
}

/// Results block with `formatted=0`: RFC 3339 instants and day length in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub solar_noon: DateTime<Utc>,
    pub day_length: u32,
    pub civil_twilight_begin: DateTime<Utc>,
    pub civil_twilight_end: DateTime<Utc>,
}
