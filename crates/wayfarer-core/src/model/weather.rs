// ── Weather ──
//
// WMO weather interpretation codes as reported by Open-Meteo.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use strum::Display;

/// Coarse grouping used to theme the current-conditions panel.
///
/// Codes outside the listed groups (snow grains, freezing rain) map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WeatherCategory {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Thunder,
    Other,
}

impl WeatherCategory {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 | 1 => Self::Sunny,
            2 | 3 | 45..=48 => Self::Cloudy,
            51..=65 | 80..=82 => Self::Rainy,
            71..=75 => Self::Snowy,
            95.. => Self::Thunder,
            _ => Self::Other,
        }
    }
}

/// Human description of a WMO code.
pub fn describe_weather_code(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 | 57 => "Freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 | 67 => "Freezing rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub temperature: f64,
    pub feels_like: Option<f64>,
    pub code: u8,
    pub condition: String,
    pub category: WeatherCategory,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub uv_index: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlySlot {
    pub time: NaiveDateTime,
    /// `Now` for the first slot, otherwise e.g. `3 PM`.
    pub label: String,
    pub temperature: f64,
    pub code: u8,
    pub category: WeatherCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySlot {
    pub date: NaiveDate,
    /// `Today` for the first day, otherwise e.g. `Mon`.
    pub label: String,
    pub high: f64,
    pub low: f64,
    pub code: u8,
    pub category: WeatherCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub country: String,
    pub city: String,
    pub timezone: Option<String>,
    pub current: CurrentWeather,
    pub today_high: Option<f64>,
    pub today_low: Option<f64>,
    pub hourly: Vec<HourlySlot>,
    pub daily: Vec<DailySlot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_wmo_groups() {
        assert_eq!(WeatherCategory::from_code(0), WeatherCategory::Sunny);
        assert_eq!(WeatherCategory::from_code(3), WeatherCategory::Cloudy);
        assert_eq!(WeatherCategory::from_code(45), WeatherCategory::Cloudy);
        assert_eq!(WeatherCategory::from_code(63), WeatherCategory::Rainy);
        assert_eq!(WeatherCategory::from_code(81), WeatherCategory::Rainy);
        assert_eq!(WeatherCategory::from_code(75), WeatherCategory::Snowy);
        assert_eq!(WeatherCategory::from_code(96), WeatherCategory::Thunder);
        assert_eq!(WeatherCategory::from_code(77), WeatherCategory::Other);
    }

    #[test]
    fn unknown_codes_describe_as_unknown() {
        assert_eq!(describe_weather_code(2), "Partly cloudy");
        assert_eq!(describe_weather_code(42), "Unknown");
    }
}
