// ── Country facts and local time ──

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Serialize;

/// Flag image URL for an ISO 3166-1 alpha-2 code.
pub fn flag_url(country_code: &str, width: u32) -> String {
    format!(
        "https://flagcdn.com/w{width}/{}.png",
        country_code.to_ascii_lowercase()
    )
}

/// Entry in the country picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryOption {
    pub code: String,
    pub name: String,
    pub flag_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyTag {
    pub code: String,
    pub name: String,
    pub symbol: String,
}

/// Everything the overview panel shows about a country.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryFacts {
    pub code: String,
    pub common_name: String,
    pub official_name: String,
    pub flag_url: String,
    pub region: String,
    pub subregion: Option<String>,
    pub capital: Option<String>,
    pub capital_coordinates: Option<(f64, f64)>,
    pub population: u64,
    pub area_km2: f64,
    /// e.g. `+49`, or `+1201,202` for multi-suffix plans.
    pub calling_code: Option<String>,
    pub driving_side: Option<String>,
    pub week_starts_on: Option<String>,
    pub currencies: Vec<CurrencyTag>,
    pub languages: Vec<String>,
    pub borders: Vec<String>,
    pub map_url: Option<String>,
    pub timezones: Vec<String>,
}

impl CountryFacts {
    /// The zone the clock follows: the first listed one.
    pub fn primary_timezone(&self) -> Option<&str> {
        self.timezones.first().map(String::as_str)
    }
}

/// Parse a provider timezone label such as `UTC+05:30`, `UTC-03`, or `UTC`.
///
/// Anything unparseable falls back to UTC.
pub fn parse_utc_offset(label: &str) -> FixedOffset {
    let utc = Utc.fix();
    let Some(rest) = label.trim().strip_prefix("UTC") else {
        return utc;
    };
    let (sign, digits) = match rest.chars().next() {
        Some('+') => (1, &rest[1..]),
        Some('-') => (-1, &rest[1..]),
        _ => return utc,
    };

    let (hours, minutes) = digits.split_once(':').unwrap_or((digits, "0"));
    let (Ok(hours), Ok(minutes)) = (hours.parse::<i32>(), minutes.parse::<i32>()) else {
        return utc;
    };
    hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|secs| secs.checked_mul(sign))
        .and_then(FixedOffset::east_opt)
        .unwrap_or(utc)
}

/// Wall-clock time in the destination's primary timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalClock {
    pub timezone: String,
    pub now: DateTime<FixedOffset>,
}

impl LocalClock {
    pub fn at(timezone: &str, instant: DateTime<Utc>) -> Self {
        Self {
            timezone: timezone.to_owned(),
            now: instant.with_timezone(&parse_utc_offset(timezone)),
        }
    }

    pub fn now(timezone: &str) -> Self {
        Self::at(timezone, Utc::now())
    }

    /// `HH:MM:SS`
    pub fn time_label(&self) -> String {
        self.now.format("%H:%M:%S").to_string()
    }

    /// e.g. `Saturday, March 14`
    pub fn date_label(&self) -> String {
        self.now.format("%A, %B %-d").to_string()
    }
}
