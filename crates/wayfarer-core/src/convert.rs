// ── Provider-to-domain conversions ──
//
// Bridges raw `wayfarer_api::types` responses into display-ready
// `wayfarer_core::model` types. Conversions that need destination context
// (the country name a plan is filed under) take it as an argument.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use wayfarer_api::types::{
    AvailableCountry, CountryDetails, DiscoveryEvent, Forecast, LongWeekend, PublicHoliday,
    SunTimes,
};

use crate::model::{
    CountryFacts, CountryOption, CurrencyTag, CurrentWeather, DailySlot, EventCard, HolidayCard,
    HourlySlot, LongWeekendCard, Plan, SunSchedule, WeatherCategory, WeatherReport,
    calendar::day_strip,
    event::DATE_NOT_AVAILABLE,
    flag_url,
    weather::describe_weather_code,
};

/// Hourly slots shown in the forecast strip.
pub const HOURLY_WINDOW: usize = 23;

const HOURLY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

// ── Countries ──────────────────────────────────────────────────────

impl From<AvailableCountry> for CountryOption {
    fn from(c: AvailableCountry) -> Self {
        Self {
            flag_url: flag_url(&c.country_code, 40),
            code: c.country_code,
            name: c.name,
        }
    }
}

/// `+49`, `+1201,202`; `None` when the country has no dialling prefix.
fn calling_code(details: &CountryDetails) -> Option<String> {
    let idd = details.idd.as_ref()?;
    let root = idd.root.as_deref().unwrap_or_default();
    if root.is_empty() && idd.suffixes.is_empty() {
        return None;
    }
    Some(format!("{root}{}", idd.suffixes.join(",")))
}

impl From<CountryDetails> for CountryFacts {
    fn from(d: CountryDetails) -> Self {
        let calling_code = calling_code(&d);
        let capital_coordinates = d.capital_info.latitude().zip(d.capital_info.longitude());
        Self {
            flag_url: flag_url(&d.cca2, 160),
            code: d.cca2,
            common_name: d.name.common,
            official_name: d.name.official,
            region: d.region,
            subregion: d.subregion,
            capital: d.capital.into_iter().next(),
            capital_coordinates,
            population: d.population,
            area_km2: d.area,
            calling_code,
            driving_side: d.car.and_then(|c| c.side),
            week_starts_on: d.start_of_week,
            currencies: d
                .currencies
                .into_iter()
                .map(|(code, c)| CurrencyTag {
                    code,
                    name: c.name,
                    symbol: c.symbol,
                })
                .collect(),
            languages: d.languages.into_values().collect(),
            borders: d.borders,
            map_url: d.maps.google_maps,
            timezones: d.timezones,
        }
    }
}

// ── Holidays ───────────────────────────────────────────────────────

pub fn holiday_card(h: PublicHoliday, country: &str) -> HolidayCard {
    let plan = Plan::Holiday {
        name: h.name.clone(),
        local_name: h.local_name.clone(),
        date: h.date.to_string(),
        country: country.to_owned(),
    };
    HolidayCard {
        day: h.date.day(),
        month: h.date.format("%b").to_string(),
        weekday: h.date.format("%A").to_string(),
        date: h.date,
        local_name: h.local_name,
        name: h.name,
        types: h.types,
        plan,
    }
}

// ── Long weekends ──────────────────────────────────────────────────

pub fn long_weekend_card(ordinal: usize, w: LongWeekend, country: &str) -> LongWeekendCard {
    let plan = Plan::LongWeekend {
        name: None,
        start_date: w.start_date.to_string(),
        end_date: w.end_date.to_string(),
        day_count: w.day_count,
        need_bridge_day: w.need_bridge_day,
        country: country.to_owned(),
    };
    LongWeekendCard {
        ordinal,
        title: format!("Long Weekend #{ordinal}"),
        days: day_strip(w.start_date, w.end_date, &w.bridge_days),
        start_date: w.start_date,
        end_date: w.end_date,
        day_count: w.day_count,
        need_bridge_day: w.need_bridge_day,
        bridge_days: w.bridge_days,
        plan,
    }
}

// ── Events ─────────────────────────────────────────────────────────

pub fn event_card(e: DiscoveryEvent, country: &str) -> EventCard {
    let name = e
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Unnamed Event".into());
    let venue = e.embedded.and_then(|v| v.venues.into_iter().next());
    let (venue_name, city) = match venue {
        Some(v) => (v.name, v.city.and_then(|c| c.name)),
        None => (None, None),
    };
    let starts = e
        .dates
        .and_then(|d| d.start)
        .and_then(|s| s.date_time.or(s.local_date));
    let category = e
        .classifications
        .into_iter()
        .next()
        .and_then(|c| c.segment)
        .and_then(|s| s.name)
        .unwrap_or_else(|| "General".into());

    let plan = Plan::Event {
        name: name.clone(),
        date: starts.clone().unwrap_or_else(|| DATE_NOT_AVAILABLE.into()),
        city: city.clone().unwrap_or_default(),
        country: country.to_owned(),
    };

    EventCard {
        id: e.id,
        name,
        image_url: e.images.into_iter().next().map(|i| i.url),
        venue: venue_name,
        city,
        starts,
        category,
        url: e.url,
        plan,
    }
}

// ── Weather ────────────────────────────────────────────────────────

fn hour_label(time: NaiveDateTime) -> String {
    time.format("%-I %p").to_string()
}

/// Assemble the weather panel from a forecast.
///
/// `local_now` is wall-clock time at the destination; the hourly strip
/// starts at the first slot not earlier than it (or the first slot when
/// every slot is in the past). `None` when current conditions are missing.
pub fn weather_report(
    f: Forecast,
    country: &str,
    city: &str,
    local_now: NaiveDateTime,
) -> Option<WeatherReport> {
    let current = f.current?;

    let times: Vec<Option<NaiveDateTime>> = f
        .hourly
        .time
        .iter()
        .map(|t| NaiveDateTime::parse_from_str(t, HOURLY_TIME_FORMAT).ok())
        .collect();
    let start = times
        .iter()
        .position(|t| t.is_some_and(|t| t >= local_now))
        .unwrap_or(0);

    let hourly = times
        .iter()
        .enumerate()
        .skip(start)
        .filter_map(|(i, t)| {
            let time = (*t)?;
            let temperature = *f.hourly.temperature_2m.get(i)?;
            let code = f.hourly.weather_code.get(i).copied().unwrap_or_default();
            Some((time, temperature, code))
        })
        .take(HOURLY_WINDOW)
        .enumerate()
        .map(|(n, (time, temperature, code))| HourlySlot {
            time,
            label: if n == 0 { "Now".into() } else { hour_label(time) },
            temperature,
            code,
            category: WeatherCategory::from_code(code),
        })
        .collect();

    let daily: Vec<DailySlot> = f
        .daily
        .time
        .iter()
        .enumerate()
        .filter_map(|(i, date)| {
            let high = *f.daily.temperature_2m_max.get(i)?;
            let low = *f.daily.temperature_2m_min.get(i)?;
            let code = f.daily.weather_code.get(i).copied().unwrap_or_default();
            Some(DailySlot {
                date: *date,
                label: if i == 0 {
                    "Today".into()
                } else {
                    date.format("%a").to_string()
                },
                high,
                low,
                code,
                category: WeatherCategory::from_code(code),
            })
        })
        .collect();

    Some(WeatherReport {
        country: country.to_owned(),
        city: city.to_owned(),
        timezone: f.timezone,
        current: CurrentWeather {
            temperature: current.temperature_2m,
            feels_like: current.apparent_temperature,
            code: current.weather_code,
            condition: describe_weather_code(current.weather_code).to_owned(),
            category: WeatherCategory::from_code(current.weather_code),
            humidity: current.relative_humidity_2m,
            wind_speed: current.wind_speed_10m,
            uv_index: current.uv_index,
        },
        today_high: daily.first().map(|d| d.high),
        today_low: daily.first().map(|d| d.low),
        hourly,
        daily,
    })
}

// ── Sun times ──────────────────────────────────────────────────────

pub fn sun_schedule(s: SunTimes, date: NaiveDate, country: &str, city: &str) -> SunSchedule {
    let (daylight, daylight_percent, darkness) = SunSchedule::split_day(s.day_length);
    SunSchedule {
        country: country.to_owned(),
        city: city.to_owned(),
        date,
        dawn: s.civil_twilight_begin,
        sunrise: s.sunrise,
        solar_noon: s.solar_noon,
        sunset: s.sunset,
        dusk: s.civil_twilight_end,
        daylight,
        daylight_percent,
        darkness,
    }
}
