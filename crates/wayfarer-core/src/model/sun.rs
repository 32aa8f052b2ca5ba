// ── Sun times ──

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A whole-minute span, rendered as `Hh Mm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub hours: u32,
    pub minutes: u32,
}

impl Span {
    pub fn from_minutes(total: u32) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    pub fn total_minutes(self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SunSchedule {
    pub country: String,
    pub city: String,
    pub date: NaiveDate,
    pub dawn: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub solar_noon: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub dusk: DateTime<Utc>,
    pub daylight: Span,
    /// Share of the day in daylight, 0-100.
    pub daylight_percent: f64,
    pub darkness: Span,
}

impl SunSchedule {
    /// Daylight and darkness split of a day from the daylight length in seconds.
    pub fn split_day(day_length_secs: u32) -> (Span, f64, Span) {
        let daylight = (day_length_secs / 60).min(MINUTES_PER_DAY);
        let percent = f64::from(daylight) / f64::from(MINUTES_PER_DAY) * 100.0;
        (
            Span::from_minutes(daylight),
            percent,
            Span::from_minutes(MINUTES_PER_DAY - daylight),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_day_into_light_and_dark() {
        // 12h 30m 59s of daylight
        let (light, percent, dark) = SunSchedule::split_day(12 * 3600 + 30 * 60 + 59);
        assert_eq!(light.to_string(), "12h 30m");
        assert_eq!(dark.to_string(), "11h 30m");
        assert!((percent - 52.083).abs() < 0.01);
    }

    #[test]
    fn polar_day_clamps_to_full_day() {
        let (light, percent, dark) = SunSchedule::split_day(90_000);
        assert_eq!(light.total_minutes(), MINUTES_PER_DAY);
        assert!((percent - 100.0).abs() < f64::EPSILON);
        assert_eq!(dark.total_minutes(), 0);
    }
}
