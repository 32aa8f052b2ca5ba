// ── Holidays and long weekends ──

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use super::plan::Plan;

/// A public holiday ready for display, with the plan it would save as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayCard {
    pub date: NaiveDate,
    pub day: u32,
    /// Abbreviated month, e.g. `Jan`.
    pub month: String,
    /// Full weekday, e.g. `Thursday`.
    pub weekday: String,
    pub local_name: String,
    pub name: String,
    pub types: Vec<String>,
    pub plan: Plan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayCalendar {
    pub country: String,
    pub country_code: String,
    pub year: i32,
    pub flag_url: String,
    pub holidays: Vec<HolidayCard>,
}

/// One day in a long weekend's strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    /// Abbreviated weekday, e.g. `Sat`.
    pub weekday: String,
    pub day: u32,
    pub is_weekend: bool,
    pub is_bridge_day: bool,
}

impl DayCell {
    pub fn new(date: NaiveDate, bridge_days: &[NaiveDate]) -> Self {
        Self {
            date,
            weekday: date.format("%a").to_string(),
            day: date.day(),
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            is_bridge_day: bridge_days.contains(&date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LongWeekendCard {
    /// 1-based position in the year.
    pub ordinal: usize,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub day_count: u32,
    pub need_bridge_day: bool,
    pub bridge_days: Vec<NaiveDate>,
    pub days: Vec<DayCell>,
    pub plan: Plan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LongWeekendCalendar {
    pub country: String,
    pub year: i32,
    pub weekends: Vec<LongWeekendCard>,
}

/// Inclusive list of days between `start` and `end`.
pub fn day_strip(start: NaiveDate, end: NaiveDate, bridge_days: &[NaiveDate]) -> Vec<DayCell> {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|d| DayCell::new(d, bridge_days))
        .collect()
}
