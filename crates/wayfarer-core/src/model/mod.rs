// ── Domain model ──
//
// Display-ready types produced by the view updaters, plus the persisted
// `Plan` record. Provider wire types stay in `wayfarer_api::types`.

pub mod calendar;
pub mod country;
pub mod event;
pub mod plan;
pub mod sun;
pub mod weather;

// ── Re-exports ──────────────────────────────────────────────────────

pub use calendar::{DayCell, HolidayCalendar, HolidayCard, LongWeekendCalendar, LongWeekendCard};
pub use country::{CountryFacts, CountryOption, CurrencyTag, LocalClock, flag_url, parse_utc_offset};
pub use event::{EventCard, EventListing};
pub use plan::{Plan, PlanCounts, PlanFilter, PlanKind};
pub use sun::{Span, SunSchedule};
pub use weather::{CurrentWeather, DailySlot, HourlySlot, WeatherCategory, WeatherReport};
