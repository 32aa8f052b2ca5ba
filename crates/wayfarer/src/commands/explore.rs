//! Explore command handler: select a destination, load every view, print.

use std::fmt::Write as _;
use std::io::IsTerminal;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use indicatif::ProgressBar;
use serde::Serialize;
use tabled::Tabled;

use wayfarer_core::model::event::DATE_NOT_AVAILABLE;
use wayfarer_core::model::{
    CountryFacts, EventListing, HolidayCalendar, LongWeekendCalendar, SunSchedule, WeatherReport,
    parse_utc_offset,
};
use wayfarer_core::{
    Dashboard, ExploreReport, LoadOutcome, Plan, Selection, ToggleOutcome, ViewSnapshot,
    ViewState,
};

use crate::cli::{ExploreArgs, OutputFormat, SaveTarget, ViewName};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: ExploreArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    let mut notices = dashboard.subscribe_notices();

    dashboard.choose_country(&args.country).await?;
    if let Some(city) = args.city.as_deref() {
        dashboard.choose_city(city);
    }
    dashboard.choose_year(args.year.unwrap_or(settings.default_year));

    let spinner = spinner(settings, &dashboard.selection().destination());
    let report = dashboard.explore().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let report = report?;
    output::drain_notices(&mut notices, settings.color, settings.quiet);

    if !args.save.is_empty() {
        // Per-card notices stay queued; one summary line replaces them
        let (saved, already) = save_cards(dashboard, &args.save);
        if !settings.quiet {
            eprintln!("Saved {saved} plan(s) to My Plans ({already} already saved)");
        }
    }

    let snapshot = ExploreOutput::capture(dashboard, report, &args.only);
    let out = match settings.output {
        OutputFormat::Table => snapshot.render_text(),
        OutputFormat::Plain => snapshot.render_plain(),
        _ => output::render_single(&settings.output, &snapshot, |_| String::new(), |_| String::new())?,
    };
    output::print_output(&out, settings.quiet);
    Ok(())
}

fn spinner(settings: &Settings, destination: &str) -> Option<ProgressBar> {
    let interactive = !settings.quiet
        && matches!(settings.output, OutputFormat::Table)
        && std::io::stderr().is_terminal();
    interactive.then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_message(format!("Exploring {destination}..."));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    })
}

/// Toggle every card of the requested views into My Plans.
fn save_cards(dashboard: &Dashboard, targets: &[SaveTarget]) -> (usize, usize) {
    let mut plans: Vec<Plan> = Vec::new();
    for target in targets {
        match target {
            SaveTarget::Holidays => {
                if let Some(cal) = dashboard.holidays().slot().snapshot().state.ready() {
                    plans.extend(cal.holidays.iter().map(|c| c.plan.clone()));
                }
            }
            SaveTarget::Events => {
                if let Some(listing) = dashboard.events().slot().snapshot().state.ready() {
                    plans.extend(listing.events.iter().map(|c| c.plan.clone()));
                }
            }
            SaveTarget::LongWeekends => {
                if let Some(cal) = dashboard.long_weekends().slot().snapshot().state.ready() {
                    plans.extend(cal.weekends.iter().map(|c| c.plan.clone()));
                }
            }
        }
    }

    plans
        .into_iter()
        .map(|plan| dashboard.favorite_toggle(plan).toggle())
        .fold((0, 0), |(saved, already), outcome| match outcome {
            ToggleOutcome::Saved => (saved + 1, already),
            ToggleOutcome::AlreadySaved => (saved, already + 1),
        })
}

// ── Captured views ──────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExploreOutput {
    selection: Selection,
    report: ExploreReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    local_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    overview: Option<ViewSnapshot<CountryFacts>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    holidays: Option<ViewSnapshot<HolidayCalendar>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<ViewSnapshot<EventListing>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weather: Option<ViewSnapshot<WeatherReport>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    long_weekends: Option<ViewSnapshot<LongWeekendCalendar>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sun_times: Option<ViewSnapshot<SunSchedule>>,
    #[serde(skip)]
    offset: Option<FixedOffset>,
}

impl ExploreOutput {
    fn capture(dashboard: &Dashboard, report: ExploreReport, only: &[ViewName]) -> Self {
        let shown = |view: ViewName| only.is_empty() || only.contains(&view);
        let overview = dashboard.overview().slot().snapshot();
        let clock = dashboard.overview().clock();
        let offset = overview
            .state
            .ready()
            .and_then(CountryFacts::primary_timezone)
            .map(parse_utc_offset);

        Self {
            selection: dashboard.selection(),
            report,
            local_time: clock.map(|c| format!("{} {}", c.date_label(), c.time_label())),
            overview: shown(ViewName::Overview).then_some(overview),
            holidays: shown(ViewName::Holidays).then(|| dashboard.holidays().slot().snapshot()),
            events: shown(ViewName::Events).then(|| dashboard.events().slot().snapshot()),
            weather: shown(ViewName::Weather).then(|| dashboard.weather().slot().snapshot()),
            long_weekends: shown(ViewName::LongWeekends)
                .then(|| dashboard.long_weekends().slot().snapshot()),
            sun_times: shown(ViewName::SunTimes).then(|| dashboard.sun_times().slot().snapshot()),
            offset,
        }
    }

    fn render_plain(&self) -> String {
        self.report
            .views
            .iter()
            .map(|v| format!("{}\t{}", v.view, outcome_label(&v.outcome)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_text(&self) -> String {
        let mut sections = Vec::new();
        if let Some(s) = &self.overview {
            sections.push(section("Overview", s, "No country details", |f| {
                render_overview(f, self.local_time.as_deref())
            }));
        }
        if let Some(s) = &self.holidays {
            sections.push(section("Public holidays", s, "No public holidays found", render_holidays));
        }
        if let Some(s) = &self.events {
            sections.push(section("Events", s, "No upcoming events found", render_events));
        }
        if let Some(s) = &self.weather {
            sections.push(section("Weather", s, "No weather data for this location", render_weather));
        }
        if let Some(s) = &self.long_weekends {
            sections.push(section("Long weekends", s, "No long weekends found", render_long_weekends));
        }
        if let Some(s) = &self.sun_times {
            sections.push(section("Sun times", s, "No sun data for this location", |sun| {
                render_sun(sun, self.offset)
            }));
        }
        sections.join("\n\n")
    }
}

fn outcome_label(outcome: &LoadOutcome) -> String {
    match outcome {
        LoadOutcome::Ready => "ready".into(),
        LoadOutcome::Empty => "empty".into(),
        LoadOutcome::Skipped { reason } => format!("skipped: {reason}"),
        LoadOutcome::Failed { message } => format!("failed: {message}"),
        LoadOutcome::Superseded => "superseded".into(),
    }
}

fn section<T>(
    title: &str,
    snapshot: &ViewSnapshot<T>,
    empty: &str,
    ready: impl Fn(&T) -> String,
) -> String {
    match &snapshot.state {
        ViewState::Ready(data) => ready(data),
        ViewState::Placeholder => format!("{title}\n  Not available for this selection"),
        ViewState::Loading => format!("{title}\n  Loading..."),
        ViewState::Empty => format!("{title}\n  {empty}"),
        ViewState::Failed(message) => format!("{title}\n  Failed to load: {message}"),
    }
}

// ── Section renderers ───────────────────────────────────────────────

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_owned()
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".into()
    } else {
        values.join(", ")
    }
}

fn render_overview(facts: &CountryFacts, local_time: Option<&str>) -> String {
    let region = match &facts.subregion {
        Some(sub) => format!("{} / {sub}", facts.region),
        None => facts.region.clone(),
    };
    let currencies: Vec<String> = facts
        .currencies
        .iter()
        .map(|c| format!("{} ({}, {})", c.code, c.name, c.symbol))
        .collect();

    output::render_fields(
        &format!("{} ({})", facts.common_name, facts.code),
        &[
            ("Official name", facts.official_name.clone()),
            ("Region", region),
            ("Capital", or_dash(facts.capital.as_deref())),
            ("Population", group_thousands(facts.population)),
            ("Area", format!("{} km²", facts.area_km2)),
            ("Calling code", or_dash(facts.calling_code.as_deref())),
            ("Drives on", or_dash(facts.driving_side.as_deref())),
            ("Week starts", or_dash(facts.week_starts_on.as_deref())),
            ("Currencies", join_or_dash(&currencies)),
            ("Languages", join_or_dash(&facts.languages)),
            ("Borders", join_or_dash(&facts.borders)),
            ("Timezones", join_or_dash(&facts.timezones)),
            ("Local time", or_dash(local_time)),
            ("Map", or_dash(facts.map_url.as_deref())),
        ],
    )
}

#[derive(Tabled)]
struct HolidayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    weekday: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Local name")]
    local_name: String,
}

fn render_holidays(cal: &HolidayCalendar) -> String {
    let rows: Vec<HolidayRow> = cal
        .holidays
        .iter()
        .map(|h| HolidayRow {
            date: format!("{} {}", h.day, h.month),
            weekday: h.weekday.clone(),
            name: h.name.clone(),
            local_name: h.local_name.clone(),
        })
        .collect();
    format!(
        "Public holidays {} · {}\n{}",
        cal.year,
        cal.country,
        output::render_table(&rows)
    )
}

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Venue")]
    venue: String,
    #[tabled(rename = "Category")]
    category: String,
}

fn render_events(listing: &EventListing) -> String {
    let rows: Vec<EventRow> = listing
        .events
        .iter()
        .map(|e| EventRow {
            date: e.starts.clone().unwrap_or_else(|| DATE_NOT_AVAILABLE.into()),
            name: e.name.clone(),
            venue: or_dash(e.venue.as_deref()),
            category: e.category.clone(),
        })
        .collect();
    format!(
        "Events in {}, {}\n{}",
        listing.city,
        listing.country,
        output::render_table(&rows)
    )
}

#[derive(Tabled)]
struct DailyRow {
    #[tabled(rename = "Day")]
    label: String,
    #[tabled(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    low: String,
    #[tabled(rename = "Sky")]
    category: String,
}

fn degrees(value: f64) -> String {
    format!("{value:.0}°C")
}

fn render_weather(report: &WeatherReport) -> String {
    let current = &report.current;
    let high_low = match (report.today_high, report.today_low) {
        (Some(hi), Some(lo)) => format!("{} / {}", degrees(hi), degrees(lo)),
        _ => "-".into(),
    };
    let mut out = output::render_fields(
        &format!("Weather in {}, {}", report.city, report.country),
        &[
            (
                "Now",
                format!("{}, {}", degrees(current.temperature), current.condition),
            ),
            ("Feels like", current.feels_like.map_or_else(|| "-".into(), degrees)),
            ("High / low", high_low),
            (
                "Humidity",
                current
                    .humidity
                    .map_or_else(|| "-".into(), |h| format!("{h:.0}%")),
            ),
            (
                "Wind",
                current
                    .wind_speed
                    .map_or_else(|| "-".into(), |w| format!("{w:.0} km/h")),
            ),
        ],
    );

    if !report.hourly.is_empty() {
        out.push_str("\n  Next hours");
        for chunk in report.hourly.chunks(6) {
            let line: Vec<String> = chunk
                .iter()
                .map(|h| format!("{} {}", h.label, degrees(h.temperature)))
                .collect();
            let _ = write!(out, "\n    {}", line.join(" · "));
        }
    }

    if !report.daily.is_empty() {
        let rows: Vec<DailyRow> = report
            .daily
            .iter()
            .map(|d| DailyRow {
                label: d.label.clone(),
                high: degrees(d.high),
                low: degrees(d.low),
                category: d.category.to_string(),
            })
            .collect();
        let _ = write!(out, "\n{}", output::render_table(&rows));
    }
    out
}

#[derive(Tabled)]
struct LongWeekendRow {
    #[tabled(rename = "#")]
    ordinal: usize,
    #[tabled(rename = "Dates")]
    dates: String,
    #[tabled(rename = "Days")]
    day_count: u32,
    #[tabled(rename = "Bridge day")]
    bridge: String,
    #[tabled(rename = "Strip")]
    strip: String,
}

fn render_long_weekends(cal: &LongWeekendCalendar) -> String {
    let rows: Vec<LongWeekendRow> = cal
        .weekends
        .iter()
        .map(|w| LongWeekendRow {
            ordinal: w.ordinal,
            dates: format!(
                "{} - {}",
                w.start_date.format("%b %-d"),
                w.end_date.format("%b %-d")
            ),
            day_count: w.day_count,
            bridge: if w.need_bridge_day { "needed" } else { "-" }.into(),
            strip: w
                .days
                .iter()
                .map(|d| {
                    let mark = if d.is_bridge_day { "*" } else { "" };
                    format!("{} {}{mark}", d.weekday, d.day)
                })
                .collect::<Vec<_>>()
                .join(" "),
        })
        .collect();
    format!(
        "Long weekends {} · {}\n{}",
        cal.year,
        cal.country,
        output::render_table(&rows)
    )
}

fn clock_time(at: DateTime<Utc>, offset: Option<FixedOffset>) -> String {
    match offset {
        Some(offset) => at.with_timezone(&offset).format("%H:%M").to_string(),
        None => at.format("%H:%M UTC").to_string(),
    }
}

fn render_sun(sun: &SunSchedule, offset: Option<FixedOffset>) -> String {
    output::render_fields(
        &format!("Sun times in {}, {} · {}", sun.city, sun.country, sun.date),
        &[
            ("Dawn", clock_time(sun.dawn, offset)),
            ("Sunrise", clock_time(sun.sunrise, offset)),
            ("Solar noon", clock_time(sun.solar_noon, offset)),
            ("Sunset", clock_time(sun.sunset, offset)),
            ("Dusk", clock_time(sun.dusk, offset)),
            (
                "Daylight",
                format!("{} ({:.1}%)", sun.daylight, sun.daylight_percent),
            ),
            ("Darkness", sun.darkness.to_string()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(83_240_525), "83,240,525");
    }

    #[test]
    fn times_follow_the_destination_offset() {
        let at = DateTime::parse_from_rfc3339("2026-03-20T05:30:00Z")
            .map(|t| t.with_timezone(&Utc))
            .ok();
        let Some(at) = at else {
            panic!("fixture timestamp must parse");
        };
        assert_eq!(clock_time(at, None), "05:30 UTC");
        assert_eq!(clock_time(at, Some(parse_utc_offset("UTC+01:00"))), "06:30");
    }

    #[test]
    fn skipped_views_read_as_unavailable() {
        let snapshot: ViewSnapshot<EventListing> = ViewSnapshot {
            generation: 1,
            state: ViewState::Placeholder,
        };
        assert_eq!(
            section("Events", &snapshot, "none", render_events),
            "Events\n  Not available for this selection"
        );
    }
}
