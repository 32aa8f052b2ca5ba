//! My Plans command handlers.

use std::sync::Arc;

use chrono::NaiveDate;
use tabled::Tabled;

use wayfarer_core::{BlobStore, FavoritesStore, Notifier, Plan, PlanCounts, PlanFilter};

use super::util;
use crate::cli::{OutputFormat, PlanAddArgs, PlanKindArg, PlansArgs, PlansCommand};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Where")]
    place: String,
}

fn plan_row(number: usize, plan: &Plan) -> PlanRow {
    let place = match plan {
        Plan::Event { city, country, .. } if !city.is_empty() => format!("{city}, {country}"),
        other => other.country().to_owned(),
    };
    let date = match plan {
        Plan::LongWeekend {
            start_date,
            end_date,
            day_count,
            ..
        } => format!("{start_date} - {end_date} ({day_count} days)"),
        other => other.date().to_owned(),
    };
    PlanRow {
        number,
        kind: plan.kind().to_string(),
        name: plan.label(),
        date,
        place,
    }
}

fn counts_line(counts: PlanCounts) -> String {
    format!(
        "All {} · Holidays {} · Events {} · Long weekends {}",
        counts.all, counts.holiday, counts.event, counts.long_weekend
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    args: PlansArgs,
    storage: Arc<dyn BlobStore>,
    settings: &Settings,
) -> Result<(), CliError> {
    let store = Arc::new(FavoritesStore::load(storage));
    let notifier = Notifier::new();
    let mut notices = notifier.subscribe();

    let result = match args.command {
        PlansCommand::List { filter } => list(&store, &filter, settings),
        PlansCommand::Add(add) => add_plan(&store, &notifier, add),
        PlansCommand::Remove { target } => remove(&store, &notifier, &target, settings),
        PlansCommand::Clear => clear(&store, &notifier, settings),
    };

    output::drain_notices(&mut notices, settings.color, settings.quiet);
    result
}

fn list(store: &FavoritesStore, filter: &str, settings: &Settings) -> Result<(), CliError> {
    let filter: PlanFilter = filter.parse().map_err(|reason| CliError::Validation {
        field: "filter".into(),
        reason,
    })?;

    // Numbers refer to the unfiltered list so `plans remove N` stays stable.
    let numbered: Vec<(usize, Plan)> = store
        .plans()
        .iter()
        .enumerate()
        .filter(|(_, plan)| filter.matches(plan))
        .map(|(i, plan)| (i + 1, plan.clone()))
        .collect();
    let plans: Vec<&Plan> = numbered.iter().map(|(_, p)| p).collect();

    let out = match settings.output {
        OutputFormat::Table if numbered.is_empty() => "No saved plans.".to_owned(),
        OutputFormat::Table => {
            let rows: Vec<PlanRow> = numbered.iter().map(|(n, p)| plan_row(*n, p)).collect();
            format!("{}\n{}", output::render_table(&rows), counts_line(store.counts()))
        }
        _ => output::render_list(
            &settings.output,
            &plans,
            |p| plan_row(0, p),
            |p| p.display_id(),
        )?,
    };
    output::print_output(&out, settings.quiet);
    Ok(())
}

fn required(value: Option<String>, field: &str, kind: &str) -> Result<String, CliError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CliError::Validation {
            field: field.into(),
            reason: format!("required for a {kind} plan"),
        })
}

fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected YYYY-MM-DD, got '{raw}'"),
    })
}

/// Build a plan from `plans add` flags.
fn build_plan(args: PlanAddArgs) -> Result<Plan, CliError> {
    let plan = match args.kind {
        PlanKindArg::Holiday => {
            let name = required(args.name, "name", "holiday")?;
            let date = required(args.date, "date", "holiday")?;
            parse_date(&date, "date")?;
            Plan::Holiday {
                local_name: args.local_name.unwrap_or_else(|| name.clone()),
                name,
                date,
                country: args.country,
            }
        }
        PlanKindArg::Event => Plan::Event {
            name: required(args.name, "name", "event")?,
            date: args.date.unwrap_or_default(),
            city: args.city.unwrap_or_default(),
            country: args.country,
        },
        PlanKindArg::LongWeekend => {
            let start_date = required(args.date, "date", "long weekend")?;
            let end_date = required(args.end_date, "end-date", "long weekend")?;
            let days = (parse_date(&end_date, "end-date")? - parse_date(&start_date, "date")?)
                .num_days()
                + 1;
            let day_count = u32::try_from(days).map_err(|_| CliError::Validation {
                field: "end-date".into(),
                reason: "must not be before the start date".into(),
            })?;
            if day_count == 0 {
                return Err(CliError::Validation {
                    field: "end-date".into(),
                    reason: "must not be before the start date".into(),
                });
            }
            Plan::LongWeekend {
                name: args.name.filter(|n| !n.is_empty()),
                start_date,
                end_date,
                day_count,
                need_bridge_day: args.bridge,
                country: args.country,
            }
        }
    };
    Ok(plan)
}

fn add_plan(
    store: &Arc<FavoritesStore>,
    notifier: &Notifier,
    args: PlanAddArgs,
) -> Result<(), CliError> {
    let plan = build_plan(args)?;
    let added = store.add(plan)?;
    if added {
        notifier.success(wayfarer_core::favorite::SAVED_NOTICE);
    } else {
        notifier.info(wayfarer_core::favorite::ALREADY_SAVED_NOTICE);
    }
    Ok(())
}

/// Find a plan by 1-based list number or by its name/date.
fn find_target(store: &FavoritesStore, target: &str) -> Result<Plan, CliError> {
    let plans = store.plans();
    let by_number = target
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| plans.get(i));
    by_number
        .or_else(|| {
            plans
                .iter()
                .find(|p| p.display_id().eq_ignore_ascii_case(target))
        })
        .cloned()
        .ok_or_else(|| CliError::NotFound {
            resource_type: "plan".into(),
            identifier: target.into(),
            list_command: "plans list".into(),
        })
}

fn remove(
    store: &FavoritesStore,
    notifier: &Notifier,
    target: &str,
    settings: &Settings,
) -> Result<(), CliError> {
    let plan = find_target(store, target)?;
    let prompt = format!("Remove \"{}\" from My Plans?", plan.label());
    if !util::confirm(&prompt, "plans remove", settings.yes)? {
        return Ok(());
    }
    let removed = store.remove(&plan)?;
    notifier.success(format!("Removed {removed} plan(s) from My Plans"));
    Ok(())
}

fn clear(store: &FavoritesStore, notifier: &Notifier, settings: &Settings) -> Result<(), CliError> {
    if store.is_empty() {
        notifier.info("My Plans is already empty");
        return Ok(());
    }
    let prompt = format!("Remove all {} saved plans?", store.len());
    if !util::confirm(&prompt, "plans clear", settings.yes)? {
        return Ok(());
    }
    let removed = store.clear_all()?;
    notifier.success(format!("Cleared {removed} plan(s) from My Plans"));
    Ok(())
}
