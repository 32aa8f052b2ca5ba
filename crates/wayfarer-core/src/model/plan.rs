// ── Saved plans ──
//
// A plan is a holiday, event, or long weekend the user bookmarked.
// The serialized shape is the persisted format, tagged by `type`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Discriminant of a [`Plan`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum PlanKind {
    Holiday,
    Event,
    LongWeekend,
}

/// A bookmarked holiday, event, or long weekend.
///
/// Fields are stored verbatim as shown to the user; dates stay strings
/// because events may carry "Date not available".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Plan {
    Holiday {
        #[serde(default)]
        name: String,
        #[serde(default)]
        local_name: String,
        #[serde(default)]
        date: String,
        #[serde(default)]
        country: String,
    },
    Event {
        #[serde(default)]
        name: String,
        #[serde(default)]
        date: String,
        #[serde(default)]
        city: String,
        #[serde(default)]
        country: String,
    },
    LongWeekend {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default)]
        start_date: String,
        #[serde(default)]
        end_date: String,
        #[serde(default)]
        day_count: u32,
        #[serde(default)]
        need_bridge_day: bool,
        #[serde(default)]
        country: String,
    },
}

impl Plan {
    pub fn kind(&self) -> PlanKind {
        match self {
            Self::Holiday { .. } => PlanKind::Holiday,
            Self::Event { .. } => PlanKind::Event,
            Self::LongWeekend { .. } => PlanKind::LongWeekend,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Holiday { name, .. } | Self::Event { name, .. } => Some(name),
            Self::LongWeekend { name, .. } => name.as_deref(),
        }
    }

    pub fn start_date(&self) -> Option<&str> {
        match self {
            Self::LongWeekend { start_date, .. } => Some(start_date),
            _ => None,
        }
    }

    pub fn country(&self) -> &str {
        match self {
            Self::Holiday { country, .. }
            | Self::Event { country, .. }
            | Self::LongWeekend { country, .. } => country,
        }
    }

    /// Loose identity: same kind, and either the same non-empty name or
    /// the same non-empty start date.
    ///
    /// Two holidays with one name on different dates are the same plan.
    pub fn same_plan(&self, other: &Plan) -> bool {
        if self.kind() != other.kind() {
            return false;
        }
        let names = matches!(
            (self.name(), other.name()),
            (Some(a), Some(b)) if !a.is_empty() && a == b
        );
        let starts = matches!(
            (self.start_date(), other.start_date()),
            (Some(a), Some(b)) if !a.is_empty() && a == b
        );
        names || starts
    }

    /// Short human label used when listing or removing plans.
    pub fn label(&self) -> String {
        match self {
            Self::Holiday { name, .. } | Self::Event { name, .. } => name.clone(),
            Self::LongWeekend {
                name,
                start_date,
                end_date,
                ..
            } => name
                .clone()
                .unwrap_or_else(|| format!("{start_date} - {end_date}")),
        }
    }

    /// Stable card identifier: name, else start date, else the type tag.
    pub fn display_id(&self) -> String {
        self.name()
            .filter(|n| !n.is_empty())
            .or_else(|| self.start_date().filter(|d| !d.is_empty()))
            .map_or_else(|| self.kind().to_string(), ToOwned::to_owned)
    }

    /// Primary date for display ("start" for long weekends).
    pub fn date(&self) -> &str {
        match self {
            Self::Holiday { date, .. } | Self::Event { date, .. } => date,
            Self::LongWeekend { start_date, .. } => start_date,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.kind(), self.label(), self.country())
    }
}

// ── Filtering ────────────────────────────────────────────────────────

/// Which plans to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlanFilter {
    #[default]
    All,
    Kind(PlanKind),
}

impl PlanFilter {
    pub fn matches(self, plan: &Plan) -> bool {
        match self {
            Self::All => true,
            Self::Kind(kind) => plan.kind() == kind,
        }
    }
}

impl FromStr for PlanFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "holiday" | "holidays" => Ok(Self::Kind(PlanKind::Holiday)),
            "event" | "events" => Ok(Self::Kind(PlanKind::Event)),
            "longweekend" | "long-weekend" | "long_weekend" | "longweekends" => {
                Ok(Self::Kind(PlanKind::LongWeekend))
            }
            other => Err(format!(
                "unknown plan filter '{other}' (expected all, holiday, event, longWeekend)"
            )),
        }
    }
}

/// Per-kind totals for the filter chips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanCounts {
    pub all: usize,
    pub holiday: usize,
    pub event: usize,
    pub long_weekend: usize,
}

impl PlanCounts {
    pub fn tally<'a>(plans: impl IntoIterator<Item = &'a Plan>) -> Self {
        plans.into_iter().fold(Self::default(), |mut acc, plan| {
            acc.all += 1;
            match plan.kind() {
                PlanKind::Holiday => acc.holiday += 1,
                PlanKind::Event => acc.event += 1,
                PlanKind::LongWeekend => acc.long_weekend += 1,
            }
            acc
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn holiday(name: &str, date: &str) -> Plan {
        Plan::Holiday {
            name: name.into(),
            local_name: name.into(),
            date: date.into(),
            country: "Germany".into(),
        }
    }

    fn weekend(name: Option<&str>, start: &str) -> Plan {
        Plan::LongWeekend {
            name: name.map(Into::into),
            start_date: start.into(),
            end_date: "2026-04-06".into(),
            day_count: 4,
            need_bridge_day: false,
            country: "Germany".into(),
        }
    }

    #[test]
    fn same_name_different_date_is_same_plan() {
        assert!(holiday("New Year", "2026-01-01").same_plan(&holiday("New Year", "2026-06-01")));
    }

    #[test]
    fn different_kinds_never_match() {
        let event = Plan::Event {
            name: "New Year".into(),
            date: "2026-01-01".into(),
            city: "Berlin".into(),
            country: "Germany".into(),
        };
        assert!(!holiday("New Year", "2026-01-01").same_plan(&event));
    }

    #[test]
    fn unnamed_long_weekends_match_on_start_date() {
        assert!(weekend(None, "2026-04-03").same_plan(&weekend(None, "2026-04-03")));
        assert!(!weekend(None, "2026-04-03").same_plan(&weekend(None, "2026-05-01")));
    }

    #[test]
    fn empty_names_do_not_match() {
        assert!(!holiday("", "2026-01-01").same_plan(&holiday("", "2026-01-01")));
    }

    #[test]
    fn display_id_prefers_name_then_start() {
        assert_eq!(holiday("May Day", "2026-05-01").display_id(), "May Day");
        assert_eq!(weekend(None, "2026-04-03").display_id(), "2026-04-03");
        assert_eq!(weekend(None, "").display_id(), "longWeekend");
    }

    #[test]
    fn serializes_with_type_tag_and_camel_case_fields() {
        let value = serde_json::to_value(weekend(None, "2026-04-03")).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "longWeekend",
                "startDate": "2026-04-03",
                "endDate": "2026-04-06",
                "dayCount": 4,
                "needBridgeDay": false,
                "country": "Germany"
            })
        );

        let value = serde_json::to_value(holiday("Labour Day", "2026-05-01")).unwrap();
        assert_eq!(value["type"], "holiday");
        assert_eq!(value["localName"], "Labour Day");
    }

    #[test]
    fn tolerates_missing_fields_in_stored_records() {
        let plan: Plan = serde_json::from_value(json!({
            "type": "longWeekend",
            "startDate": "2026-04-03",
            "endDate": "2026-04-06",
            "dayCount": 4,
            "country": "Germany"
        }))
        .unwrap();
        assert_eq!(plan, weekend(None, "2026-04-03"));
    }

    #[test]
    fn filter_parses_aliases() {
        assert_eq!("all".parse::<PlanFilter>().unwrap(), PlanFilter::All);
        assert_eq!(
            "long-weekend".parse::<PlanFilter>().unwrap(),
            PlanFilter::Kind(PlanKind::LongWeekend)
        );
        assert_eq!(
            "longWeekend".parse::<PlanFilter>().unwrap(),
            PlanFilter::Kind(PlanKind::LongWeekend)
        );
        assert!("birthdays".parse::<PlanFilter>().is_err());
    }

    #[test]
    fn kind_strings_match_type_tags() {
        assert_eq!(PlanKind::LongWeekend.to_string(), "longWeekend");
        assert_eq!("holiday".parse::<PlanKind>().unwrap(), PlanKind::Holiday);
    }

    #[test]
    fn counts_tally_each_kind() {
        let plans = [
            holiday("A", "2026-01-01"),
            holiday("B", "2026-02-01"),
            weekend(None, "2026-04-03"),
        ];
        assert_eq!(
            PlanCounts::tally(&plans),
            PlanCounts {
                all: 3,
                holiday: 2,
                event: 0,
                long_weekend: 1
            }
        );
    }
}
