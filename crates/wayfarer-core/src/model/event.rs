// ── Events ──

use serde::Serialize;

use super::plan::Plan;

/// Shown when an event has no start date.
pub const DATE_NOT_AVAILABLE: &str = "Date not available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCard {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub venue: Option<String>,
    pub city: Option<String>,
    /// Provider start timestamp, or the local date when no time is known.
    pub starts: Option<String>,
    pub category: String,
    pub url: Option<String>,
    pub plan: Plan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListing {
    pub country: String,
    pub city: String,
    pub events: Vec<EventCard>,
}
