// ── View updaters ──
//
// Each panel of the dashboard is fed by one updater. An updater reads the
// shared selection, calls its provider, and publishes the result into its
// own `ViewSlot`. Every publish is stamped with the generation of the
// commit that produced it; a slot refuses anything older than what it
// already shows, so a slow superseded fan-out cannot overwrite a newer one.

mod dashboard;
mod events;
mod holidays;
mod long_weekends;
mod sun_times;
mod weather;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;

pub use dashboard::DashboardView;
pub use events::EventsView;
pub use holidays::HolidaysView;
pub use long_weekends::LongWeekendsView;
pub use sun_times::SunTimesView;
pub use weather::WeatherView;

// ── State ────────────────────────────────────────────────────────────

/// What a panel currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum ViewState<T> {
    /// Nothing explored yet.
    Placeholder,
    Loading,
    Ready(Arc<T>),
    /// The provider answered with nothing to show.
    Empty,
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot<T> {
    pub generation: u64,
    #[serde(flatten)]
    pub state: ViewState<T>,
}

/// Result of one updater's load, as seen by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum LoadOutcome {
    Ready,
    Empty,
    /// A precondition (country, city, coordinates) was missing.
    Skipped { reason: String },
    Failed { message: String },
    /// A newer commit published first; this result was dropped.
    Superseded,
}

// ── Slot ─────────────────────────────────────────────────────────────

/// Generation-guarded holder of one view's state.
#[derive(Debug)]
pub struct ViewSlot<T> {
    tx: watch::Sender<ViewSnapshot<T>>,
}

impl<T> Default for ViewSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ViewSlot<T> {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ViewSnapshot {
            generation: 0,
            state: ViewState::Placeholder,
        });
        Self { tx }
    }

    pub fn snapshot(&self) -> ViewSnapshot<T> {
        let current = self.tx.borrow();
        ViewSnapshot {
            generation: current.generation,
            state: match &current.state {
                ViewState::Placeholder => ViewState::Placeholder,
                ViewState::Loading => ViewState::Loading,
                ViewState::Ready(v) => ViewState::Ready(Arc::clone(v)),
                ViewState::Empty => ViewState::Empty,
                ViewState::Failed(m) => ViewState::Failed(m.clone()),
            },
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot<T>> {
        self.tx.subscribe()
    }

    /// Publish `state` for `generation`. Returns `false` (and changes
    /// nothing) when the slot already holds a newer generation.
    pub fn publish(&self, generation: u64, state: ViewState<T>) -> bool {
        self.tx.send_if_modified(|current| {
            if generation < current.generation {
                return false;
            }
            *current = ViewSnapshot { generation, state };
            true
        })
    }

    pub fn reset(&self, generation: u64) {
        self.publish(generation, ViewState::Placeholder);
    }

    /// Record a missing precondition: back to the placeholder.
    pub(crate) fn skip(&self, view: &str, generation: u64, reason: &str) -> LoadOutcome {
        debug!(view, generation, reason, "view skipped");
        self.publish(generation, ViewState::Placeholder);
        LoadOutcome::Skipped {
            reason: reason.to_owned(),
        }
    }

    /// Publish the result of a provider round-trip.
    ///
    /// `Ok(None)` means the provider had nothing to show.
    pub(crate) fn settle(
        &self,
        view: &str,
        generation: u64,
        result: Result<Option<T>, CoreError>,
    ) -> LoadOutcome {
        let (state, outcome) = match result {
            Ok(Some(value)) => (ViewState::Ready(Arc::new(value)), LoadOutcome::Ready),
            Ok(None) => (ViewState::Empty, LoadOutcome::Empty),
            Err(e) => {
                warn!(view, generation, error = %e, "view failed to load");
                let message = e.to_string();
                (
                    ViewState::Failed(message.clone()),
                    LoadOutcome::Failed { message },
                )
            }
        };

        if self.publish(generation, state) {
            outcome
        } else {
            debug!(view, generation, "result superseded by a newer commit");
            LoadOutcome::Superseded
        }
    }
}

// ── Updater trait ────────────────────────────────────────────────────

/// A dashboard panel that refreshes from the current selection.
#[async_trait]
pub trait ViewUpdater: Send + Sync {
    /// Stable identifier, used in logs and reports.
    fn name(&self) -> &'static str;

    /// Refresh from the current selection. Never fails: provider errors
    /// are rendered into the view and reported in the outcome.
    async fn load(&self, generation: u64) -> LoadOutcome;

    /// Return to the placeholder and stop any background work.
    fn reset(&self, generation: u64);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn older_generation_is_rejected() {
        let slot: ViewSlot<u32> = ViewSlot::new();
        assert!(slot.publish(2, ViewState::Ready(Arc::new(2))));
        assert!(!slot.publish(1, ViewState::Ready(Arc::new(1))));

        let snap = slot.snapshot();
        assert_eq!(snap.generation, 2);
        assert_eq!(snap.state.ready(), Some(&2));
    }

    #[test]
    fn same_generation_can_progress() {
        let slot: ViewSlot<u32> = ViewSlot::new();
        assert!(slot.publish(1, ViewState::Loading));
        assert!(slot.publish(1, ViewState::Empty));
        assert_eq!(slot.snapshot().state, ViewState::Empty);
    }

    #[test]
    fn settle_reports_superseded() {
        let slot: ViewSlot<u32> = ViewSlot::new();
        slot.reset(5);
        assert_eq!(slot.settle("test", 4, Ok(Some(1))), LoadOutcome::Superseded);
        assert!(slot.snapshot().state.is_placeholder());
    }

    #[test]
    fn settle_renders_failures() {
        let slot: ViewSlot<u32> = ViewSlot::new();
        let outcome = slot.settle("test", 1, Err(CoreError::Timeout));
        assert!(matches!(outcome, LoadOutcome::Failed { .. }));
        assert!(matches!(slot.snapshot().state, ViewState::Failed(_)));
    }

    #[test]
    fn snapshot_serializes_with_status_tag() {
        let slot: ViewSlot<u32> = ViewSlot::new();
        slot.publish(3, ViewState::Ready(Arc::new(7)));
        let json = serde_json::to_value(slot.snapshot()).unwrap();
        assert_eq!(json, serde_json::json!({ "generation": 3, "status": "ready", "data": 7 }));
    }
}
