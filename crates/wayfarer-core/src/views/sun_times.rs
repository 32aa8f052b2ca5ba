// ── Sunrise and sunset panel ──

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use super::{LoadOutcome, ViewSlot, ViewState, ViewUpdater};
use crate::convert::sun_schedule;
use crate::model::SunSchedule;
use crate::provider::SunTimesProvider;
use crate::selection::SelectionStore;

pub struct SunTimesView {
    selection: Arc<SelectionStore>,
    provider: Arc<dyn SunTimesProvider>,
    slot: ViewSlot<SunSchedule>,
}

impl SunTimesView {
    pub fn new(selection: Arc<SelectionStore>, provider: Arc<dyn SunTimesProvider>) -> Self {
        Self {
            selection,
            provider,
            slot: ViewSlot::new(),
        }
    }

    pub fn slot(&self) -> &ViewSlot<SunSchedule> {
        &self.slot
    }
}

#[async_trait]
impl ViewUpdater for SunTimesView {
    fn name(&self) -> &'static str {
        "sun_times"
    }

    async fn load(&self, generation: u64) -> LoadOutcome {
        let selection = self.selection.get();
        let Some((latitude, longitude)) = selection.coordinates() else {
            debug!(generation, "no coordinates, sun times unavailable");
            self.slot.publish(generation, ViewState::Empty);
            return LoadOutcome::Skipped {
                reason: "no coordinates".into(),
            };
        };

        self.slot.publish(generation, ViewState::Loading);
        let today = Utc::now().date_naive();
        let result = self
            .provider
            .sun_times(latitude, longitude, today)
            .await
            .map(|times| Some(sun_schedule(times, today, &selection.country, &selection.city)));
        self.slot.settle(self.name(), generation, result)
    }

    fn reset(&self, generation: u64) {
        self.slot.reset(generation);
    }
}
