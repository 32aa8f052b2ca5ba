// ── Events panel ──

use std::sync::Arc;

use async_trait::async_trait;

use super::{LoadOutcome, ViewSlot, ViewState, ViewUpdater};
use crate::convert::event_card;
use crate::model::EventListing;
use crate::provider::EventProvider;
use crate::selection::SelectionStore;

pub struct EventsView {
    selection: Arc<SelectionStore>,
    provider: Arc<dyn EventProvider>,
    slot: ViewSlot<EventListing>,
}

impl EventsView {
    pub fn new(selection: Arc<SelectionStore>, provider: Arc<dyn EventProvider>) -> Self {
        Self {
            selection,
            provider,
            slot: ViewSlot::new(),
        }
    }

    pub fn slot(&self) -> &ViewSlot<EventListing> {
        &self.slot
    }
}

#[async_trait]
impl ViewUpdater for EventsView {
    fn name(&self) -> &'static str {
        "events"
    }

    async fn load(&self, generation: u64) -> LoadOutcome {
        let selection = self.selection.get();
        if !selection.has_country() || !selection.has_city() {
            return self.slot.skip(self.name(), generation, "no city selected");
        }

        self.slot.publish(generation, ViewState::Loading);
        let result = self
            .provider
            .events(&selection.city, &selection.country_code)
            .await
            .map(|events| {
                (!events.is_empty()).then(|| EventListing {
                    events: events
                        .into_iter()
                        .map(|e| event_card(e, &selection.country))
                        .collect(),
                    country: selection.country.clone(),
                    city: selection.city.clone(),
                })
            });
        self.slot.settle(self.name(), generation, result)
    }

    fn reset(&self, generation: u64) {
        self.slot.reset(generation);
    }
}
