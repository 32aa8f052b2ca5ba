// ── Long weekends panel ──

use std::sync::Arc;

use async_trait::async_trait;

use super::{LoadOutcome, ViewSlot, ViewState, ViewUpdater};
use crate::convert::long_weekend_card;
use crate::model::LongWeekendCalendar;
use crate::provider::LongWeekendProvider;
use crate::selection::SelectionStore;

pub struct LongWeekendsView {
    selection: Arc<SelectionStore>,
    provider: Arc<dyn LongWeekendProvider>,
    slot: ViewSlot<LongWeekendCalendar>,
}

impl LongWeekendsView {
    pub fn new(selection: Arc<SelectionStore>, provider: Arc<dyn LongWeekendProvider>) -> Self {
        Self {
            selection,
            provider,
            slot: ViewSlot::new(),
        }
    }

    pub fn slot(&self) -> &ViewSlot<LongWeekendCalendar> {
        &self.slot
    }
}

#[async_trait]
impl ViewUpdater for LongWeekendsView {
    fn name(&self) -> &'static str {
        "long_weekends"
    }

    async fn load(&self, generation: u64) -> LoadOutcome {
        let selection = self.selection.get();
        if !selection.has_country() {
            return self.slot.skip(self.name(), generation, "no country selected");
        }

        self.slot.publish(generation, ViewState::Loading);
        let result = self
            .provider
            .long_weekends(selection.year, &selection.country_code)
            .await
            .map(|weekends| {
                (!weekends.is_empty()).then(|| LongWeekendCalendar {
                    weekends: weekends
                        .into_iter()
                        .enumerate()
                        .map(|(i, w)| long_weekend_card(i + 1, w, &selection.country))
                        .collect(),
                    country: selection.country.clone(),
                    year: selection.year,
                })
            });
        self.slot.settle(self.name(), generation, result)
    }

    fn reset(&self, generation: u64) {
        self.slot.reset(generation);
    }
}
