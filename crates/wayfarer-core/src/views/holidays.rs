// ── Public holidays panel ──

use std::sync::Arc;

use async_trait::async_trait;

use super::{LoadOutcome, ViewSlot, ViewState, ViewUpdater};
use crate::convert::holiday_card;
use crate::model::{HolidayCalendar, flag_url};
use crate::provider::HolidayProvider;
use crate::selection::SelectionStore;

pub struct HolidaysView {
    selection: Arc<SelectionStore>,
    provider: Arc<dyn HolidayProvider>,
    slot: ViewSlot<HolidayCalendar>,
}

impl HolidaysView {
    pub fn new(selection: Arc<SelectionStore>, provider: Arc<dyn HolidayProvider>) -> Self {
        Self {
            selection,
            provider,
            slot: ViewSlot::new(),
        }
    }

    pub fn slot(&self) -> &ViewSlot<HolidayCalendar> {
        &self.slot
    }
}

#[async_trait]
impl ViewUpdater for HolidaysView {
    fn name(&self) -> &'static str {
        "holidays"
    }

    async fn load(&self, generation: u64) -> LoadOutcome {
        let selection = self.selection.get();
        if !selection.has_country() {
            return self.slot.skip(self.name(), generation, "no country selected");
        }

        self.slot.publish(generation, ViewState::Loading);
        let result = self
            .provider
            .public_holidays(selection.year, &selection.country_code)
            .await
            .map(|holidays| {
                (!holidays.is_empty()).then(|| HolidayCalendar {
                    flag_url: flag_url(&selection.country_code, 40),
                    holidays: holidays
                        .into_iter()
                        .map(|h| holiday_card(h, &selection.country))
                        .collect(),
                    country: selection.country.clone(),
                    country_code: selection.country_code.clone(),
                    year: selection.year,
                })
            });
        self.slot.settle(self.name(), generation, result)
    }

    fn reset(&self, generation: u64) {
        self.slot.reset(generation);
    }
}
