// ── Weather panel ──

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use tracing::debug;

use super::{LoadOutcome, ViewSlot, ViewState, ViewUpdater};
use crate::convert::weather_report;
use crate::model::WeatherReport;
use crate::provider::WeatherProvider;
use crate::selection::SelectionStore;

pub struct WeatherView {
    selection: Arc<SelectionStore>,
    provider: Arc<dyn WeatherProvider>,
    slot: ViewSlot<WeatherReport>,
}

impl WeatherView {
    pub fn new(selection: Arc<SelectionStore>, provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            selection,
            provider,
            slot: ViewSlot::new(),
        }
    }

    pub fn slot(&self) -> &ViewSlot<WeatherReport> {
        &self.slot
    }
}

#[async_trait]
impl ViewUpdater for WeatherView {
    fn name(&self) -> &'static str {
        "weather"
    }

    async fn load(&self, generation: u64) -> LoadOutcome {
        let selection = self.selection.get();
        let Some((latitude, longitude)) = selection.coordinates() else {
            debug!(generation, "no coordinates, weather unavailable");
            self.slot.publish(generation, ViewState::Empty);
            return LoadOutcome::Skipped {
                reason: "no coordinates".into(),
            };
        };

        self.slot.publish(generation, ViewState::Loading);
        let result = self
            .provider
            .forecast(latitude, longitude)
            .await
            .map(|forecast| {
                let local_now = Utc::now().naive_utc()
                    + TimeDelta::seconds(i64::from(forecast.utc_offset_seconds));
                weather_report(forecast, &selection.country, &selection.city, local_now)
            });
        self.slot.settle(self.name(), generation, result)
    }

    fn reset(&self, generation: u64) {
        self.slot.reset(generation);
    }
}
