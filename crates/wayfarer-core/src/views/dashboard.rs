// ── Country overview panel ──
//
// Country facts plus a live clock for the destination. The clock runs as
// a background task that ticks once a second; each load replaces it and
// `reset` stops it.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{LoadOutcome, ViewSlot, ViewState, ViewUpdater};
use crate::model::{CountryFacts, LocalClock};
use crate::provider::CountryProvider;
use crate::selection::SelectionStore;

const CLOCK_TICK: Duration = Duration::from_secs(1);

pub struct DashboardView {
    selection: Arc<SelectionStore>,
    provider: Arc<dyn CountryProvider>,
    slot: ViewSlot<CountryFacts>,
    clock: Arc<watch::Sender<Option<LocalClock>>>,
    ticker: Mutex<Option<CancellationToken>>,
}

impl DashboardView {
    pub fn new(selection: Arc<SelectionStore>, provider: Arc<dyn CountryProvider>) -> Self {
        let (clock, _rx) = watch::channel(None);
        Self {
            selection,
            provider,
            slot: ViewSlot::new(),
            clock: Arc::new(clock),
            ticker: Mutex::new(None),
        }
    }

    pub fn slot(&self) -> &ViewSlot<CountryFacts> {
        &self.slot
    }

    /// Latest local time at the destination, if a clock is running.
    pub fn clock(&self) -> Option<LocalClock> {
        self.clock.borrow().clone()
    }

    pub fn subscribe_clock(&self) -> watch::Receiver<Option<LocalClock>> {
        self.clock.subscribe()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|t| !t.is_cancelled())
    }

    fn stop_clock(&self) {
        if let Some(token) = self
            .ticker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            token.cancel();
            debug!("clock stopped");
        }
    }

    fn start_clock(&self, timezone: String) {
        let cancel = CancellationToken::new();
        let previous = self
            .ticker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(cancel.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }
        debug!(timezone = %timezone, "clock started");
        tokio::spawn(clock_task(Arc::clone(&self.clock), timezone, cancel));
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.stop_clock();
    }
}

#[async_trait]
impl ViewUpdater for DashboardView {
    fn name(&self) -> &'static str {
        "dashboard"
    }

    async fn load(&self, generation: u64) -> LoadOutcome {
        self.stop_clock();

        let selection = self.selection.get();
        if !selection.has_country() {
            self.clock.send_replace(None);
            return self.slot.skip(self.name(), generation, "no country selected");
        }

        self.slot.publish(generation, ViewState::Loading);
        let result = self
            .provider
            .country(&selection.country_code)
            .await
            .map(|details| Some(CountryFacts::from(details)));
        let timezone = result
            .as_ref()
            .ok()
            .and_then(|facts| facts.as_ref()?.primary_timezone().map(str::to_owned));

        let outcome = self.slot.settle(self.name(), generation, result);
        match (&outcome, timezone) {
            (LoadOutcome::Ready, Some(timezone)) => self.start_clock(timezone),
            (LoadOutcome::Superseded, _) => {}
            _ => {
                self.clock.send_replace(None);
            }
        }
        outcome
    }

    fn reset(&self, generation: u64) {
        self.stop_clock();
        self.clock.send_replace(None);
        self.slot.reset(generation);
    }
}

// ── Background task ──────────────────────────────────────────────────

async fn clock_task(
    clock: Arc<watch::Sender<Option<LocalClock>>>,
    timezone: String,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(CLOCK_TICK);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                clock.send_replace(Some(LocalClock::now(&timezone)));
            }
        }
    }
}
