// ── Selection commit and view fan-out ──
//
// Committing a selection refreshes every registered view, one after the
// other, in registration order. Each commit gets a fresh generation; the
// view slots use it to drop results from commits that were overtaken.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::notify::Notifier;
use crate::selection::SelectionStore;
use crate::views::{LoadOutcome, ViewUpdater};

pub const SELECT_COUNTRY_FIRST: &str = "Please select a country first";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ExploreState {
    Idle,
    Exploring { generation: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewOutcome {
    pub view: &'static str,
    #[serde(flatten)]
    pub outcome: LoadOutcome,
}

/// What one commit did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExploreReport {
    pub generation: u64,
    pub destination: String,
    pub views: Vec<ViewOutcome>,
}

impl ExploreReport {
    pub fn outcome(&self, view: &str) -> Option<&LoadOutcome> {
        self.views
            .iter()
            .find(|v| v.view == view)
            .map(|v| &v.outcome)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ViewOutcome> {
        self.views
            .iter()
            .filter(|v| matches!(v.outcome, LoadOutcome::Failed { .. }))
    }
}

pub struct SelectionOrchestrator {
    selection: Arc<SelectionStore>,
    notifier: Notifier,
    updaters: Vec<Arc<dyn ViewUpdater>>,
    generation: AtomicU64,
    state: watch::Sender<ExploreState>,
}

impl SelectionOrchestrator {
    pub fn new(selection: Arc<SelectionStore>, notifier: Notifier) -> Self {
        let (state, _rx) = watch::channel(ExploreState::Idle);
        Self {
            selection,
            notifier,
            updaters: Vec::new(),
            generation: AtomicU64::new(0),
            state,
        }
    }

    /// Add a view to the fan-out. Views load in the order registered.
    pub fn register(&mut self, updater: Arc<dyn ViewUpdater>) {
        debug!(view = updater.name(), "view registered");
        self.updaters.push(updater);
    }

    pub fn state(&self) -> ExploreState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ExploreState> {
        self.state.subscribe()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Refresh every view from the current selection.
    ///
    /// Fails only when no country is selected, in which case nothing is
    /// loaded and the user is told to pick one. Individual view failures
    /// are reported in the returned [`ExploreReport`].
    pub async fn commit(&self) -> Result<ExploreReport, CoreError> {
        let selection = self.selection.get();
        if !selection.has_country() {
            self.notifier.warning(SELECT_COUNTRY_FIRST);
            return Err(CoreError::NoCountrySelected);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(ExploreState::Exploring { generation });
        let destination = selection.destination();
        info!(generation, destination = %destination, year = selection.year, "exploring");

        let mut views = Vec::with_capacity(self.updaters.len());
        for updater in &self.updaters {
            let outcome = updater.load(generation).await;
            debug!(view = updater.name(), generation, ?outcome, "view loaded");
            views.push(ViewOutcome {
                view: updater.name(),
                outcome,
            });
        }

        let current = self.state.send_if_modified(|state| {
            if *state == (ExploreState::Exploring { generation }) {
                *state = ExploreState::Idle;
                true
            } else {
                false
            }
        });
        if current {
            self.notifier.success(format!("Exploring {destination}!"));
        } else {
            debug!(generation, "commit overtaken, success notice skipped");
        }

        Ok(ExploreReport {
            generation,
            destination,
            views,
        })
    }

    /// Clear the selection and return every view to its placeholder.
    ///
    /// Loads still in flight belong to an older generation and will be
    /// discarded by the view slots.
    pub fn reset_all(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(ExploreState::Idle);
        self.selection.clear();
        for updater in &self.updaters {
            updater.reset(generation);
        }
        info!(generation, "selection cleared");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::notify::NoticeLevel;

    /// Records start/end of each load into a shared log.
    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
        outcome: LoadOutcome,
        delay: Duration,
    }

    #[async_trait]
    impl ViewUpdater for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn load(&self, generation: u64) -> LoadOutcome {
            self.log.lock().unwrap().push(format!("{}:start:{generation}", self.name));
            tokio::time::sleep(self.delay).await;
            self.log.lock().unwrap().push(format!("{}:end:{generation}", self.name));
            self.outcome.clone()
        }

        fn reset(&self, generation: u64) {
            self.log.lock().unwrap().push(format!("{}:reset:{generation}", self.name));
        }
    }

    type Log = Arc<Mutex<Vec<String>>>;

    fn orchestrator(
        names: &[&'static str],
        failing: Option<&'static str>,
    ) -> (SelectionOrchestrator, Arc<SelectionStore>, Notifier, Log) {
        let selection = Arc::new(SelectionStore::new());
        let notifier = Notifier::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut orch = SelectionOrchestrator::new(selection.clone(), notifier.clone());
        for &name in names {
            let outcome = if Some(name) == failing {
                LoadOutcome::Failed {
                    message: "boom".into(),
                }
            } else {
                LoadOutcome::Ready
            };
            orch.register(Arc::new(Recorder {
                name,
                log: log.clone(),
                outcome,
                delay: Duration::from_millis(5),
            }));
        }
        (orch, selection, notifier, log)
    }

    #[tokio::test]
    async fn commit_without_country_loads_nothing() {
        let (orch, selection, notifier, log) = orchestrator(&["a", "b"], None);
        selection.select_year(2027);
        let before = selection.get();
        let mut notices = notifier.subscribe();

        let err = orch.commit().await.unwrap_err();

        assert!(matches!(err, CoreError::NoCountrySelected));
        assert_eq!(selection.get(), before);
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(orch.current_generation(), 0);
        let notice = notices.try_recv().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, SELECT_COUNTRY_FIRST);
    }

    #[tokio::test]
    async fn views_load_sequentially_in_registration_order() {
        let (orch, selection, _notifier, log) = orchestrator(&["a", "b", "c"], None);
        selection.select_country("Japan", "JP", "Tokyo", Some((35.68, 139.75)));

        orch.commit().await.unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            ["a:start:1", "a:end:1", "b:start:1", "b:end:1", "c:start:1", "c:end:1"]
        );
    }

    #[tokio::test]
    async fn one_failure_does_not_stop_the_rest() {
        let (orch, selection, notifier, _log) = orchestrator(&["a", "b", "c"], Some("b"));
        let mut notices = notifier.subscribe();
        selection.select_country("Japan", "JP", "Tokyo", None);

        let report = orch.commit().await.unwrap();

        assert_eq!(report.views.len(), 3);
        assert_eq!(report.outcome("c"), Some(&LoadOutcome::Ready));
        assert_eq!(report.failures().count(), 1);
        assert_eq!(orch.state(), ExploreState::Idle);

        let notice = notices.try_recv().unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, "Exploring Japan, Tokyo!");
    }

    #[tokio::test]
    async fn each_commit_gets_a_new_generation() {
        let (orch, selection, _notifier, _log) = orchestrator(&["a"], None);
        selection.select_country("Japan", "JP", "", None);

        let first = orch.commit().await.unwrap();
        let second = orch.commit().await.unwrap();

        assert_eq!((first.generation, second.generation), (1, 2));
        assert_eq!(second.destination, "Japan");
    }

    #[tokio::test]
    async fn reset_all_clears_selection_and_views() {
        let (orch, selection, _notifier, log) = orchestrator(&["a", "b"], None);
        selection.select_country("Japan", "JP", "Tokyo", None);
        orch.commit().await.unwrap();
        log.lock().unwrap().clear();

        orch.reset_all();

        assert!(!selection.get().has_country());
        assert_eq!(orch.state(), ExploreState::Idle);
        assert_eq!(*log.lock().unwrap(), ["a:reset:2", "b:reset:2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_during_commit_suppresses_success_notice() {
        let (orch, selection, notifier, _log) = orchestrator(&["a", "b"], None);
        let mut notices = notifier.subscribe();
        selection.select_country("Japan", "JP", "Tokyo", None);

        let (report, ()) = tokio::join!(orch.commit(), async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            orch.reset_all();
        });

        assert_eq!(report.unwrap().generation, 1);
        assert_eq!(orch.current_generation(), 2);
        assert_eq!(orch.state(), ExploreState::Idle);
        assert!(notices.try_recv().is_err());
    }
}
