// ── Saved plans collection ──
//
// In-memory list of plans, written through to a `BlobStore` after every
// mutation. Memory is always updated first: a failed write leaves the
// session consistent and is reported to the caller. Mutations are
// serialized so the stored blob always follows the latest in-memory list.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, warn};

use super::blob::BlobStore;
use crate::error::CoreError;
use crate::model::{Plan, PlanCounts, PlanFilter};

/// The user's saved plans, in insertion order, with no two entries
/// satisfying [`Plan::same_plan`].
pub struct FavoritesStore {
    storage: Arc<dyn BlobStore>,
    plans: watch::Sender<Arc<Vec<Plan>>>,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("plans", &self.plans.borrow().len())
            .finish_non_exhaustive()
    }
}

impl FavoritesStore {
    /// Storage key holding the serialized plan list.
    pub const STORAGE_KEY: &'static str = "myPlans";

    /// Load saved plans. Never fails: a missing, unreadable, or malformed
    /// blob starts an empty collection. Equivalent entries in the blob are
    /// collapsed to the first occurrence.
    pub fn load(storage: Arc<dyn BlobStore>) -> Self {
        let stored = match storage.read(Self::STORAGE_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<Plan>>(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "stored plans are malformed, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read stored plans, starting empty");
                Vec::new()
            }
        };

        let mut plans: Vec<Plan> = Vec::with_capacity(stored.len());
        for plan in stored {
            if plans.iter().any(|p| p.same_plan(&plan)) {
                warn!(plan = %plan.display_id(), "dropping duplicate stored plan");
                continue;
            }
            plans.push(plan);
        }
        debug!(count = plans.len(), "plans loaded");

        let (tx, _rx) = watch::channel(Arc::new(plans));
        Self {
            storage,
            plans: tx,
            write_lock: Mutex::new(()),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn plans(&self) -> Arc<Vec<Plan>> {
        Arc::clone(&self.plans.borrow())
    }

    pub fn len(&self) -> usize {
        self.plans.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.borrow().is_empty()
    }

    pub fn is_saved(&self, candidate: &Plan) -> bool {
        self.plans.borrow().iter().any(|p| p.same_plan(candidate))
    }

    pub fn filtered(&self, filter: PlanFilter) -> Vec<Plan> {
        self.plans
            .borrow()
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    pub fn counts(&self) -> PlanCounts {
        PlanCounts::tally(self.plans.borrow().iter())
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Plan>>> {
        self.plans.subscribe()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Append `candidate` unless an equivalent plan is already saved.
    ///
    /// Returns `Ok(false)` for a duplicate (nothing written).
    pub fn add(&self, candidate: Plan) -> Result<bool, CoreError> {
        let _guard = self.lock_writes();
        let added = self.plans.send_if_modified(|plans| {
            if plans.iter().any(|p| p.same_plan(&candidate)) {
                return false;
            }
            Arc::make_mut(plans).push(candidate);
            true
        });
        if added {
            self.persist()?;
        }
        Ok(added)
    }

    /// Remove every plan equivalent to `candidate`. Returns how many went.
    pub fn remove(&self, candidate: &Plan) -> Result<usize, CoreError> {
        let _guard = self.lock_writes();
        let mut removed = 0;
        self.plans.send_if_modified(|plans| {
            let before = plans.len();
            if !plans.iter().any(|p| p.same_plan(candidate)) {
                return false;
            }
            Arc::make_mut(plans).retain(|p| !p.same_plan(candidate));
            removed = before - plans.len();
            true
        });
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Drop everything and delete the stored blob. Returns how many went.
    pub fn clear_all(&self) -> Result<usize, CoreError> {
        let _guard = self.lock_writes();
        let previous = self.plans.send_replace(Arc::new(Vec::new()));
        self.storage
            .remove(Self::STORAGE_KEY)
            .inspect_err(|e| warn!(error = %e, "failed to remove stored plans"))?;
        Ok(previous.len())
    }

    // Held across mutate and write so blobs land in mutation order.
    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self) -> Result<(), CoreError> {
        let snapshot = self.plans();
        let raw = serde_json::to_string(snapshot.as_ref()).map_err(|e| CoreError::Persistence {
            key: Self::STORAGE_KEY.into(),
            reason: e.to_string(),
        })?;
        self.storage
            .write(Self::STORAGE_KEY, &raw)
            .inspect_err(|e| warn!(error = %e, "failed to persist plans"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::PlanKind;
    use crate::store::{FileBlobStore, MemoryBlobStore};

    struct ReadOnlyStore;

    impl BlobStore for ReadOnlyStore {
        fn read(&self, _key: &str) -> Result<Option<String>, CoreError> {
            Ok(None)
        }
        fn write(&self, key: &str, _value: &str) -> Result<(), CoreError> {
            Err(CoreError::Persistence {
                key: key.into(),
                reason: "quota exceeded".into(),
            })
        }
        fn remove(&self, _key: &str) -> Result<(), CoreError> {
            Ok(())
        }
    }

    /// Stalls the first write so a concurrent mutation can overtake it.
    #[derive(Default)]
    struct SlowFirstWrite {
        inner: MemoryBlobStore,
        stalled: AtomicBool,
    }

    impl BlobStore for SlowFirstWrite {
        fn read(&self, key: &str) -> Result<Option<String>, CoreError> {
            self.inner.read(key)
        }
        fn write(&self, key: &str, value: &str) -> Result<(), CoreError> {
            if !self.stalled.swap(true, Ordering::SeqCst) {
                thread::sleep(Duration::from_millis(100));
            }
            self.inner.write(key, value)
        }
        fn remove(&self, key: &str) -> Result<(), CoreError> {
            self.inner.remove(key)
        }
    }

    fn holiday(name: &str, date: &str) -> Plan {
        Plan::Holiday {
            name: name.into(),
            local_name: name.into(),
            date: date.into(),
            country: "Germany".into(),
        }
    }

    fn event(name: &str) -> Plan {
        Plan::Event {
            name: name.into(),
            date: "2026-07-01T19:00:00Z".into(),
            city: "Berlin".into(),
            country: "Germany".into(),
        }
    }

    fn weekend(start: &str) -> Plan {
        Plan::LongWeekend {
            name: None,
            start_date: start.into(),
            end_date: "2026-04-06".into(),
            day_count: 4,
            need_bridge_day: true,
            country: "Germany".into(),
        }
    }

    fn memory() -> (Arc<MemoryBlobStore>, FavoritesStore) {
        let storage = Arc::new(MemoryBlobStore::new());
        let store = FavoritesStore::load(storage.clone());
        (storage, store)
    }

    #[test]
    fn add_is_idempotent() {
        let (_, store) = memory();
        assert!(store.add(holiday("New Year", "2026-01-01")).unwrap());
        assert!(!store.add(holiday("New Year", "2026-01-01")).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn add_dedups_by_name_across_dates() {
        let (_, store) = memory();
        store.add(holiday("X", "2026-01-01")).unwrap();
        store.add(holiday("X", "2026-06-01")).unwrap();
        assert_eq!(store.plans().as_slice(), [holiday("X", "2026-01-01")]);
    }

    #[test]
    fn same_name_different_kind_both_kept() {
        let (_, store) = memory();
        store.add(holiday("Festival", "2026-08-01")).unwrap();
        store.add(event("Festival")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn mutations_write_through() {
        let (storage, store) = memory();
        store.add(weekend("2026-04-03")).unwrap();

        let raw = storage.read(FavoritesStore::STORAGE_KEY).unwrap().unwrap();
        let stored: Vec<Plan> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, [weekend("2026-04-03")]);
    }

    #[test]
    fn reload_restores_the_same_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let storage: Arc<dyn BlobStore> = Arc::new(FileBlobStore::new(dir.path()));

        let store = FavoritesStore::load(storage.clone());
        store.add(holiday("A", "2026-01-01")).unwrap();
        store.add(event("B")).unwrap();
        store.add(weekend("2026-04-03")).unwrap();

        let reloaded = FavoritesStore::load(storage);
        assert_eq!(reloaded.plans(), store.plans());
    }

    #[test]
    fn malformed_blob_loads_empty() {
        let storage = Arc::new(MemoryBlobStore::with_entry(
            FavoritesStore::STORAGE_KEY,
            "{not json",
        ));
        let store = FavoritesStore::load(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn remove_drops_all_equivalents() {
        let (_, store) = memory();
        store.add(holiday("A", "2026-01-01")).unwrap();
        store.add(holiday("B", "2026-02-01")).unwrap();

        assert_eq!(store.remove(&holiday("A", "1999-12-31")).unwrap(), 1);
        assert_eq!(store.remove(&holiday("A", "1999-12-31")).unwrap(), 0);
        assert_eq!(store.plans().as_slice(), [holiday("B", "2026-02-01")]);
    }

    #[test]
    fn clear_all_removes_blob() {
        let (storage, store) = memory();
        store.add(holiday("A", "2026-01-01")).unwrap();
        store.add(event("B")).unwrap();

        assert_eq!(store.clear_all().unwrap(), 2);
        assert!(store.is_empty());
        assert_eq!(store.counts(), PlanCounts::default());
        assert_eq!(storage.read(FavoritesStore::STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn duplicate_stored_entries_collapse_on_load() {
        let raw = serde_json::to_string(&[
            holiday("A", "2026-01-01"),
            event("B"),
            holiday("A", "2026-05-01"),
        ])
        .unwrap();
        let storage = Arc::new(MemoryBlobStore::with_entry(FavoritesStore::STORAGE_KEY, &raw));

        let store = FavoritesStore::load(storage);

        assert_eq!(store.plans().as_slice(), [holiday("A", "2026-01-01"), event("B")]);
    }

    #[test]
    fn concurrent_adds_persist_the_latest_list() {
        let storage = Arc::new(SlowFirstWrite::default());
        let store = FavoritesStore::load(storage.clone());

        thread::scope(|s| {
            s.spawn(|| store.add(holiday("A", "2026-01-01")).unwrap());
            thread::sleep(Duration::from_millis(20));
            s.spawn(|| store.add(event("B")).unwrap());
        });

        let raw = storage.read(FavoritesStore::STORAGE_KEY).unwrap().unwrap();
        let stored: Vec<Plan> = serde_json::from_str(&raw).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(stored.as_slice(), store.plans().as_slice());
    }

    #[test]
    fn filter_and_counts_partition_by_kind() {
        let (_, store) = memory();
        store.add(holiday("A", "2026-01-01")).unwrap();
        store.add(event("B")).unwrap();
        store.add(weekend("2026-04-03")).unwrap();
        store.add(weekend("2026-05-01")).unwrap();

        let weekends = store.filtered(PlanFilter::Kind(PlanKind::LongWeekend));
        assert_eq!(weekends.len(), 2);
        assert!(weekends.iter().all(|p| p.kind() == PlanKind::LongWeekend));
        assert_eq!(store.filtered(PlanFilter::All).len(), 4);

        let counts = store.counts();
        assert_eq!((counts.all, counts.holiday, counts.event, counts.long_weekend), (4, 1, 1, 2));
    }

    #[test]
    fn failed_write_keeps_memory_and_reports() {
        let store = FavoritesStore::load(Arc::new(ReadOnlyStore));
        let err = store.add(event("Concert")).unwrap_err();

        assert!(matches!(err, CoreError::Persistence { .. }));
        assert!(store.is_saved(&event("Concert")));
    }

    #[tokio::test]
    async fn subscribers_see_additions() {
        let (_, store) = memory();
        let mut rx = store.subscribe();
        store.add(event("Concert")).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);
    }
}
