// wayfarer-core: Selection, saved plans, and view orchestration between
// wayfarer-api and the front ends.

pub mod config;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod favorite;
pub mod model;
pub mod notify;
pub mod orchestrator;
pub mod provider;
pub mod selection;
pub mod store;
pub mod views;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ProviderEndpoints, ServiceConfig};
pub use dashboard::{Dashboard, Providers};
pub use error::CoreError;
pub use favorite::{FavoriteToggle, ToggleOutcome};
pub use notify::{Notice, NoticeLevel, Notifier};
pub use orchestrator::{ExploreReport, ExploreState, SelectionOrchestrator, ViewOutcome};
pub use selection::{DEFAULT_YEAR, Selection, SelectionStore};
pub use store::{BlobStore, FavoritesStore, FileBlobStore, MemoryBlobStore};
pub use views::{LoadOutcome, ViewSlot, ViewSnapshot, ViewState, ViewUpdater};

pub use model::{Plan, PlanCounts, PlanFilter, PlanKind};
