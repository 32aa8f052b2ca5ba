// ── Save affordance for a displayed card ──
//
// Each holiday, event, or long-weekend card carries one of these. It
// mirrors whether the card's plan is saved and turns a click into a save.
// Clicking an already-saved card only reminds the user; removal happens
// from the plans list.

use std::sync::Arc;

use tracing::warn;

use crate::model::Plan;
use crate::notify::Notifier;
use crate::store::FavoritesStore;

pub const SAVED_NOTICE: &str = "Saved to My Plans!";
pub const ALREADY_SAVED_NOTICE: &str = "Plan already in My Plans!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Saved,
    AlreadySaved,
}

#[derive(Debug)]
pub struct FavoriteToggle {
    store: Arc<FavoritesStore>,
    notifier: Notifier,
    plan: Plan,
    saved: bool,
}

impl FavoriteToggle {
    /// Bind a toggle to `plan`, reflecting its current saved state.
    pub fn attach(store: Arc<FavoritesStore>, notifier: Notifier, plan: Plan) -> Self {
        let saved = store.is_saved(&plan);
        Self {
            store,
            notifier,
            plan,
            saved,
        }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Save the plan, or remind the user it is already saved.
    ///
    /// A failed write is logged by the store; the in-memory save stands,
    /// so the toggle still reports `Saved`.
    pub fn toggle(&mut self) -> ToggleOutcome {
        if self.saved {
            self.notifier.info(ALREADY_SAVED_NOTICE);
            return ToggleOutcome::AlreadySaved;
        }

        if let Err(e) = self.store.add(self.plan.clone()) {
            warn!(error = %e, plan = %self.plan, "plan saved for this session only");
        }
        self.saved = true;
        self.notifier.success(SAVED_NOTICE);
        ToggleOutcome::Saved
    }

    /// Re-read the saved state, e.g. after the plan was removed elsewhere.
    pub fn refresh(&mut self) {
        self.saved = self.store.is_saved(&self.plan);
    }
}
