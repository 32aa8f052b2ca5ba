// ── Shared destination selection ──
//
// The single source of truth for "what are we looking at". Every view
// updater reads from here at load time; nothing caches a copy.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Year used when nothing else has been chosen.
pub const DEFAULT_YEAR: i32 = 2026;

/// The destination the user is exploring.
///
/// Empty strings mean "not chosen". Coordinates are those of the capital
/// (or the chosen city) and may be unknown even when a country is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub country: String,
    pub country_code: String,
    pub city: String,
    pub year: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            country: String::new(),
            country_code: String::new(),
            city: String::new(),
            year: DEFAULT_YEAR,
            latitude: None,
            longitude: None,
        }
    }
}

impl Selection {
    pub fn has_country(&self) -> bool {
        !self.country_code.is_empty()
    }

    pub fn has_city(&self) -> bool {
        !self.city.is_empty()
    }

    /// `(latitude, longitude)` when both are known.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// "Country" or "Country, City".
    pub fn destination(&self) -> String {
        if self.has_city() {
            format!("{}, {}", self.country, self.city)
        } else {
            self.country.clone()
        }
    }
}

/// Observable holder for the current [`Selection`].
///
/// Writes replace the whole record in one step, so a subscriber never
/// sees a half-updated selection.
#[derive(Debug)]
pub struct SelectionStore {
    tx: watch::Sender<Selection>,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Selection::default());
        Self { tx }
    }

    pub fn get(&self) -> Selection {
        self.tx.borrow().clone()
    }

    pub fn set(&self, selection: Selection) {
        self.tx.send_replace(selection);
    }

    /// Back to the empty selection with [`DEFAULT_YEAR`].
    pub fn clear(&self) {
        self.tx.send_replace(Selection::default());
    }

    pub fn subscribe(&self) -> watch::Receiver<Selection> {
        self.tx.subscribe()
    }

    /// Choose a country. The city becomes its capital; the year is kept.
    pub fn select_country(
        &self,
        country: &str,
        country_code: &str,
        capital: &str,
        coordinates: Option<(f64, f64)>,
    ) {
        self.tx.send_modify(|s| {
            s.country = country.to_owned();
            s.country_code = country_code.to_owned();
            s.city = capital.to_owned();
            s.latitude = coordinates.map(|c| c.0);
            s.longitude = coordinates.map(|c| c.1);
        });
    }

    pub fn select_city(&self, city: &str) {
        self.tx.send_modify(|s| city.clone_into(&mut s.city));
    }

    pub fn select_year(&self, year: i32) {
        self.tx.send_modify(|s| s.year = year);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_with_default_year() {
        let store = SelectionStore::new();
        let s = store.get();
        assert!(!s.has_country());
        assert_eq!(s.year, DEFAULT_YEAR);
        assert_eq!(s.coordinates(), None);
    }

    #[test]
    fn set_replaces_every_field() {
        let store = SelectionStore::new();
        store.set(Selection {
            country: "Japan".into(),
            country_code: "JP".into(),
            city: "Tokyo".into(),
            year: 2027,
            latitude: Some(35.68),
            longitude: Some(139.75),
        });

        let s = store.get();
        assert_eq!(s.country_code, "JP");
        assert_eq!(s.year, 2027);
        assert_eq!(s.coordinates(), Some((35.68, 139.75)));
        assert_eq!(s.destination(), "Japan, Tokyo");
    }

    #[test]
    fn clear_restores_defaults() {
        let store = SelectionStore::new();
        store.select_country("France", "FR", "Paris", Some((48.87, 2.33)));
        store.select_year(2030);
        store.clear();
        assert_eq!(store.get(), Selection::default());
    }

    #[test]
    fn select_country_keeps_year() {
        let store = SelectionStore::new();
        store.select_year(2028);
        store.select_country("Germany", "DE", "Berlin", None);

        let s = store.get();
        assert_eq!(s.year, 2028);
        assert_eq!(s.city, "Berlin");
        assert_eq!(s.destination(), "Germany, Berlin");
    }

    #[test]
    fn destination_without_city_is_country_only() {
        let store = SelectionStore::new();
        store.select_country("Iceland", "IS", "", None);
        assert_eq!(store.get().destination(), "Iceland");
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let store = SelectionStore::new();
        let mut rx = store.subscribe();
        store.select_city("Osaka");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().city, "Osaka");
    }
}
