// ── Dashboard facade ──
//
// Owns every piece of the explorer: provider clients, the selection, saved
// plans, notices, the six views, and the orchestrator that refreshes them.
// Cheaply cloneable via `Arc<DashboardInner>`.

use std::sync::Arc;

use tokio::sync::{OnceCell, broadcast, watch};
use tracing::{debug, warn};

use wayfarer_api::{
    NagerClient, OpenMeteoClient, RestCountriesClient, SunriseSunsetClient, TicketmasterClient,
    TransportConfig,
};

use crate::config::ServiceConfig;
use crate::error::CoreError;
use crate::favorite::FavoriteToggle;
use crate::model::{CountryOption, Plan};
use crate::notify::{Notice, Notifier};
use crate::orchestrator::{ExploreReport, ExploreState, SelectionOrchestrator};
use crate::provider::{
    CountryDirectory, CountryProvider, EventProvider, HolidayProvider, LongWeekendProvider,
    SunTimesProvider, WeatherProvider,
};
use crate::selection::{Selection, SelectionStore};
use crate::store::{BlobStore, FavoritesStore};
use crate::views::{
    DashboardView, EventsView, HolidaysView, LongWeekendsView, SunTimesView, WeatherView,
};

// ── Providers ────────────────────────────────────────────────────────

/// The data sources behind each view.
#[derive(Clone)]
pub struct Providers {
    pub directory: Arc<dyn CountryDirectory>,
    pub countries: Arc<dyn CountryProvider>,
    pub holidays: Arc<dyn HolidayProvider>,
    pub events: Arc<dyn EventProvider>,
    pub weather: Arc<dyn WeatherProvider>,
    pub long_weekends: Arc<dyn LongWeekendProvider>,
    pub sun_times: Arc<dyn SunTimesProvider>,
}

impl Providers {
    /// Build the public HTTP clients, sharing one connection pool.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            ..TransportConfig::default()
        };
        let http = transport.build_client()?;
        let endpoints = &config.endpoints;

        let nager = Arc::new(NagerClient::from_reqwest(&endpoints.nager, http.clone())?);
        let restcountries = Arc::new(RestCountriesClient::from_reqwest(
            &endpoints.restcountries,
            http.clone(),
        )?);
        let ticketmaster = Arc::new(TicketmasterClient::from_reqwest(
            &endpoints.ticketmaster,
            config.ticketmaster_api_key.clone(),
            http.clone(),
        )?);
        let open_meteo = Arc::new(OpenMeteoClient::from_reqwest(&endpoints.open_meteo, http.clone())?);
        let sunrise_sunset = Arc::new(SunriseSunsetClient::from_reqwest(
            &endpoints.sunrise_sunset,
            http,
        )?);

        if !ticketmaster.has_api_key() {
            debug!("no ticketmaster key configured, events will be unavailable");
        }

        Ok(Self {
            directory: nager.clone(),
            countries: restcountries,
            holidays: nager.clone(),
            events: ticketmaster,
            weather: open_meteo,
            long_weekends: nager,
            sun_times: sunrise_sunset,
        })
    }
}

// ── Dashboard ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    directory: Arc<dyn CountryDirectory>,
    countries: Arc<dyn CountryProvider>,
    country_options: OnceCell<Arc<Vec<CountryOption>>>,
    selection: Arc<SelectionStore>,
    favorites: Arc<FavoritesStore>,
    notifier: Notifier,
    overview: Arc<DashboardView>,
    holidays: Arc<HolidaysView>,
    events: Arc<EventsView>,
    weather: Arc<WeatherView>,
    long_weekends: Arc<LongWeekendsView>,
    sun_times: Arc<SunTimesView>,
    orchestrator: SelectionOrchestrator,
}

impl Dashboard {
    /// Build against the live providers described by `config`.
    pub fn new(config: &ServiceConfig, storage: Arc<dyn BlobStore>) -> Result<Self, CoreError> {
        Ok(Self::with_providers(Providers::from_config(config)?, storage))
    }

    /// Build from explicit providers. Saved plans are loaded from `storage`.
    pub fn with_providers(providers: Providers, storage: Arc<dyn BlobStore>) -> Self {
        let selection = Arc::new(SelectionStore::new());
        let favorites = Arc::new(FavoritesStore::load(storage));
        let notifier = Notifier::new();

        let overview = Arc::new(DashboardView::new(selection.clone(), providers.countries.clone()));
        let holidays = Arc::new(HolidaysView::new(selection.clone(), providers.holidays));
        let events = Arc::new(EventsView::new(selection.clone(), providers.events));
        let weather = Arc::new(WeatherView::new(selection.clone(), providers.weather));
        let long_weekends = Arc::new(LongWeekendsView::new(
            selection.clone(),
            providers.long_weekends,
        ));
        let sun_times = Arc::new(SunTimesView::new(selection.clone(), providers.sun_times));

        let mut orchestrator = SelectionOrchestrator::new(selection.clone(), notifier.clone());
        orchestrator.register(overview.clone());
        orchestrator.register(holidays.clone());
        orchestrator.register(events.clone());
        orchestrator.register(weather.clone());
        orchestrator.register(long_weekends.clone());
        orchestrator.register(sun_times.clone());

        Self {
            inner: Arc::new(DashboardInner {
                directory: providers.directory,
                countries: providers.countries,
                country_options: OnceCell::new(),
                selection,
                favorites,
                notifier,
                overview,
                holidays,
                events,
                weather,
                long_weekends,
                sun_times,
                orchestrator,
            }),
        }
    }

    // ── Country picker ───────────────────────────────────────────────

    /// Countries the holiday provider covers. Fetched once, then cached.
    pub async fn available_countries(&self) -> Result<Arc<Vec<CountryOption>>, CoreError> {
        let options = self
            .inner
            .country_options
            .get_or_try_init(|| async {
                let countries = self.inner.directory.available_countries().await?;
                debug!(count = countries.len(), "country list fetched");
                Ok::<_, CoreError>(Arc::new(
                    countries.into_iter().map(CountryOption::from).collect(),
                ))
            })
            .await?;
        Ok(Arc::clone(options))
    }

    /// Countries whose name starts with `prefix`, ignoring case.
    pub async fn search_countries(&self, prefix: &str) -> Result<Vec<CountryOption>, CoreError> {
        let prefix = prefix.trim().to_lowercase();
        Ok(self
            .available_countries()
            .await?
            .iter()
            .filter(|c| c.name.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect())
    }

    /// Select a country by ISO code, defaulting the city to its capital.
    ///
    /// A failed capital lookup still selects the country, with no city and
    /// no coordinates.
    pub async fn choose_country(&self, country_code: &str) -> Result<Selection, CoreError> {
        let options = self.available_countries().await?;
        let option = options
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(country_code))
            .ok_or_else(|| CoreError::CountryNotFound {
                code: country_code.to_owned(),
            })?;

        let (capital, coordinates) = match self.inner.countries.country(&option.code).await {
            Ok(details) => (
                details.capital.into_iter().next().unwrap_or_default(),
                details
                    .capital_info
                    .latitude()
                    .zip(details.capital_info.longitude()),
            ),
            Err(e) => {
                warn!(code = %option.code, error = %e, "capital lookup failed");
                (String::new(), None)
            }
        };

        self.inner
            .selection
            .select_country(&option.name, &option.code, &capital, coordinates);
        Ok(self.inner.selection.get())
    }

    pub fn choose_city(&self, city: &str) -> Selection {
        self.inner.selection.select_city(city.trim());
        self.inner.selection.get()
    }

    pub fn choose_year(&self, year: i32) -> Selection {
        self.inner.selection.select_year(year);
        self.inner.selection.get()
    }

    // ── Exploring ────────────────────────────────────────────────────

    pub async fn explore(&self) -> Result<ExploreReport, CoreError> {
        self.inner.orchestrator.commit().await
    }

    pub fn clear_selection(&self) {
        self.inner.orchestrator.reset_all();
    }

    pub fn explore_state(&self) -> ExploreState {
        self.inner.orchestrator.state()
    }

    pub fn subscribe_explore_state(&self) -> watch::Receiver<ExploreState> {
        self.inner.orchestrator.subscribe_state()
    }

    // ── Shared state ─────────────────────────────────────────────────

    pub fn selection(&self) -> Selection {
        self.inner.selection.get()
    }

    pub fn selection_store(&self) -> &Arc<SelectionStore> {
        &self.inner.selection
    }

    pub fn favorites(&self) -> &Arc<FavoritesStore> {
        &self.inner.favorites
    }

    /// A save affordance for `plan`, bound to this dashboard's favorites.
    pub fn favorite_toggle(&self, plan: Plan) -> FavoriteToggle {
        FavoriteToggle::attach(
            self.inner.favorites.clone(),
            self.inner.notifier.clone(),
            plan,
        )
    }

    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.inner.notifier.subscribe()
    }

    // ── Views ────────────────────────────────────────────────────────

    pub fn overview(&self) -> &DashboardView {
        &self.inner.overview
    }

    pub fn holidays(&self) -> &HolidaysView {
        &self.inner.holidays
    }

    pub fn events(&self) -> &EventsView {
        &self.inner.events
    }

    pub fn weather(&self) -> &WeatherView {
        &self.inner.weather
    }

    pub fn long_weekends(&self) -> &LongWeekendsView {
        &self.inner.long_weekends
    }

    pub fn sun_times(&self) -> &SunTimesView {
        &self.inner.sun_times
    }
}
