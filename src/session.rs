//! App controller: scene state plus debounced catalog search.
//!
//! Search text changes restart a quiet-period timer; when the timer runs out
//! one search goes to the catalog. Pending timers are cancelled by newer
//! edits, requests already sent are not.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::catalog::{Catalog, Filters, ModelSummary};
use crate::config::{SceneDefaults, SessionConfig};
use crate::scene::{ActiveObject, GestureEvent, Scene};

/// Point-in-time copy of everything the UI renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub object: ActiveObject,
    pub label: String,
    pub label_position: [f32; 3],
    pub query: String,
    pub results: Vec<ModelSummary>,
    pub loading: bool,
}

struct SessionState {
    scene: Scene,
    query: String,
    /// Sent with every search
    filters: Filters,
    results: Vec<ModelSummary>,
    /// Searches sent and not yet answered
    in_flight: usize,
    /// Bumped on every query edit; a timer only fires if it is still current
    edit_generation: u64,
    /// Sequence number of the most recently sent search
    latest_search: u64,
}

/// Controller owning the scene and the search results.
pub struct Session<C: Catalog + 'static> {
    catalog: Arc<C>,
    config: SessionConfig,
    state: Arc<Mutex<SessionState>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<C: Catalog + 'static> Session<C> {
    pub fn new(catalog: C, config: SessionConfig, defaults: SceneDefaults) -> Self {
        let scene = Scene::new(defaults, config.rotation_sensitivity);
        let filters = config.filters.clone();
        Self {
            catalog: Arc::new(catalog),
            config,
            state: Arc::new(Mutex::new(SessionState {
                scene,
                query: String::new(),
                filters,
                results: Vec::new(),
                in_flight: 0,
                edit_generation: 0,
                latest_search: 0,
            })),
            pending: Mutex::new(None),
        }
    }

    pub fn with_defaults(catalog: C) -> Self {
        Self::new(catalog, SessionConfig::default(), SceneDefaults::default())
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Replace the filters sent with subsequent searches.
    pub fn set_filters(&self, filters: Filters) {
        lock(&self.state).filters = filters;
    }

    /// Record new search text and (re)schedule the debounced search.
    ///
    /// Must be called from within a tokio runtime. Blank text cancels any
    /// pending search and schedules nothing.
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        let (generation, filters) = {
            let mut state = lock(&self.state);
            state.query = text.clone();
            state.edit_generation += 1;
            (state.edit_generation, state.filters.clone())
        };

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let keyword = text.trim().to_string();
        if keyword.is_empty() {
            return;
        }

        let search = PendingSearch {
            catalog: Arc::clone(&self.catalog),
            state: Arc::clone(&self.state),
            filters,
            discard_stale: self.config.discard_stale_responses,
            generation,
            keyword,
        };
        let delay = self.config.debounce;

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            search.send();
        }));
    }

    /// Forward a gesture callback from the AR surface.
    pub fn apply_gesture(&self, event: GestureEvent) {
        lock(&self.state).scene.apply(event);
    }

    /// Display a model. Its download URI becomes the active asset.
    pub fn select(&self, model: &ModelSummary) {
        lock(&self.state).scene.select(model);
    }

    /// Display the `index`-th current result; returns false if out of range.
    pub fn select_result(&self, index: usize) -> bool {
        let mut state = lock(&self.state);
        let Some(model) = state.results.get(index).cloned() else {
            return false;
        };
        state.scene.select(&model);
        true
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).in_flight > 0
    }

    pub fn results(&self) -> Vec<ModelSummary> {
        lock(&self.state).results.clone()
    }

    pub fn object(&self) -> ActiveObject {
        lock(&self.state).scene.object().clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = lock(&self.state);
        SessionSnapshot {
            object: state.scene.object().clone(),
            label: state.scene.label().to_string(),
            label_position: state.scene.label_position(),
            query: state.query.clone(),
            results: state.results.clone(),
            loading: state.in_flight > 0,
        }
    }
}

impl<C: Catalog + 'static> Drop for Session<C> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}

/// A search waiting out its debounce delay.
struct PendingSearch<C: Catalog + 'static> {
    catalog: Arc<C>,
    state: Arc<Mutex<SessionState>>,
    filters: Filters,
    discard_stale: bool,
    generation: u64,
    keyword: String,
}

impl<C: Catalog + 'static> PendingSearch<C> {
    /// Send the request on its own task so that later edits cannot cancel it.
    fn send(self) {
        let search_id = {
            let mut state = lock(&self.state);
            if state.edit_generation != self.generation {
                return;
            }
            state.in_flight += 1;
            state.latest_search += 1;
            state.latest_search
        };

        log::debug!("Searching catalog for '{}' (search #{})", self.keyword, search_id);

        let in_flight = InFlight::new(Arc::clone(&self.state));
        tokio::spawn(async move {
            let results = self.catalog.search_models(&self.keyword, &self.filters).await;

            let mut state = lock(&self.state);
            in_flight.finish(&mut state);

            if self.discard_stale && search_id != state.latest_search {
                log::debug!(
                    "Discarding stale results for '{}' (search #{}, latest #{})",
                    self.keyword,
                    search_id,
                    state.latest_search
                );
                return;
            }

            log::debug!("Search '{}' returned {} result(s)", self.keyword, results.len());
            state.results = results;
        });
    }
}

/// Counts one outstanding search; released on completion, panic or cancellation.
struct InFlight {
    state: Option<Arc<Mutex<SessionState>>>,
}

impl InFlight {
    fn new(state: Arc<Mutex<SessionState>>) -> Self {
        Self { state: Some(state) }
    }

    /// Release while the caller already holds the state lock.
    fn finish(mut self, state: &mut SessionState) {
        self.state = None;
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Some(shared) = self.state.take() {
            let mut state = lock(&shared);
            state.in_flight = state.in_flight.saturating_sub(1);
            log::warn!("Catalog search ended without a result");
        }
    }
}

/// Lock session state, recovering it if a holder panicked.
fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}
