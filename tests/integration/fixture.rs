use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use polyscene::{Catalog, CatalogClient, CatalogConfig, Filters, ModelDetail, ModelSummary};
use tokio::time::Instant;
use wiremock::MockServer;

pub(crate) const API_KEY: &str = "test-key";

/// Mock server plus a client pointed at its `/v1.1` prefix.
pub(crate) async fn mock_catalog() -> (MockServer, CatalogClient) {
    let server = MockServer::start().await;
    let config = CatalogConfig::new(API_KEY)
        .with_base_url(format!("{}/v1.1", server.uri()))
        .with_timeout(Duration::from_secs(5));
    let client = CatalogClient::new(&config).expect("Failed to build client");
    (server, client)
}

pub(crate) fn model_json(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "ID": id,
        "Title": title,
        "Thumbnail": format!("https://static.poly.pizza/{}.webp", id),
        "Download": format!("https://static.poly.pizza/{}.glb", id),
    })
}

pub(crate) fn summary(id: &str, title: &str) -> ModelSummary {
    serde_json::from_value(model_json(id, title)).expect("valid summary")
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedSearch {
    pub keyword: String,
    pub filters: Filters,
    pub at: Instant,
}

/// In-memory catalog recording every search it receives.
#[derive(Clone, Default)]
pub(crate) struct RecordingCatalog {
    searches: Arc<Mutex<Vec<RecordedSearch>>>,
    responses: Arc<Mutex<HashMap<String, (Duration, Vec<ModelSummary>)>>>,
}

impl RecordingCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answer searches for `keyword` with `results` after `delay`.
    pub(crate) fn respond(&self, keyword: &str, delay: Duration, results: Vec<ModelSummary>) {
        self.responses
            .lock()
            .unwrap()
            .insert(keyword.to_string(), (delay, results));
    }

    pub(crate) fn searches(&self) -> Vec<RecordedSearch> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl Catalog for RecordingCatalog {
    async fn search_models(&self, keyword: &str, filters: &Filters) -> Vec<ModelSummary> {
        self.searches.lock().unwrap().push(RecordedSearch {
            keyword: keyword.to_string(),
            filters: filters.clone(),
            at: Instant::now(),
        });

        let response = self.responses.lock().unwrap().get(keyword).cloned();
        match response {
            Some((delay, results)) => {
                tokio::time::sleep(delay).await;
                results
            }
            None => Vec::new(),
        }
    }

    async fn get_model_by_id(&self, _id: &str) -> Option<ModelDetail> {
        None
    }

    async fn get_models_by_user(&self, _username: &str, _filters: &Filters) -> Vec<ModelSummary> {
        Vec::new()
    }
}

/// Catalog whose searches always panic.
pub(crate) struct PanickingCatalog;

#[async_trait]
impl Catalog for PanickingCatalog {
    async fn search_models(&self, keyword: &str, _filters: &Filters) -> Vec<ModelSummary> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        panic!("search for '{}' blew up", keyword);
    }

    async fn get_model_by_id(&self, _id: &str) -> Option<ModelDetail> {
        None
    }

    async fn get_models_by_user(&self, _username: &str, _filters: &Filters) -> Vec<ModelSummary> {
        Vec::new()
    }
}
