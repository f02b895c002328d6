//! Manual check of the three catalog operations against the live API.
//!
//! Usage: `POLY_PIZZA_API_KEY=... polyscene-probe [keyword] [username]`

use polyscene::{CatalogClient, Filters};

const DEFAULT_KEYWORD: &str = "cat";
const DEFAULT_CATEGORY: i64 = 7;
const DEFAULT_USER: &str = "dook";

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let client = match CatalogClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            log::error!("Cannot build catalog client: {}", e);
            std::process::exit(2);
        }
    };

    let mut args = std::env::args().skip(1);
    let keyword = args.next().unwrap_or_else(|| DEFAULT_KEYWORD.to_string());
    let username = args.next().unwrap_or_else(|| DEFAULT_USER.to_string());

    log::info!("Testing search_models...");
    let filters = Filters::new().with("Category", DEFAULT_CATEGORY);
    let results = client.search_models(&keyword, &filters).await;
    log::info!("Search results for '{}': {} model(s)", keyword, results.len());
    for model in &results {
        log::info!("  {} {} -> {}", model.id, model.title, model.download);
    }

    if let Some(first) = results.first() {
        log::info!("Testing get_model_by_id...");
        match client.get_model_by_id(&first.id).await {
            Some(detail) => log::info!("Model details: {:#?}", detail),
            None => log::info!("Model details: none"),
        }
    }

    log::info!("Testing get_models_by_user...");
    let models = client.get_models_by_user(&username, &Filters::new()).await;
    log::info!("Models by '{}': {} model(s)", username, models.len());
    for model in &models {
        log::info!("  {} {}", model.id, model.title);
    }
}
