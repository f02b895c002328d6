//! Catalog client against a mocked Poly Pizza API.

use std::time::Duration;

use polyscene::{CatalogClient, CatalogConfig, CatalogError, Filters};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::fixture::{mock_catalog, model_json, API_KEY};

#[tokio::test]
async fn test_search_models_with_filters() {
    let (server, client) = mock_catalog().await;

    Mock::given(method("GET"))
        .and(path("/v1.1/search/duck"))
        .and(query_param("category", "7"))
        .and(header("x-auth-token", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{"ID": "1", "Title": "Duck", "Thumbnail": "t", "Download": "d"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filters = Filters::new().with("category", 7);
    let results = client.search_models("duck", &filters).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "1");
    assert_eq!(results[0].title, "Duck");
    assert_eq!(results[0].thumbnail, "t");
    assert_eq!(results[0].download, "d");
}

#[tokio::test]
async fn test_search_models_server_error_is_empty() {
    let (server, client) = mock_catalog().await;

    Mock::given(method("GET"))
        .and(path("/v1.1/search/duck"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let filters = Filters::new().with("category", 7);
    assert!(client.search_models("duck", &filters).await.is_empty());

    match client.try_search_models("duck", &filters).await {
        Err(CatalogError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
        }
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_keyword_is_percent_encoded() {
    let (server, client) = mock_catalog().await;

    Mock::given(method("GET"))
        .and(path("/v1.1/search/red%20car%2Fbus%3F%23"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [model_json("9", "Red car")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = client.search_models("red car/bus?#", &Filters::new()).await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Red car");
}

#[tokio::test]
async fn test_search_malformed_json_is_empty() {
    let (server, client) = mock_catalog().await;

    Mock::given(method("GET"))
        .and(path("/v1.1/search/duck"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    assert!(client.search_models("duck", &Filters::new()).await.is_empty());
    assert!(matches!(
        client.try_search_models("duck", &Filters::new()).await,
        Err(CatalogError::Decode(_))
    ));
}

#[tokio::test]
async fn test_get_model_by_id() {
    let (server, client) = mock_catalog().await;

    let mut body = model_json("abc123", "Cat");
    body["Licence"] = serde_json::json!("CC0");
    body["Creator"] = serde_json::json!({"Username": "dook"});

    Mock::given(method("GET"))
        .and(path("/v1.1/model/abc123"))
        .and(header("x-auth-token", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let detail = client.get_model_by_id("abc123").await.expect("model");
    assert_eq!(detail.id(), "abc123");
    assert_eq!(detail.licence().as_deref(), Some("CC0"));
    assert_eq!(detail.creator().map(|c| c.username), Some("dook".to_string()));
}

#[tokio::test]
async fn test_search_keeps_records_with_null_fields() {
    let (server, client) = mock_catalog().await;

    let mut odd = model_json("2", "ignored");
    odd["Title"] = serde_json::Value::Null;
    odd["Tags"] = serde_json::Value::Null;

    Mock::given(method("GET"))
        .and(path("/v1.1/search/duck"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [model_json("1", "Duck"), odd]
        })))
        .mount(&server)
        .await;

    let results = client.search_models("duck", &Filters::new()).await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].id, "2");
    assert_eq!(results[1].title, "");
    assert_eq!(results[1].download, "https://static.poly.pizza/2.glb");
}

#[tokio::test]
async fn test_get_model_by_id_tolerates_unexpected_types() {
    let (server, client) = mock_catalog().await;

    let mut body = model_json("abc123", "Cat");
    body["Tags"] = serde_json::Value::Null;
    body["Category"] = serde_json::json!(7);

    Mock::given(method("GET"))
        .and(path("/v1.1/model/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let detail = client
        .try_get_model_by_id("abc123")
        .await
        .expect("model should decode");
    assert_eq!(detail.title(), "Cat");
    assert!(detail.tags().is_empty());
    assert_eq!(detail.category().as_deref(), Some("7"));
    assert!(client.get_model_by_id("abc123").await.is_some());
}

#[tokio::test]
async fn test_get_model_by_id_not_found_is_none() {
    let (server, client) = mock_catalog().await;

    Mock::given(method("GET"))
        .and(path("/v1.1/model/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(client.get_model_by_id("missing").await.is_none());
    let err = client.try_get_model_by_id("missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_get_models_by_user() {
    let (server, client) = mock_catalog().await;

    Mock::given(method("GET"))
        .and(path("/v1.1/user/dook"))
        .and(query_param("Limit", "2"))
        .and(header("x-auth-token", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total": 2,
            "models": [model_json("a", "Cat"), model_json("b", "Dog")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let models = client
        .get_models_by_user("dook", &Filters::new().with("Limit", 2))
        .await;
    let ids: Vec<_> = models.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn test_get_models_by_user_failure_is_empty() {
    let (server, client) = mock_catalog().await;

    Mock::given(method("GET"))
        .and(path("/v1.1/user/nobody"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert!(client
        .get_models_by_user("nobody", &Filters::new())
        .await
        .is_empty());
}

#[tokio::test]
async fn test_unreachable_server_is_empty() {
    let config = CatalogConfig::new(API_KEY)
        .with_base_url("http://127.0.0.1:1/v1.1")
        .with_timeout(Duration::from_secs(2));
    let client = CatalogClient::new(&config).unwrap();

    assert!(client.search_models("duck", &Filters::new()).await.is_empty());
    assert!(client.get_model_by_id("1").await.is_none());
    assert!(matches!(
        client.try_search_models("duck", &Filters::new()).await,
        Err(CatalogError::Transport(_))
    ));
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let (server, client) = mock_catalog().await;

    for (keyword, id) in [("cat", "c"), ("dog", "d"), ("fox", "f")] {
        Mock::given(method("GET"))
            .and(path(format!("/v1.1/search/{}", keyword)))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [model_json(id, keyword)]
            })))
            .mount(&server)
            .await;
    }

    let filters = Filters::new();
    let (cats, dogs, foxes) = tokio::join!(
        client.search_models("cat", &filters),
        client.search_models("dog", &filters),
        client.search_models("fox", &filters),
    );

    assert_eq!(cats[0].id, "c");
    assert_eq!(dogs[0].id, "d");
    assert_eq!(foxes[0].id, "f");
}
