//! SerperSearchProvider and the search router against a local HTTP double.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::ErrorResponse;
use domain_search::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn provider(server: &MockServer) -> SerperSearchProvider {
    SerperSearchProvider::new(SearchConfig::new(
        format!("{}/search", server.uri()),
        "test-key",
    ))
    .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn posts_query_with_api_key_and_maps_organic_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("X-API-KEY", "test-key"))
        .and(body_json(json!({ "q": "p0420 code", "num": 2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchParameters": { "q": "p0420 code" },
            "organic": [
                {
                    "title": "P0420 Catalyst System Efficiency",
                    "link": "https://example.com/p0420",
                    "snippet": "Below threshold bank 1.",
                    "position": 1
                },
                {
                    "title": "Fixing P0420",
                    "link": "https://example.org/fix",
                    "snippet": "Check O2 sensors first."
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = provider(&server).search("p0420 code", 2).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "P0420 Catalyst System Efficiency");
    assert_eq!(results[0].position, 1);
    assert_eq!(results[1].link, "https://example.org/fix");
    assert_eq!(results[1].position, 2);
}

#[tokio::test]
async fn missing_organic_section_is_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answerBox": {} })))
        .mount(&server)
        .await;

    let results = provider(&server).search("tire pressure", 5).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn rejected_key_is_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = provider(&server).search("brake pads", 5).await.unwrap_err();
    assert!(matches!(err, SearchError::UpstreamStatus(403)));
}

#[tokio::test]
async fn slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "organic": [] }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut config = SearchConfig::new(format!("{}/search", server.uri()), "test-key");
    config.timeout = Duration::from_millis(50);
    let err = SerperSearchProvider::new(config)
        .unwrap()
        .search("coolant", 3)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Timeout));
}

#[tokio::test]
async fn route_returns_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({ "q": "check engine light", "num": 20 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic": [{ "title": "CEL", "link": "https://example.com", "snippet": "", "position": 1 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = handlers::router(SearchService::new(provider(&server)));
    let response = app
        .oneshot(get("/?q=check%20engine%20light&num=50"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["query"], "check engine light");
    assert_eq!(body["results"][0]["title"], "CEL");
}

#[tokio::test]
async fn route_rejects_empty_query() {
    let server = MockServer::start().await;
    let app = handlers::router(SearchService::new(provider(&server)));

    let response = app.oneshot(get("/?q=")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "Search query must not be empty");
}

#[tokio::test]
async fn route_without_key_is_503() {
    let config = SearchConfig {
        api_key: None,
        ..SearchConfig::new("http://127.0.0.1:9/search", "unused")
    };
    let app = handlers::router(SearchService::new(
        SerperSearchProvider::new(config).unwrap(),
    ));

    let response = app.oneshot(get("/?q=spark%20plugs")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn route_maps_provider_failure_to_502() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = handlers::router(SearchService::new(provider(&server)));
    let response = app.oneshot(get("/?q=alternator")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
