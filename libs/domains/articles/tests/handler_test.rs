//! HTTP tests for the articles router over the in-memory store.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::ErrorResponse;
use domain_articles::placement::{FirstN, ImagePlacer, PlaceholderImageSource};
use domain_articles::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const BODY: &str = "<p>Intro</p>\
    <h2>What the light means</h2><p>a</p>\
    <h2>Common causes</h2><p>b</p>\
    <h2>What it costs</h2><p>c</p>";

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> axum::Router {
    let placer = ImagePlacer::new(
        Arc::new(FirstN),
        Arc::new(PlaceholderImageSource::new("https://ph.test", 640, 360)),
    );
    handlers::router(ArticleService::new(InMemoryArticleStore::new(), placer))
}

fn send_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn new_article(title: &str) -> Value {
    json!({
        "title": title,
        "content": BODY,
        "author": "Jordan",
        "category": "diagnostics",
        "tags": ["check-engine", "obd2"],
        "published": true
    })
}

async fn create(app: &axum::Router, title: &str) -> Article {
    let response = app
        .clone()
        .oneshot(send_json("POST", "/", new_article(title)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn create_then_fetch_by_id_and_slug() {
    let app = app();
    let article = create(&app, "Why Is My Check Engine Light On?").await;
    assert_eq!(article.slug, "why-is-my-check-engine-light-on");

    let response = app
        .clone()
        .oneshot(get(&format!("/{}", article.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let by_id: Article = json_body(response.into_body()).await;
    assert_eq!(by_id, article);

    let response = app
        .oneshot(get("/slug/why-is-my-check-engine-light-on"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let by_slug: Article = json_body(response.into_body()).await;
    assert_eq!(by_slug.id, article.id);
}

#[tokio::test]
async fn duplicate_titles_get_distinct_slugs() {
    let app = app();
    let first = create(&app, "Brake Fluid Basics").await;
    let second = create(&app, "Brake fluid basics!").await;

    assert_eq!(first.slug, "brake-fluid-basics");
    assert_eq!(second.slug, "brake-fluid-basics-2");
}

#[tokio::test]
async fn list_filters_by_tag() {
    let app = app();
    create(&app, "Tagged one").await;
    let untagged = json!({
        "title": "Untagged",
        "content": "<p>x</p>",
        "author": "Jordan"
    });
    let response = app
        .clone()
        .oneshot(send_json("POST", "/", untagged))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get("/?tag=OBD2&limit=5")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let articles: Vec<Article> = json_body(response.into_body()).await;
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Tagged one");
}

#[tokio::test]
async fn invalid_create_is_rejected() {
    let response = app()
        .oneshot(send_json(
            "POST",
            "/",
            json!({ "title": "No", "content": " ", "author": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "VALIDATION_ERROR");
}

#[tokio::test]
async fn update_and_delete() {
    let app = app();
    let article = create(&app, "Spark plug gap").await;

    let response = app
        .clone()
        .oneshot(send_json(
            "PUT",
            &format!("/{}", article.id),
            json!({ "published": false, "excerpt": "Set it right" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Article = json_body(response.into_body()).await;
    assert!(!updated.published);
    assert_eq!(updated.excerpt, "Set it right");
    assert_eq!(updated.title, "Spark plug gap");

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", article.id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(delete).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get(&format!("/{}", article.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let response = app().oneshot(get("/not-a-uuid")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let response = app().oneshot(get("/slug/nothing-here")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "NOT_FOUND");
}

#[tokio::test]
async fn illustrate_persists_images() {
    let app = app();
    let article = create(&app, "Check engine light guide").await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            &format!("/{}/images", article.id),
            json!({ "count": 2 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let illustrated: IllustratedArticle = json_body(response.into_body()).await;
    let placed: Vec<_> = illustrated
        .placements
        .iter()
        .map(|p| p.subheading.as_str())
        .collect();
    assert_eq!(placed, ["What the light means", "Common causes"]);

    let response = app
        .oneshot(get(&format!("/{}", article.id)))
        .await
        .unwrap();
    let stored: Article = json_body(response.into_body()).await;
    assert_eq!(stored.content.matches("<figure").count(), 2);
    assert!(
        stored
            .content
            .contains("<h2>Common causes</h2><figure class=\"article-image\">")
    );
}

#[tokio::test]
async fn preview_returns_every_subheading_when_fewer_than_requested() {
    let response = app()
        .oneshot(send_json(
            "POST",
            "/images/preview",
            json!({ "html": BODY, "count": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let preview: PlacementPreview = json_body(response.into_body()).await;
    let placed: Vec<_> = preview
        .placements
        .iter()
        .map(|p| p.subheading.as_str())
        .collect();
    assert_eq!(
        placed,
        ["What the light means", "Common causes", "What it costs"]
    );
    assert_eq!(
        preview.placements[2].image.url,
        "https://ph.test/640x360?text=What%20it%20costs"
    );
}

#[tokio::test]
async fn preview_without_subheadings_is_unprocessable() {
    let response = app()
        .oneshot(send_json(
            "POST",
            "/images/preview",
            json!({ "html": "<p>Just a paragraph</p>", "count": 3 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "UNPROCESSABLE_ENTITY");
}
