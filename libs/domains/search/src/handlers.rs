use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use axum_helpers::errors::responses::{
    BadGatewayResponse, GatewayTimeoutResponse, ServiceUnavailableResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::SearchApiResult;
use crate::models::{SearchQuery, SearchResponse, SearchResult};
use crate::provider::SearchProvider;
use crate::service::SearchService;

pub const TAG: &str = "search";

#[derive(OpenApi)]
#[openapi(
    paths(web_search),
    components(
        schemas(SearchResponse, SearchResult),
        responses(BadGatewayResponse, GatewayTimeoutResponse, ServiceUnavailableResponse)
    ),
    tags(
        (name = TAG, description = "Live web search proxy")
    )
)]
pub struct ApiDoc;

pub fn router<P: SearchProvider + 'static>(service: SearchService<P>) -> Router {
    Router::new()
        .route("/", get(web_search))
        .with_state(Arc::new(service))
}

/// Search the web
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(SearchQuery),
    responses(
        (status = 200, description = "Organic results", body = SearchResponse),
        (status = 400, description = "Empty query", body = axum_helpers::ErrorResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 504, response = GatewayTimeoutResponse)
    )
)]
async fn web_search<P: SearchProvider>(
    State(service): State<Arc<SearchService<P>>>,
    Query(query): Query<SearchQuery>,
) -> SearchApiResult<Json<SearchResponse>> {
    let response = service.search(query).await?;
    Ok(Json(response))
}
