use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "BrainAi API",
        version = "0.1.0",
        description = "Vehicle lookup with recalls, blog articles with image placement, and web search"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/vehicles", api = domain_vehicles::handlers::ApiDoc),
        (path = "/articles", api = domain_articles::handlers::ApiDoc),
        (path = "/search", api = domain_search::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
