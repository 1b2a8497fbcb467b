use axum::Router;
use axum::routing::get;

pub mod articles;
pub mod health;
pub mod search;
pub mod vehicles;

/// Domain routes without the `/api` prefix; `create_router` adds it.
pub fn routes(state: &crate::state::AppState) -> eyre::Result<Router> {
    Ok(Router::new()
        .nest("/vehicles", vehicles::router(state)?)
        .nest("/articles", articles::router(state)?)
        .nest("/search", search::router(state)?))
}

/// `GET /ready` with live dependency checks.
pub fn ready_router(state: crate::state::AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
