use axum::Router;
use domain_search::{SearchService, SerperSearchProvider, handlers};
use tracing::warn;

pub fn router(state: &crate::state::AppState) -> eyre::Result<Router> {
    let provider = SerperSearchProvider::new(state.config.search.clone())?;
    if !provider.is_configured() {
        warn!("SEARCH_API_KEY is not set, /api/search will answer 503");
    }
    Ok(handlers::router(SearchService::new(provider)))
}
