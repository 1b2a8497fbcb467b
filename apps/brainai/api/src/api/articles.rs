use axum::Router;
use domain_articles::placement::{
    FirstN, ImagePlacer, LlmSubheadingSelector, SubheadingSelector,
};
use domain_articles::{ArticleService, InMemoryArticleStore, PgArticleStore, handlers};
use std::sync::Arc;
use tracing::info;

fn placer(state: &crate::state::AppState) -> eyre::Result<ImagePlacer> {
    let config = &state.config;

    let selector: Arc<dyn SubheadingSelector> = if config.llm.api_key.is_some() {
        info!(model = %config.llm.model, "Subheadings chosen by LLM");
        Arc::new(LlmSubheadingSelector::new(config.llm.clone())?)
    } else {
        Arc::new(FirstN)
    };

    Ok(ImagePlacer::new(
        selector,
        config.images.clone().into_source(),
    ))
}

pub fn router(state: &crate::state::AppState) -> eyre::Result<Router> {
    let placer = placer(state)?;

    let router = match &state.db {
        Some(db) => handlers::router(ArticleService::new(PgArticleStore::new(db.clone()), placer)),
        None => {
            info!("DATABASE_URL is not set, articles are kept in memory");
            handlers::router(ArticleService::new(InMemoryArticleStore::new(), placer))
        }
    };

    Ok(router)
}
