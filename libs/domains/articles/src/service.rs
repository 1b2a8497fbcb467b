use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ArticleError, ArticleResult};
use crate::models::{
    Article, ArticleFilter, CreateArticle, IllustrateArticle, IllustratedArticle,
    PlacementPreview, PreviewImages, UpdateArticle, slugify,
};
use crate::placement::ImagePlacer;
use crate::repository::ArticleStore;

pub struct ArticleService<S: ArticleStore> {
    store: Arc<S>,
    placer: ImagePlacer,
}

impl<S: ArticleStore> Clone for ArticleService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            placer: self.placer.clone(),
        }
    }
}

impl<S: ArticleStore> ArticleService<S> {
    pub fn new(store: S, placer: ImagePlacer) -> Self {
        Self {
            store: Arc::new(store),
            placer,
        }
    }

    /// `base`, or `base-2`, `base-3`, ... whichever is free first.
    async fn unique_slug(&self, base: &str) -> ArticleResult<String> {
        if !self.store.slug_exists(base).await? {
            return Ok(base.to_string());
        }

        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", base, n);
            if !self.store.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: CreateArticle) -> ArticleResult<Article> {
        input.validate()?;

        let slug = self.unique_slug(&slugify(&input.title)).await?;
        let article = self.store.add(Article::new(input, slug)).await?;

        info!(id = %article.id, slug = %article.slug, "Article created");
        Ok(article)
    }

    pub async fn get(&self, id: Uuid) -> ArticleResult<Article> {
        self.store
            .get(id)
            .await?
            .ok_or(ArticleError::NotFound(id))
    }

    pub async fn get_by_slug(&self, slug: &str) -> ArticleResult<Article> {
        self.store
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| ArticleError::SlugNotFound(slug.to_string()))
    }

    pub async fn list(&self, filter: ArticleFilter) -> ArticleResult<Vec<Article>> {
        self.store.list(filter).await
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: UpdateArticle) -> ArticleResult<Article> {
        input.validate()?;
        let article = self.store.update(id, input).await?;

        info!(slug = %article.slug, "Article updated");
        Ok(article)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ArticleResult<()> {
        self.store.delete(id).await?;
        info!("Article deleted");
        Ok(())
    }

    /// Placements for arbitrary HTML. Nothing is stored.
    #[instrument(skip_all, fields(count = input.count))]
    pub async fn preview_images(&self, input: PreviewImages) -> ArticleResult<PlacementPreview> {
        input.validate()?;
        self.placer
            .place(&input.html, input.count, input.context.as_deref())
            .await
    }

    /// Insert images into a stored article's content and save it.
    #[instrument(skip(self, input), fields(count = input.count))]
    pub async fn illustrate(
        &self,
        id: Uuid,
        input: IllustrateArticle,
    ) -> ArticleResult<IllustratedArticle> {
        input.validate()?;

        let article = self.get(id).await?;
        let preview = self
            .placer
            .place(&article.content, input.count, Some(&article.title))
            .await?;

        let article = self
            .store
            .update(id, UpdateArticle::content(preview.html))
            .await?;

        info!(placed = preview.placements.len(), "Article illustrated");
        Ok(IllustratedArticle {
            article,
            placements: preview.placements,
        })
    }
}
