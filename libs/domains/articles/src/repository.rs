use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ArticleError, ArticleResult};
use crate::models::{Article, ArticleFilter, UpdateArticle};

/// Storage for articles.
///
/// `list` returns newest first. `update` and `delete` fail with
/// [`ArticleError::NotFound`] for unknown ids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn get(&self, id: Uuid) -> ArticleResult<Option<Article>>;

    async fn get_by_slug(&self, slug: &str) -> ArticleResult<Option<Article>>;

    async fn list(&self, filter: ArticleFilter) -> ArticleResult<Vec<Article>>;

    async fn add(&self, article: Article) -> ArticleResult<Article>;

    async fn update(&self, id: Uuid, changes: UpdateArticle) -> ArticleResult<Article>;

    async fn delete(&self, id: Uuid) -> ArticleResult<()>;

    async fn slug_exists(&self, slug: &str) -> ArticleResult<bool>;
}

/// Process-local store for development and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArticleStore {
    articles: Arc<RwLock<HashMap<Uuid, Article>>>,
}

impl InMemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for InMemoryArticleStore {
    async fn get(&self, id: Uuid) -> ArticleResult<Option<Article>> {
        Ok(self.articles.read().await.get(&id).cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> ArticleResult<Option<Article>> {
        let articles = self.articles.read().await;
        Ok(articles.values().find(|a| a.slug == slug).cloned())
    }

    async fn list(&self, filter: ArticleFilter) -> ArticleResult<Vec<Article>> {
        let articles = self.articles.read().await;

        let mut matching: Vec<&Article> = articles.values().filter(|a| filter.matches(a)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.page_size() as usize)
            .cloned()
            .collect())
    }

    async fn add(&self, article: Article) -> ArticleResult<Article> {
        self.articles
            .write()
            .await
            .insert(article.id, article.clone());
        Ok(article)
    }

    async fn update(&self, id: Uuid, changes: UpdateArticle) -> ArticleResult<Article> {
        let mut articles = self.articles.write().await;
        let article = articles.get_mut(&id).ok_or(ArticleError::NotFound(id))?;
        article.apply_update(changes);
        Ok(article.clone())
    }

    async fn delete(&self, id: Uuid) -> ArticleResult<()> {
        self.articles
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(ArticleError::NotFound(id))
    }

    async fn slug_exists(&self, slug: &str) -> ArticleResult<bool> {
        let articles = self.articles.read().await;
        Ok(articles.values().any(|a| a.slug == slug))
    }
}
