use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use tracing::debug;
use uuid::Uuid;

use crate::entity;
use crate::error::{ArticleError, ArticleResult};
use crate::models::{Article, ArticleFilter, UpdateArticle};
use crate::repository::ArticleStore;

/// [`ArticleStore`] over the `articles` table.
#[derive(Debug, Clone)]
pub struct PgArticleStore {
    db: DatabaseConnection,
}

impl PgArticleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn get(&self, id: Uuid) -> ArticleResult<Option<Article>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_slug(&self, slug: &str) -> ArticleResult<Option<Article>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Slug.eq(slug))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: ArticleFilter) -> ArticleResult<Vec<Article>> {
        let mut query = entity::Entity::find();

        if let Some(category) = &filter.category {
            query = query.filter(Expr::cust_with_values(
                "lower(category) = $1",
                [category.to_lowercase()],
            ));
        }

        if let Some(tag) = &filter.tag {
            query = query.filter(Expr::cust_with_values(
                "EXISTS (SELECT 1 FROM json_array_elements_text(tags) AS t WHERE lower(t) = $1)",
                [tag.to_lowercase()],
            ));
        }

        if let Some(published) = filter.published {
            query = query.filter(entity::Column::Published.eq(published));
        }

        let models = query
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .limit(filter.page_size())
            .offset(filter.offset)
            .all(&self.db)
            .await?;

        debug!(count = models.len(), "Listed articles");
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn add(&self, article: Article) -> ArticleResult<Article> {
        let active: entity::ActiveModel = article.into();
        let model = active.insert(&self.db).await?;
        Ok(model.into())
    }

    async fn update(&self, id: Uuid, changes: UpdateArticle) -> ArticleResult<Article> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ArticleError::NotFound(id))?;

        let mut article: Article = model.into();
        article.apply_update(changes);

        let active: entity::ActiveModel = article.into();
        let updated = active.update(&self.db).await?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> ArticleResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ArticleError::NotFound(id));
        }
        Ok(())
    }

    async fn slug_exists(&self, slug: &str) -> ArticleResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::Slug.eq(slug))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}
