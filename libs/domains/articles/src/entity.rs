use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::Article;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author: String,
    pub category: String,
    pub tags: Json, // JSON array of strings
    pub featured_image: Option<String>,
    pub published: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Article {
    fn from(model: Model) -> Self {
        let tags: Vec<String> = serde_json::from_value(model.tags).unwrap_or_default();

        Self {
            id: model.id,
            slug: model.slug,
            title: model.title,
            excerpt: model.excerpt,
            content: model.content,
            author: model.author,
            category: model.category,
            tags,
            featured_image: model.featured_image,
            published: model.published,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<Article> for ActiveModel {
    fn from(article: Article) -> Self {
        ActiveModel {
            id: Set(article.id),
            slug: Set(article.slug),
            title: Set(article.title),
            excerpt: Set(article.excerpt),
            content: Set(article.content),
            author: Set(article.author),
            category: Set(article.category),
            tags: Set(Json::from(article.tags)),
            featured_image: Set(article.featured_image),
            published: Set(article.published),
            created_at: Set(article.created_at.into()),
            updated_at: Set(article.updated_at.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateArticle;

    #[test]
    fn article_survives_model_conversion() {
        let article = Article::new(
            CreateArticle {
                title: "Reading tire codes".into(),
                excerpt: "What 225/45R17 means".into(),
                content: "<h2>Width</h2>".into(),
                author: "Lee".into(),
                category: "tires".into(),
                tags: vec!["tires".into(), "basics".into()],
                featured_image: Some("https://img.example/tire.png".into()),
                published: false,
            },
            "reading-tire-codes".into(),
        );

        let active: ActiveModel = article.clone().into();
        let model = Model {
            id: active.id.unwrap(),
            slug: active.slug.unwrap(),
            title: active.title.unwrap(),
            excerpt: active.excerpt.unwrap(),
            content: active.content.unwrap(),
            author: active.author.unwrap(),
            category: active.category.unwrap(),
            tags: active.tags.unwrap(),
            featured_image: active.featured_image.unwrap(),
            published: active.published.unwrap(),
            created_at: active.created_at.unwrap(),
            updated_at: active.updated_at.unwrap(),
        };

        assert_eq!(Article::from(model), article);
    }
}
