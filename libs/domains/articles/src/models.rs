use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;
pub const DEFAULT_IMAGE_COUNT: usize = 3;

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// A published or draft blog article. `content` is HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Article {
    pub id: Uuid,
    /// URL key derived from the title at creation; unique across articles
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateArticle {
    #[validate(length(min = 3, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub excerpt: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub content: String,
    #[validate(length(min = 1, max = 100))]
    pub author: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(url)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateArticle {
    #[validate(length(min = 3, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 500))]
    pub excerpt: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub content: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub author: Option<String>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    #[validate(url)]
    pub featured_image: Option<String>,
    pub published: Option<bool>,
}

impl UpdateArticle {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticleFilter {
    pub category: Option<String>,
    /// Articles carrying this tag
    pub tag: Option<String>,
    pub published: Option<bool>,
    /// Page size, 1..=100
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for ArticleFilter {
    fn default() -> Self {
        Self {
            category: None,
            tag: None,
            published: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl ArticleFilter {
    pub fn page_size(&self) -> u64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn matches(&self, article: &Article) -> bool {
        if let Some(category) = &self.category {
            if !article.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !article.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                return false;
            }
        }
        if let Some(published) = self.published {
            if article.published != published {
                return false;
            }
        }
        true
    }
}

impl Article {
    pub fn new(input: CreateArticle, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            slug,
            title: input.title,
            excerpt: input.excerpt,
            content: input.content,
            author: input.author,
            category: input.category,
            tags: input.tags,
            featured_image: input.featured_image,
            published: input.published,
            created_at: now,
            updated_at: now,
        }
    }

    /// The slug is kept as-is so existing links stay valid.
    pub fn apply_update(&mut self, update: UpdateArticle) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(excerpt) = update.excerpt {
            self.excerpt = excerpt;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(author) = update.author {
            self.author = author;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(featured_image) = update.featured_image {
            self.featured_image = Some(featured_image);
        }
        if let Some(published) = update.published {
            self.published = published;
        }
        self.updated_at = Utc::now();
    }
}

/// Lowercase ASCII words joined by `-`. Falls back to `"article"`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }

    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "article".to_string()
    } else {
        slug.to_string()
    }
}

// Image placement

/// Plain text of one `<h2>`, with its position among the document's subheadings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Subheading {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageRef {
    pub url: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

/// An image to show under the subheading whose text is `subheading`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImagePlacement {
    pub subheading: String,
    pub image: ImageRef,
}

fn default_image_count() -> usize {
    DEFAULT_IMAGE_COUNT
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PreviewImages {
    #[validate(custom(function = "validate_not_blank"))]
    pub html: String,
    #[serde(default = "default_image_count")]
    #[validate(range(min = 1, max = 10))]
    pub count: usize,
    /// Topic hint for image prompts, usually the article title
    pub context: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct IllustrateArticle {
    #[serde(default = "default_image_count")]
    #[validate(range(min = 1, max = 10))]
    pub count: usize,
}

impl Default for IllustrateArticle {
    fn default() -> Self {
        Self {
            count: DEFAULT_IMAGE_COUNT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlacementPreview {
    pub placements: Vec<ImagePlacement>,
    /// Input HTML with the images inserted
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IllustratedArticle {
    pub article: Article,
    pub placements: Vec<ImagePlacement>,
}
