//! Articles Domain
//!
//! Blog article storage and image placement under article subheadings.
//!
//! Stores:
//! - [`InMemoryArticleStore`] for development and tests
//! - [`PgArticleStore`] over the `articles` table (see the `migration` crate)
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_articles::{ArticleService, InMemoryArticleStore, handlers};
//! use domain_articles::placement::{FirstN, ImageConfig, ImagePlacer};
//!
//! let placer = ImagePlacer::new(Arc::new(FirstN), ImageConfig::default().into_source());
//! let service = ArticleService::new(InMemoryArticleStore::new(), placer);
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod placement;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ArticleError, ArticleResult};
pub use models::{
    Article, ArticleFilter, CreateArticle, IllustrateArticle, IllustratedArticle, ImagePlacement,
    ImageRef, PlacementPreview, PreviewImages, Subheading, UpdateArticle, slugify,
};
pub use postgres::PgArticleStore;
pub use repository::{ArticleStore, InMemoryArticleStore};
pub use service::ArticleService;
