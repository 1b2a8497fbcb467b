use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnprocessableEntityResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ArticleResult;
use crate::models::{
    Article, ArticleFilter, CreateArticle, IllustrateArticle, IllustratedArticle, ImagePlacement,
    ImageRef, PlacementPreview, PreviewImages, UpdateArticle,
};
use crate::repository::ArticleStore;
use crate::service::ArticleService;

pub const TAG: &str = "articles";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_articles,
        create_article,
        get_article,
        get_article_by_slug,
        update_article,
        delete_article,
        illustrate_article,
        preview_images,
    ),
    components(
        schemas(
            Article,
            CreateArticle,
            UpdateArticle,
            IllustrateArticle,
            IllustratedArticle,
            PreviewImages,
            PlacementPreview,
            ImagePlacement,
            ImageRef
        ),
        responses(
            BadRequestUuidResponse,
            BadRequestValidationResponse,
            NotFoundResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Blog articles and image placement")
    )
)]
pub struct ApiDoc;

pub fn router<S: ArticleStore + 'static>(service: ArticleService<S>) -> Router {
    Router::new()
        .route("/", get(list_articles::<S>).post(create_article::<S>))
        .route(
            "/{id}",
            get(get_article::<S>)
                .put(update_article::<S>)
                .delete(delete_article::<S>),
        )
        .route("/slug/{slug}", get(get_article_by_slug::<S>))
        .route("/{id}/images", post(illustrate_article::<S>))
        .route("/images/preview", post(preview_images::<S>))
        .with_state(Arc::new(service))
}

/// List articles, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ArticleFilter),
    responses(
        (status = 200, description = "Matching articles", body = Vec<Article>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_articles<S: ArticleStore>(
    State(service): State<Arc<ArticleService<S>>>,
    Query(filter): Query<ArticleFilter>,
) -> ArticleResult<Json<Vec<Article>>> {
    Ok(Json(service.list(filter).await?))
}

/// Create an article; the slug is derived from the title
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateArticle,
    responses(
        (status = 201, description = "Article created", body = Article),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_article<S: ArticleStore>(
    State(service): State<Arc<ArticleService<S>>>,
    ValidatedJson(input): ValidatedJson<CreateArticle>,
) -> ArticleResult<impl IntoResponse> {
    let article = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = uuid::Uuid, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article found", body = Article),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_article<S: ArticleStore>(
    State(service): State<Arc<ArticleService<S>>>,
    UuidPath(id): UuidPath,
) -> ArticleResult<Json<Article>> {
    Ok(Json(service.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/slug/{slug}",
    tag = TAG,
    params(("slug" = String, Path, description = "Article slug", example = "why-is-my-check-engine-light-on")),
    responses(
        (status = 200, description = "Article found", body = Article),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_article_by_slug<S: ArticleStore>(
    State(service): State<Arc<ArticleService<S>>>,
    Path(slug): Path<String>,
) -> ArticleResult<Json<Article>> {
    Ok(Json(service.get_by_slug(&slug).await?))
}

/// Update an article; omitted fields are left unchanged
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = uuid::Uuid, Path, description = "Article ID")),
    request_body = UpdateArticle,
    responses(
        (status = 200, description = "Article updated", body = Article),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_article<S: ArticleStore>(
    State(service): State<Arc<ArticleService<S>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateArticle>,
) -> ArticleResult<Json<Article>> {
    Ok(Json(service.update(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = uuid::Uuid, Path, description = "Article ID")),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_article<S: ArticleStore>(
    State(service): State<Arc<ArticleService<S>>>,
    UuidPath(id): UuidPath,
) -> ArticleResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Insert images under the article's subheadings and save the result
#[utoipa::path(
    post,
    path = "/{id}/images",
    tag = TAG,
    params(("id" = uuid::Uuid, Path, description = "Article ID")),
    request_body = IllustrateArticle,
    responses(
        (status = 200, description = "Updated article with the placements made", body = IllustratedArticle),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse)
    )
)]
async fn illustrate_article<S: ArticleStore>(
    State(service): State<Arc<ArticleService<S>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<IllustrateArticle>,
) -> ArticleResult<Json<IllustratedArticle>> {
    Ok(Json(service.illustrate(id, input).await?))
}

/// Placements for HTML that is not stored
#[utoipa::path(
    post,
    path = "/images/preview",
    tag = TAG,
    request_body = PreviewImages,
    responses(
        (status = 200, description = "Placements and the resulting HTML", body = PlacementPreview),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = UnprocessableEntityResponse)
    )
)]
async fn preview_images<S: ArticleStore>(
    State(service): State<Arc<ArticleService<S>>>,
    ValidatedJson(input): ValidatedJson<PreviewImages>,
) -> ArticleResult<Json<PlacementPreview>> {
    Ok(Json(service.preview_images(input).await?))
}
