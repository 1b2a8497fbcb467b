use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("Article not found: {0}")]
    NotFound(Uuid),

    #[error("No article with slug '{0}'")]
    SlugNotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Article has no <h2> subheadings to place images under")]
    NoPlacementTargets,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ArticleResult<T> = Result<T, ArticleError>;

impl From<sea_orm::DbErr> for ArticleError {
    fn from(err: sea_orm::DbErr) -> Self {
        ArticleError::Internal(format!("Database error: {}", err))
    }
}

impl From<ArticleError> for AppError {
    fn from(err: ArticleError) -> Self {
        match err {
            ArticleError::NotFound(_) | ArticleError::SlugNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            ArticleError::Validation(e) => AppError::ValidationError(e),
            ArticleError::NoPlacementTargets => AppError::UnprocessableEntity(err.to_string()),
            ArticleError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ArticleError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_targets_is_unprocessable() {
        let app: AppError = ArticleError::NoPlacementTargets.into();
        assert!(matches!(app, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn slug_miss_is_not_found() {
        let app: AppError = ArticleError::SlugNotFound("oil-change".into()).into();
        assert!(matches!(app, AppError::NotFound(m) if m.contains("oil-change")));
    }
}
