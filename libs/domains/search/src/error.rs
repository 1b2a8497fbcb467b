use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search query must not be empty")]
    EmptyQuery,

    #[error("Web search is not configured")]
    NotConfigured,

    #[error("Search provider returned HTTP {0}")]
    UpstreamStatus(u16),

    #[error("Search provider did not respond in time")]
    Timeout,

    #[error("Search provider request failed: {0}")]
    Upstream(String),
}

pub type SearchApiResult<T> = Result<T, SearchError>;

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout
        } else if let Some(status) = err.status() {
            SearchError::UpstreamStatus(status.as_u16())
        } else {
            SearchError::Upstream(err.to_string())
        }
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::EmptyQuery => AppError::BadRequest(err.to_string()),
            SearchError::NotConfigured => AppError::ServiceUnavailable(err.to_string()),
            SearchError::Timeout => AppError::GatewayTimeout(err.to_string()),
            SearchError::UpstreamStatus(_) | SearchError::Upstream(_) => {
                AppError::BadGateway(err.to_string())
            }
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
