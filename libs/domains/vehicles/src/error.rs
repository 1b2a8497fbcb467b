use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::models::VinError;

/// Failure talking to an upstream vehicle API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{service} returned HTTP {status}")]
    Status { service: &'static str, status: u16 },

    #[error("{service} did not respond in time")]
    Timeout { service: &'static str },

    #[error("{service} request failed: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },

    #[error("{service} sent an unreadable response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

impl FetchError {
    pub(crate) fn from_reqwest(service: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { service }
        } else if err.is_decode() {
            Self::Decode {
                service,
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            Self::Status {
                service,
                status: status.as_u16(),
            }
        } else {
            Self::Transport {
                service,
                message: err.to_string(),
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("Invalid VIN: {0}")]
    InvalidVin(#[from] VinError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("No vehicle found for VIN {0}")]
    NotFound(String),

    #[error("Decoded vehicle is missing {}", .0.join(", "))]
    IncompleteData(Vec<&'static str>),
}

pub type VehicleResult<T> = Result<T, VehicleError>;

impl From<VehicleError> for AppError {
    fn from(err: VehicleError) -> Self {
        match err {
            VehicleError::InvalidVin(e) => AppError::BadRequest(format!("Invalid VIN: {}", e)),
            VehicleError::Fetch(e @ FetchError::Timeout { .. }) => {
                AppError::GatewayTimeout(e.to_string())
            }
            VehicleError::Fetch(e) => AppError::BadGateway(e.to_string()),
            e @ VehicleError::NotFound(_) => AppError::NotFound(e.to_string()),
            e @ VehicleError::IncompleteData(_) => AppError::UnprocessableEntity(e.to_string()),
        }
    }
}

impl IntoResponse for VehicleError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_data_lists_missing_fields() {
        let err = VehicleError::IncompleteData(vec!["Model", "Model Year"]);
        assert_eq!(err.to_string(), "Decoded vehicle is missing Model, Model Year");
    }

    #[test]
    fn fetch_errors_map_to_gateway_statuses() {
        let timeout: AppError = VehicleError::from(FetchError::Timeout { service: "vPIC" }).into();
        assert!(matches!(timeout, AppError::GatewayTimeout(_)));

        let status: AppError = VehicleError::from(FetchError::Status {
            service: "vPIC",
            status: 503,
        })
        .into();
        assert!(matches!(status, AppError::BadGateway(m) if m == "vPIC returned HTTP 503"));
    }
}
