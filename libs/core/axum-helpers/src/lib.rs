//! # Axum Helpers
//!
//! Shared building blocks for the HTTP API.
//!
//! - **[`server`]**: router assembly with API docs, health checks, graceful shutdown
//! - **[`http`]**: CORS and security-header middleware
//! - **[`errors`]**: [`AppError`] and the uniform JSON error body
//! - **[`extractors`]**: [`UuidPath`] and [`ValidatedJson`]
//!
//! Domain crates convert their error enums into [`AppError`]; the binary
//! nests each domain router under `/api` via [`create_router`].

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{UuidPath, ValidatedJson};
