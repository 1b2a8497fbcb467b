//! PostgreSQL connectivity for the article store.
//!
//! # Features
//!
//! - `postgres` (default) - SeaORM connector, migrations runner, health checks
//! - `config` - `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! ```ignore
//! use database::postgres;
//! use migration::Migrator;
//!
//! let db = postgres::connect_with_retry(&url, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "brainai_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
