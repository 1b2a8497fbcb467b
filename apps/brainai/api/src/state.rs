use database::postgres::DatabaseConnection;

use crate::config::Config;

/// Shared by every router at startup; handlers get their own domain state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Present when articles are stored in PostgreSQL.
    pub db: Option<DatabaseConnection>,
}
