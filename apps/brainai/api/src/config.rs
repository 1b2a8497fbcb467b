use core_config::{AppInfo, FromEnv, app_info, env_optional, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_articles::placement::{ImageConfig, LlmConfig};
use domain_search::SearchConfig;
use domain_vehicles::VehicleApiConfig;

pub use core_config::Environment;

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    /// `None` (no `DATABASE_URL`) keeps articles in memory.
    pub database: Option<PostgresConfig>,
    pub vehicles: VehicleApiConfig,
    pub images: ImageConfig,
    pub llm: LlmConfig,
    pub search: SearchConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let database = match env_optional("DATABASE_URL") {
            Some(_) => Some(PostgresConfig::from_env()?),
            None => None,
        };

        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            database,
            vehicles: VehicleApiConfig::from_env()?,
            images: ImageConfig::from_env()?,
            llm: LlmConfig::from_env()?,
            search: SearchConfig::from_env()?,
        })
    }
}
