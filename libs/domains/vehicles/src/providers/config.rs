use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use std::time::Duration;

pub const DEFAULT_VPIC_BASE_URL: &str = "https://vpic.nhtsa.dot.gov/api";
pub const DEFAULT_RECALLS_BASE_URL: &str = "https://api.nhtsa.gov";

#[derive(Debug, Clone)]
pub struct VehicleApiConfig {
    pub vpic_base_url: String,
    pub recalls_base_url: String,
    /// Applied to every outbound request.
    pub timeout: Duration,
}

impl VehicleApiConfig {
    /// Both APIs at `base_url` (test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            vpic_base_url: base_url.clone(),
            recalls_base_url: base_url,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for VehicleApiConfig {
    fn default() -> Self {
        Self {
            vpic_base_url: DEFAULT_VPIC_BASE_URL.to_string(),
            recalls_base_url: DEFAULT_RECALLS_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// - `VPIC_BASE_URL` (default `https://vpic.nhtsa.dot.gov/api`)
/// - `RECALLS_BASE_URL` (default `https://api.nhtsa.gov`)
/// - `UPSTREAM_TIMEOUT_SECS` (default 10)
impl FromEnv for VehicleApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: u64 = env_parse("UPSTREAM_TIMEOUT_SECS", "10")?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "UPSTREAM_TIMEOUT_SECS".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            vpic_base_url: trim_base(env_or_default("VPIC_BASE_URL", DEFAULT_VPIC_BASE_URL)),
            recalls_base_url: trim_base(env_or_default(
                "RECALLS_BASE_URL",
                DEFAULT_RECALLS_BASE_URL,
            )),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
