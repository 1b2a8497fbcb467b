//! Upstream vehicle data sources.

mod config;
mod nhtsa;

pub use config::VehicleApiConfig;
pub use nhtsa::{NhtsaClient, parse_recalls};

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::{DecodedVariable, RecallRecord, VehicleInfo, Vin};

/// Decodes a VIN into the provider's flat variable list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleDecoder: Send + Sync {
    async fn decode(&self, vin: &Vin) -> Result<Vec<DecodedVariable>, FetchError>;
}

/// Recall campaigns for a make/model/year.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecallSource: Send + Sync {
    /// Queries with `vehicle.make`, `vehicle.model` and `vehicle.model_year` as decoded.
    async fn recalls(&self, vehicle: &VehicleInfo) -> Result<Vec<RecallRecord>, FetchError>;
}
