//! Vehicles Domain
//!
//! VIN decoding through the NHTSA vPIC API and recall lookup through the
//! NHTSA recalls API, merged into one [`LookupResult`].
//!
//! ```text
//! Vin::parse ─► VehicleDecoder::decode ─► VehicleInfo::from_variables ─► RecallSource::recalls
//!                   (fatal on error)          (NotFound / IncompleteData)     (non-fatal)
//! ```
//!
//! ```rust,no_run
//! use core_config::FromEnv;
//! use domain_vehicles::{NhtsaClient, VehicleApiConfig, VehicleLookupService, handlers};
//!
//! let client = NhtsaClient::new(VehicleApiConfig::from_env().unwrap()).unwrap();
//! let service = VehicleLookupService::new(client.clone(), client);
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod providers;
pub mod service;

pub use error::{FetchError, VehicleError, VehicleResult};
pub use models::{
    DecodedVariable, LookupResult, RecallOutcome, RecallRecord, VehicleInfo, VehicleLookup, Vin,
    VinError,
};
pub use providers::{NhtsaClient, RecallSource, VehicleApiConfig, VehicleDecoder};
pub use service::VehicleLookupService;
