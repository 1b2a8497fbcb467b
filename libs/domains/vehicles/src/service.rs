use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::VehicleResult;
use crate::models::{LookupResult, RecallOutcome, VehicleInfo, Vin};
use crate::providers::{RecallSource, VehicleDecoder};

/// VIN decode followed by a recall lookup for the decoded make/model/year.
pub struct VehicleLookupService<D: VehicleDecoder, R: RecallSource> {
    decoder: Arc<D>,
    recalls: Arc<R>,
}

impl<D: VehicleDecoder, R: RecallSource> Clone for VehicleLookupService<D, R> {
    fn clone(&self) -> Self {
        Self {
            decoder: Arc::clone(&self.decoder),
            recalls: Arc::clone(&self.recalls),
        }
    }
}

impl<D: VehicleDecoder, R: RecallSource> VehicleLookupService<D, R> {
    pub fn new(decoder: D, recalls: R) -> Self {
        Self {
            decoder: Arc::new(decoder),
            recalls: Arc::new(recalls),
        }
    }

    /// Decode `raw_vin` and attach its recalls.
    ///
    /// Decode problems fail the lookup. A failed recall fetch does not: the
    /// result comes back with no recalls and `recalls_available = false`.
    #[instrument(skip(self))]
    pub async fn lookup(&self, raw_vin: &str) -> VehicleResult<LookupResult> {
        let vin = Vin::parse(raw_vin)?;

        let variables = self.decoder.decode(&vin).await?;
        let vehicle = VehicleInfo::from_variables(&vin, &variables)?;

        let outcome = self.fetch_recalls(&vehicle).await;
        if let RecallOutcome::Fetched(recalls) = &outcome {
            info!(vin = %vin, recalls = recalls.len(), "Vehicle lookup complete");
        }

        Ok(LookupResult::new(vehicle, outcome))
    }

    async fn fetch_recalls(&self, vehicle: &VehicleInfo) -> RecallOutcome {
        match self.recalls.recalls(vehicle).await {
            Ok(recalls) => RecallOutcome::Fetched(recalls),
            Err(e) => {
                warn!(
                    make = %vehicle.make,
                    model = %vehicle.model,
                    year = %vehicle.model_year,
                    error = %e,
                    "Recall lookup failed, returning vehicle without recalls"
                );
                RecallOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}
