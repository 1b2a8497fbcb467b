use axum::Router;
use domain_vehicles::{NhtsaClient, VehicleLookupService, handlers};

pub fn router(state: &crate::state::AppState) -> eyre::Result<Router> {
    let client = NhtsaClient::new(state.config.vehicles.clone())?;
    let service = VehicleLookupService::new(client.clone(), client);
    Ok(handlers::router(service))
}
