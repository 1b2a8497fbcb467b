use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadGatewayResponse, BadRequestValidationResponse, GatewayTimeoutResponse,
        NotFoundResponse, UnprocessableEntityResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::VehicleResult;
use crate::models::{LookupResult, RecallRecord, VehicleInfo, VehicleLookup};
use crate::providers::{RecallSource, VehicleDecoder};
use crate::service::VehicleLookupService;

pub const TAG: &str = "vehicles";

#[derive(OpenApi)]
#[openapi(
    paths(lookup_vehicle, lookup_vehicle_by_path),
    components(
        schemas(VehicleLookup, LookupResult, VehicleInfo, RecallRecord),
        responses(
            BadRequestValidationResponse,
            NotFoundResponse,
            UnprocessableEntityResponse,
            BadGatewayResponse,
            GatewayTimeoutResponse
        )
    ),
    tags(
        (name = TAG, description = "VIN decoding and safety recall lookup")
    )
)]
pub struct ApiDoc;

pub fn router<D, R>(service: VehicleLookupService<D, R>) -> Router
where
    D: VehicleDecoder + 'static,
    R: RecallSource + 'static,
{
    Router::new()
        .route("/lookup", post(lookup_vehicle))
        .route("/{vin}", get(lookup_vehicle_by_path))
        .with_state(Arc::new(service))
}

/// Decode a VIN and list open recalls for the vehicle
#[utoipa::path(
    post,
    path = "/lookup",
    tag = TAG,
    request_body = VehicleLookup,
    responses(
        (status = 200, description = "Vehicle details with recalls", body = LookupResult),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 504, response = GatewayTimeoutResponse)
    )
)]
async fn lookup_vehicle<D: VehicleDecoder, R: RecallSource>(
    State(service): State<Arc<VehicleLookupService<D, R>>>,
    ValidatedJson(input): ValidatedJson<VehicleLookup>,
) -> VehicleResult<Json<LookupResult>> {
    let result = service.lookup(&input.vin).await?;
    Ok(Json(result))
}

/// Same as `POST /lookup` with the VIN in the path
#[utoipa::path(
    get,
    path = "/{vin}",
    tag = TAG,
    params(
        ("vin" = String, Path, description = "17-character VIN", example = "1HGCM82633A004352")
    ),
    responses(
        (status = 200, description = "Vehicle details with recalls", body = LookupResult),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 504, response = GatewayTimeoutResponse)
    )
)]
async fn lookup_vehicle_by_path<D: VehicleDecoder, R: RecallSource>(
    State(service): State<Arc<VehicleLookupService<D, R>>>,
    Path(vin): Path<String>,
) -> VehicleResult<Json<LookupResult>> {
    let result = service.lookup(&vin).await?;
    Ok(Json(result))
}
