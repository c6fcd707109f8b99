use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use tracing::{debug, info};

use crate::api::error::ApiError;
use crate::api::response::{ApiResponse, FleetEntry, SegmentsData, VehicleWithDistance};
use crate::api::AppState;
use crate::db::store;
use crate::models::gps_location::samples;
use crate::models::message::{parse_f64_option, parse_i64_option};
use crate::models::principal::Principal;
use crate::models::vehicle::Vehicle;
use crate::processor::ingest::{self, PingInput};
use crate::travel::{fleet_travel_summary, segments_for_vehicle, total_distance_km};

async fn accessible_vehicle(
    state: &AppState,
    principal: &Principal,
    vehicle_id: i64,
) -> Result<Vehicle, ApiError> {
    let vehicle = store::fetch_vehicle(&state.pool, vehicle_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    if !principal.can_access(vehicle.user_id) {
        return Err(ApiError::Forbidden);
    }
    Ok(vehicle)
}

pub async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    principal: Principal,
) -> Result<Response, ApiError> {
    let vehicles = store::fetch_visible_vehicles(&state.pool, &principal).await?;
    let fleet = store::fetch_fleet_locations(&state.pool, vehicles).await?;

    let data: Vec<VehicleWithDistance> = fleet
        .into_iter()
        .map(|(vehicle, locations)| VehicleWithDistance {
            total_distance: total_distance_km(&samples(&locations)),
            vehicle,
        })
        .collect();

    Ok(ApiResponse::ok(data).into_response())
}

pub async fn show_vehicle(
    State(state): State<Arc<AppState>>,
    principal: Principal,
    Path(vehicle_id): Path<i64>,
) -> Result<Response, ApiError> {
    let vehicle = accessible_vehicle(&state, &principal, vehicle_id).await?;
    let locations = store::fetch_vehicle_locations(&state.pool, vehicle.id).await?;

    let data = VehicleWithDistance {
        total_distance: total_distance_km(&samples(&locations)),
        vehicle,
    };
    Ok(ApiResponse::ok(data).into_response())
}

pub async fn vehicle_locations(
    State(state): State<Arc<AppState>>,
    principal: Principal,
    Path(vehicle_id): Path<i64>,
) -> Result<Response, ApiError> {
    let vehicle = accessible_vehicle(&state, &principal, vehicle_id).await?;
    let locations = store::fetch_vehicle_locations(&state.pool, vehicle.id).await?;

    Ok(ApiResponse::ok(locations).into_response())
}

pub async fn travel_segments(
    State(state): State<Arc<AppState>>,
    principal: Principal,
    Path(vehicle_id): Path<i64>,
) -> Result<Response, ApiError> {
    let vehicle = accessible_vehicle(&state, &principal, vehicle_id).await?;
    let locations = store::fetch_vehicle_locations(&state.pool, vehicle.id).await?;

    let summary = segments_for_vehicle(&samples(&locations));
    debug!(
        "Vehicle {} has {} segments over {} km",
        vehicle.id,
        summary.segment_count(),
        summary.total_distance_km
    );

    let mut response = ApiResponse::ok(SegmentsData::new(&vehicle, &summary));
    if let Some(note) = summary.note() {
        response = response.with_message(note);
    }
    Ok(response.into_response())
}

pub async fn all_travels(
    State(state): State<Arc<AppState>>,
    principal: Principal,
) -> Result<Response, ApiError> {
    let vehicles = store::fetch_visible_vehicles(&state.pool, &principal).await?;
    let fleet = store::fetch_fleet_locations(&state.pool, vehicles).await?;

    let travels = fleet_travel_summary(
        fleet
            .into_iter()
            .map(|(vehicle, locations)| (vehicle.to_ref(), samples(&locations))),
    );

    let data: Vec<FleetEntry> = travels.into_iter().map(FleetEntry::from).collect();
    Ok(ApiResponse::ok(data).into_response())
}

/// Numeric fields accept JSON numbers or numeric strings.
#[derive(Debug, Deserialize)]
pub struct StoreLocationRequest {
    #[serde(default, deserialize_with = "parse_i64_option")]
    pub vehicle_id: Option<i64>,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl From<StoreLocationRequest> for PingInput {
    fn from(req: StoreLocationRequest) -> Self {
        PingInput {
            vehicle_id: req.vehicle_id,
            latitude: req.latitude,
            longitude: req.longitude,
            timestamp: req.timestamp,
            correlation_id: None,
        }
    }
}

pub async fn store_location(
    State(state): State<Arc<AppState>>,
    principal: Principal,
    WithRejection(Json(request), _): WithRejection<Json<StoreLocationRequest>, ApiError>,
) -> Result<Response, ApiError> {
    let input = PingInput::from(request);
    let saved = ingest::record_location(&state.pool, Some(&principal), &input).await?;
    info!("User {} recorded location {}", principal.user_id, saved.id);

    let response = ApiResponse::ok(saved).with_message("GPS location saved successfully");
    Ok((StatusCode::CREATED, response).into_response())
}
