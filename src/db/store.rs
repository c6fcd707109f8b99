use std::collections::HashMap;

use crate::db::{queries, DbPool};
use crate::models::gps_location::{GpsLocation, NewGpsLocation};
use crate::models::principal::Principal;
use crate::models::vehicle::Vehicle;

/// Live (not soft-deleted) vehicle by id.
pub async fn fetch_vehicle(pool: &DbPool, vehicle_id: i64) -> sqlx::Result<Option<Vehicle>> {
    sqlx::query_as::<_, Vehicle>(queries::SELECT_LIVE_VEHICLE)
        .bind(vehicle_id)
        .fetch_optional(pool)
        .await
}

/// Vehicles the principal may see: every live vehicle for admins, own ones otherwise.
pub async fn fetch_visible_vehicles(
    pool: &DbPool,
    principal: &Principal,
) -> sqlx::Result<Vec<Vehicle>> {
    match principal.owner_scope() {
        None => {
            sqlx::query_as::<_, Vehicle>(queries::SELECT_LIVE_VEHICLES)
                .fetch_all(pool)
                .await
        }
        Some(owner_id) => {
            sqlx::query_as::<_, Vehicle>(queries::SELECT_LIVE_VEHICLES_FOR_OWNER)
                .bind(owner_id)
                .fetch_all(pool)
                .await
        }
    }
}

pub async fn fetch_vehicle_locations(
    pool: &DbPool,
    vehicle_id: i64,
) -> sqlx::Result<Vec<GpsLocation>> {
    sqlx::query_as::<_, GpsLocation>(queries::SELECT_VEHICLE_LOCATIONS)
        .bind(vehicle_id)
        .fetch_all(pool)
        .await
}

/// Loads the locations of every vehicle in one round trip and pairs them
/// back up with their vehicle, keeping the vehicle order.
pub async fn fetch_fleet_locations(
    pool: &DbPool,
    vehicles: Vec<Vehicle>,
) -> sqlx::Result<Vec<(Vehicle, Vec<GpsLocation>)>> {
    let ids: Vec<i64> = vehicles.iter().map(|v| v.id).collect();

    let rows = sqlx::query_as::<_, GpsLocation>(queries::SELECT_FLEET_LOCATIONS)
        .bind(&ids)
        .fetch_all(pool)
        .await?;

    Ok(pair_with_vehicles(vehicles, rows))
}

fn pair_with_vehicles(
    vehicles: Vec<Vehicle>,
    rows: Vec<GpsLocation>,
) -> Vec<(Vehicle, Vec<GpsLocation>)> {
    let mut by_vehicle: HashMap<i64, Vec<GpsLocation>> = HashMap::new();
    for row in rows {
        by_vehicle.entry(row.vehicle_id).or_default().push(row);
    }

    vehicles
        .into_iter()
        .map(|vehicle| {
            let locations = by_vehicle.remove(&vehicle.id).unwrap_or_default();
            (vehicle, locations)
        })
        .collect()
}

/// Returns `None` when a location with the same correlation id already exists.
pub async fn insert_location(
    pool: &DbPool,
    location: &NewGpsLocation,
) -> sqlx::Result<Option<GpsLocation>> {
    sqlx::query_as::<_, GpsLocation>(queries::INSERT_GPS_LOCATION)
        .bind(location.vehicle_id)
        .bind(location.point.latitude)
        .bind(location.point.longitude)
        .bind(location.timestamp)
        .bind(location.correlation_id)
        .fetch_optional(pool)
        .await
}
