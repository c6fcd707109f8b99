use chrono::{NaiveDateTime, Utc};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::db::{store, DbPool};
use crate::models::gps_location::{GpsLocation, NewGpsLocation};
use crate::models::principal::Principal;
use crate::travel::GeoPoint;

const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("vehicle_id is required")]
    MissingVehicleId,
    #[error("latitude and longitude are required")]
    MissingCoordinates,
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),
    #[error("timestamp '{0}' is not a valid date")]
    InvalidTimestamp(String),
    #[error("vehicle {0} does not exist")]
    UnknownVehicle(i64),
    #[error("not allowed to record locations for vehicle {0}")]
    Forbidden(i64),
    #[error("location {0} was already recorded")]
    Duplicate(Uuid),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

/// Unvalidated ping, as received from either ingestion surface.
#[derive(Debug, Clone, Default)]
pub struct PingInput {
    pub vehicle_id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timestamp: Option<String>,
    pub correlation_id: Option<Uuid>,
}

pub fn validate_point(latitude: f64, longitude: f64) -> Result<GeoPoint, LocationError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(LocationError::InvalidLatitude(latitude));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(LocationError::InvalidLongitude(longitude));
    }
    Ok(GeoPoint::new(latitude, longitude))
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, LocationError> {
    let value = value.trim();
    if let Ok(t) = chrono::DateTime::parse_from_rfc3339(value) {
        return Ok(t.naive_utc());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| LocationError::InvalidTimestamp(value.to_string()))
}

/// Checks everything that does not need the store. A missing timestamp
/// means "now".
pub fn validate(input: &PingInput) -> Result<NewGpsLocation, LocationError> {
    let vehicle_id = input.vehicle_id.ok_or(LocationError::MissingVehicleId)?;
    let (latitude, longitude) = match (input.latitude, input.longitude) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return Err(LocationError::MissingCoordinates),
    };
    let point = validate_point(latitude, longitude)?;

    let timestamp = match input.timestamp.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => parse_timestamp(s)?,
        _ => Utc::now().naive_utc(),
    };

    Ok(NewGpsLocation {
        vehicle_id,
        point,
        timestamp,
        correlation_id: input.correlation_id,
    })
}

/// Validates and stores one ping.
///
/// `principal` is `None` for trusted tracker traffic; when present the
/// caller must own the vehicle or be an admin.
pub async fn record_location(
    pool: &DbPool,
    principal: Option<&Principal>,
    input: &PingInput,
) -> Result<GpsLocation, LocationError> {
    let location = validate(input)?;

    let vehicle = store::fetch_vehicle(pool, location.vehicle_id)
        .await?
        .ok_or(LocationError::UnknownVehicle(location.vehicle_id))?;

    if let Some(principal) = principal {
        if !principal.can_access(vehicle.user_id) {
            return Err(LocationError::Forbidden(vehicle.id));
        }
    }

    match store::insert_location(pool, &location).await? {
        Some(saved) => {
            info!(
                "Recorded location {} for vehicle {} at {}",
                saved.id, saved.vehicle_id, saved.timestamp
            );
            Ok(saved)
        }
        None => Err(LocationError::Duplicate(location.correlation_id.unwrap_or_default())),
    }
}
