use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::travel::{GeoPoint, LocationSample};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GpsLocation {
    pub id: i64, // bigserial
    pub vehicle_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: NaiveDateTime,
    pub correlation_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
}

impl GpsLocation {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn sample(&self) -> LocationSample {
        LocationSample::new(self.id, self.vehicle_id, self.point(), self.timestamp)
    }
}

/// A validated ping ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewGpsLocation {
    pub vehicle_id: i64,
    pub point: GeoPoint,
    pub timestamp: NaiveDateTime,
    pub correlation_id: Option<Uuid>,
}

pub fn samples(locations: &[GpsLocation]) -> Vec<LocationSample> {
    locations.iter().map(GpsLocation::sample).collect()
}
