use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use crate::models::vehicle::Vehicle;
use crate::travel::{LocationSample, TravelSegment, TravelSummary, VehicleRef, VehicleTravels};

/// Envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            errors: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    pub fn failure(message: impl Into<String>, errors: Option<Value>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            errors,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct SegmentEndpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: NaiveDateTime,
}

impl SegmentEndpoint {
    fn with_id(sample: &LocationSample) -> Self {
        Self {
            id: Some(sample.id),
            ..Self::without_id(sample)
        }
    }

    fn without_id(sample: &LocationSample) -> Self {
        Self {
            id: None,
            latitude: sample.point.latitude,
            longitude: sample.point.longitude,
            timestamp: sample.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SegmentView {
    pub start_location: SegmentEndpoint,
    pub end_location: SegmentEndpoint,
    pub distance_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
}

impl SegmentView {
    /// Single-vehicle shape: sample ids and duration included.
    pub fn detailed(segment: &TravelSegment) -> Self {
        Self {
            start_location: SegmentEndpoint::with_id(&segment.start),
            end_location: SegmentEndpoint::with_id(&segment.end),
            distance_km: segment.distance_km,
            duration_minutes: Some(segment.duration_minutes()),
        }
    }

    /// Fleet shape: coordinates and timestamps only.
    pub fn compact(segment: &TravelSegment) -> Self {
        Self {
            start_location: SegmentEndpoint::without_id(&segment.start),
            end_location: SegmentEndpoint::without_id(&segment.end),
            distance_km: segment.distance_km,
            duration_minutes: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VehicleIdentity {
    pub id: i64,
    pub title: String,
    pub plate_number: String,
}

#[derive(Debug, Serialize)]
pub struct SegmentsData {
    pub vehicle: VehicleIdentity,
    pub segments: Vec<SegmentView>,
    pub total_distance_km: f64,
    pub total_segments: usize,
}

impl SegmentsData {
    pub fn new(vehicle: &Vehicle, summary: &TravelSummary) -> Self {
        Self {
            vehicle: VehicleIdentity {
                id: vehicle.id,
                title: vehicle.title.clone(),
                plate_number: vehicle.plate_number.clone(),
            },
            segments: summary.segments.iter().map(SegmentView::detailed).collect(),
            total_distance_km: summary.total_distance_km,
            total_segments: summary.segment_count(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FleetVehicle {
    pub id: i64,
    pub title: String,
    pub plate_number: String,
    pub brand: String,
    pub model: String,
}

impl From<VehicleRef> for FleetVehicle {
    fn from(v: VehicleRef) -> Self {
        Self {
            id: v.id,
            title: v.title,
            plate_number: v.plate_number,
            brand: v.brand,
            model: v.model,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FleetEntry {
    pub vehicle: FleetVehicle,
    pub total_distance_km: f64,
    pub segments_count: usize,
    pub segments: Vec<SegmentView>,
}

impl From<VehicleTravels> for FleetEntry {
    fn from(travels: VehicleTravels) -> Self {
        let summary = travels.summary;
        Self {
            vehicle: travels.vehicle.into(),
            total_distance_km: summary.total_distance_km,
            segments_count: summary.segment_count(),
            segments: summary.segments.iter().map(SegmentView::compact).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VehicleWithDistance {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub total_distance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::travel::{
        fleet_travel_summary, segments_for_vehicle, total_distance_km, GeoPoint,
        INSUFFICIENT_DATA_NOTE,
    };
    use chrono::{Duration, NaiveDate};
    use serde_json::json;

    fn samples() -> Vec<LocationSample> {
        let t0 = NaiveDate::from_ymd_opt(2025, 9, 12)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        vec![
            LocationSample::new(1, 3, GeoPoint::new(24.0, 46.0), t0),
            LocationSample::new(2, 3, GeoPoint::new(24.1, 46.0), t0 + Duration::minutes(10)),
            LocationSample::new(3, 3, GeoPoint::new(24.1, 46.1), t0 + Duration::minutes(25)),
        ]
    }

    fn vehicle() -> Vehicle {
        let t = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Vehicle {
            id: 3,
            user_id: 8,
            title: "Delivery van".to_string(),
            image: None,
            plate_number: "RUH-1234".to_string(),
            brand: "Hyundai".to_string(),
            model: "H1".to_string(),
            price: 95000.0,
            year: 2022,
            status: "Published".to_string(),
            created_at: t,
            updated_at: t,
            deleted_at: None,
        }
    }

    #[test]
    fn test_segments_payload_shape() {
        let summary = segments_for_vehicle(&samples());
        let response = ApiResponse::ok(SegmentsData::new(&vehicle(), &summary));
        let value = serde_json::to_value(response).unwrap();

        assert_eq!(value["success"], json!(true));
        assert!(value.get("message").is_none());
        let data = &value["data"];
        assert_eq!(
            data["vehicle"],
            json!({"id": 3, "title": "Delivery van", "plate_number": "RUH-1234"})
        );
        assert_eq!(data["total_distance_km"], json!(21.27));
        assert_eq!(data["total_segments"], json!(2));
        assert_eq!(
            data["segments"][1],
            json!({
                "start_location": {
                    "id": 2,
                    "latitude": 24.1,
                    "longitude": 46.0,
                    "timestamp": "2025-09-12T08:10:00"
                },
                "end_location": {
                    "id": 3,
                    "latitude": 24.1,
                    "longitude": 46.1,
                    "timestamp": "2025-09-12T08:25:00"
                },
                "distance_km": 10.15,
                "duration_minutes": 15
            })
        );
    }

    #[test]
    fn test_insufficient_data_payload() {
        let track = samples();
        let summary = segments_for_vehicle(&track[..1]);
        let mut response = ApiResponse::ok(SegmentsData::new(&vehicle(), &summary));
        if let Some(note) = summary.note() {
            response = response.with_message(note);
        }

        // Compared as text: Value equality treats -0.0 and 0.0 as equal.
        let body = serde_json::to_string(&response).unwrap();
        let expected = format!(
            concat!(
                r#"{{"success":true,"message":"{}","data":{{"#,
                r#""vehicle":{{"id":3,"title":"Delivery van","plate_number":"RUH-1234"}},"#,
                r#""segments":[],"total_distance_km":0.0,"total_segments":0}}}}"#
            ),
            INSUFFICIENT_DATA_NOTE
        );
        assert_eq!(body, expected);
    }

    #[test]
    fn test_fleet_entry_omits_ids_and_duration() {
        let travels = fleet_travel_summary(vec![(vehicle().to_ref(), samples())]);
        let entry = FleetEntry::from(travels.into_iter().next().unwrap());
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["vehicle"]["brand"], json!("Hyundai"));
        assert_eq!(value["vehicle"]["model"], json!("H1"));
        assert_eq!(value["segments_count"], json!(2));
        assert_eq!(value["total_distance_km"], json!(21.27));
        assert_eq!(
            value["segments"][0],
            json!({
                "start_location": {
                    "latitude": 24.0,
                    "longitude": 46.0,
                    "timestamp": "2025-09-12T08:00:00"
                },
                "end_location": {
                    "latitude": 24.1,
                    "longitude": 46.0,
                    "timestamp": "2025-09-12T08:10:00"
                },
                "distance_km": 11.12
            })
        );
    }

    #[test]
    fn test_vehicle_without_travels_has_zero_distance() {
        for locations in [Vec::new(), samples()[..1].to_vec()] {
            let body = serde_json::to_string(&VehicleWithDistance {
                vehicle: vehicle(),
                total_distance: total_distance_km(&locations),
            })
            .unwrap();
            assert!(body.ends_with(r#","total_distance":0.0}"#), "{}", body);
            assert!(!body.contains("-0.0"), "{}", body);
        }
    }

    #[test]
    fn test_vehicle_with_distance_is_flat() {
        let value = serde_json::to_value(VehicleWithDistance {
            vehicle: vehicle(),
            total_distance: 21.27,
        })
        .unwrap();
        assert_eq!(value["plate_number"], json!("RUH-1234"));
        assert_eq!(value["total_distance"], json!(21.27));
        assert_eq!(value["deleted_at"], json!(null));
    }

    #[test]
    fn test_failure_envelope() {
        let response = ApiResponse::<()>::failure("Unauthorized", None);
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value, json!({"success": false, "message": "Unauthorized"}));
    }
}
