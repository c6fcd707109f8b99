use chrono::{Duration, NaiveDateTime};

use super::distance::{haversine_km, round_km, GeoPoint};

pub const INSUFFICIENT_DATA_NOTE: &str = "Not enough GPS locations to calculate travel segments";

/// One stored GPS ping, reduced to what distance computations need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationSample {
    pub id: i64,
    pub vehicle_id: i64,
    pub point: GeoPoint,
    pub timestamp: NaiveDateTime,
}

impl LocationSample {
    pub fn new(id: i64, vehicle_id: i64, point: GeoPoint, timestamp: NaiveDateTime) -> Self {
        Self {
            id,
            vehicle_id,
            point,
            timestamp,
        }
    }
}

/// Leg between two temporally adjacent samples of the same vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelSegment {
    pub start: LocationSample,
    pub end: LocationSample,
    pub distance_km: f64,
    pub duration: Duration,
}

impl TravelSegment {
    pub fn between(start: LocationSample, end: LocationSample) -> Self {
        Self {
            start,
            end,
            distance_km: round_km(haversine_km(start.point, end.point)),
            duration: end.timestamp - start.timestamp,
        }
    }

    /// Whole minutes between the two samples. Partial minutes are dropped.
    pub fn duration_minutes(&self) -> i64 {
        self.duration.num_minutes()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TravelSummary {
    pub segments: Vec<TravelSegment>,
    pub total_distance_km: f64,
}

impl TravelSummary {
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Explanation attached to summaries built from fewer than two samples.
    pub fn note(&self) -> Option<&'static str> {
        if self.is_empty() {
            Some(INSUFFICIENT_DATA_NOTE)
        } else {
            None
        }
    }
}

/// Builds the travel summary of one vehicle.
///
/// `samples` must already be ordered by timestamp; the order is used as-is
/// and segment `i` always joins `samples[i]` and `samples[i + 1]`. With
/// fewer than two samples the summary is empty, which is not an error.
///
/// The total is the sum of the per-segment distances *after* they were
/// rounded to two decimals, so it can drift from rounding the raw sum.
pub fn segments_for_vehicle(samples: &[LocationSample]) -> TravelSummary {
    let segments: Vec<TravelSegment> = samples
        .windows(2)
        .map(|pair| TravelSegment::between(pair[0], pair[1]))
        .collect();

    // An empty f64 `sum()` yields -0.0.
    let total_distance_km =
        round_km(segments.iter().fold(0.0, |acc, s| acc + s.distance_km));

    TravelSummary {
        segments,
        total_distance_km,
    }
}

pub fn total_distance_km(samples: &[LocationSample]) -> f64 {
    segments_for_vehicle(samples).total_distance_km
}
