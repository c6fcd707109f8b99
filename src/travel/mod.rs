pub mod distance;
pub mod fleet;
pub mod segments;

pub use distance::{haversine_km, round_km, GeoPoint, EARTH_RADIUS_KM};
pub use fleet::{fleet_travel_summary, VehicleRef, VehicleTravels};
pub use segments::{
    segments_for_vehicle, total_distance_km, LocationSample, TravelSegment, TravelSummary,
    INSUFFICIENT_DATA_NOTE,
};
