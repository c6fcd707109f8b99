use serde::{Deserialize, Serialize};

/// Mean Earth radius used by every distance computation, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Great-circle distance between two points on a spherical Earth.
///
/// Inputs are not range checked; ingestion rejects out-of-range
/// coordinates before they are stored.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Rounds a distance to two decimal places, half away from zero.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_same_point_is_zero() {
        let p = GeoPoint::new(24.7136, 46.6753);
        assert_eq!(haversine_km(p, p), 0.0);

        let origin = GeoPoint::new(0.0, 0.0);
        assert_eq!(origin.distance_km(&origin), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            (GeoPoint::new(24.7136, 46.6753), GeoPoint::new(24.6408, 46.7728)),
            (GeoPoint::new(51.5074, -0.1278), GeoPoint::new(48.8566, 2.3522)),
            (GeoPoint::new(-33.8688, 151.2093), GeoPoint::new(40.7128, -74.0060)),
        ];
        for (a, b) in pairs {
            assert_eq!(haversine_km(a, b), haversine_km(b, a));
        }
    }

    #[test]
    fn test_pole_to_pole() {
        let north = GeoPoint::new(90.0, 0.0);
        let south = GeoPoint::new(-90.0, 0.0);
        let d = haversine_km(north, south);
        assert!((d - EARTH_RADIUS_KM * PI).abs() < 1e-6);
        assert_eq!(round_km(d), 20015.09);
    }

    #[test]
    fn test_riyadh_fixture() {
        let a = GeoPoint::new(24.7136, 46.6753);
        let b = GeoPoint::new(24.6408, 46.7728);
        assert_eq!(round_km(haversine_km(a, b)), 12.75);
    }

    #[test]
    fn test_one_degree_of_longitude_on_equator() {
        let d = haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        assert_eq!(round_km(d), 111.19);
    }

    #[test]
    fn test_round_km() {
        assert_eq!(round_km(11.11949266445603), 11.12);
        assert_eq!(round_km(10.150252722802756), 10.15);
        assert_eq!(round_km(0.004447797065811488), 0.0);
        assert_eq!(round_km(0.0), 0.0);
    }
}
