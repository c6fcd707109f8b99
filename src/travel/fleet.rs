use super::segments::{segments_for_vehicle, LocationSample, TravelSummary};

/// Identity and display fields echoed next to each vehicle's travels.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRef {
    pub id: i64,
    pub title: String,
    pub plate_number: String,
    pub brand: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleTravels {
    pub vehicle: VehicleRef,
    pub summary: TravelSummary,
}

/// Travel summaries for every vehicle of a fleet, in the given vehicle order.
///
/// Vehicles with fewer than two samples are left out of the result
/// entirely, unlike [`segments_for_vehicle`] which returns an empty summary.
pub fn fleet_travel_summary<I>(vehicles: I) -> Vec<VehicleTravels>
where
    I: IntoIterator<Item = (VehicleRef, Vec<LocationSample>)>,
{
    vehicles
        .into_iter()
        .filter(|(_, samples)| samples.len() >= 2)
        .map(|(vehicle, samples)| VehicleTravels {
            vehicle,
            summary: segments_for_vehicle(&samples),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::travel::GeoPoint;
    use chrono::{Duration, NaiveDate};

    fn vehicle(id: i64) -> VehicleRef {
        VehicleRef {
            id,
            title: format!("Truck {}", id),
            plate_number: format!("ABC-{:03}", id),
            brand: "Toyota".to_string(),
            model: "Hilux".to_string(),
        }
    }

    fn track(vehicle_id: i64, n: usize) -> Vec<LocationSample> {
        let t0 = NaiveDate::from_ymd_opt(2025, 9, 12)
            .unwrap()
            .and_hms_opt(6, 30, 0)
            .unwrap();
        (0..n)
            .map(|i| {
                LocationSample::new(
                    vehicle_id * 100 + i as i64,
                    vehicle_id,
                    GeoPoint::new(24.0 + i as f64 * 0.1, 46.0),
                    t0 + Duration::minutes(i as i64 * 10),
                )
            })
            .collect()
    }

    #[test]
    fn test_vehicles_without_enough_samples_are_omitted() {
        let fleet = vec![
            (vehicle(1), track(1, 3)),
            (vehicle(2), track(2, 0)),
            (vehicle(3), track(3, 1)),
            (vehicle(4), track(4, 2)),
        ];
        let travels = fleet_travel_summary(fleet);

        let ids: Vec<i64> = travels.iter().map(|t| t.vehicle.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(travels[0].summary.segment_count(), 2);
        assert_eq!(travels[1].summary.segment_count(), 1);
    }

    #[test]
    fn test_input_vehicle_order_is_kept() {
        // Vehicle 9 travels further than vehicle 2 but stays second.
        let fleet = vec![(vehicle(2), track(2, 2)), (vehicle(9), track(9, 6))];
        let travels = fleet_travel_summary(fleet);

        assert_eq!(travels[0].vehicle.id, 2);
        assert_eq!(travels[1].vehicle.id, 9);
        assert!(travels[1].summary.total_distance_km > travels[0].summary.total_distance_km);
    }

    #[test]
    fn test_entries_match_single_vehicle_summary() {
        let samples = track(5, 4);
        let travels = fleet_travel_summary(vec![(vehicle(5), samples.clone())]);

        assert_eq!(travels.len(), 1);
        assert_eq!(travels[0].vehicle, vehicle(5));
        assert_eq!(travels[0].summary, segments_for_vehicle(&samples));
    }

    #[test]
    fn test_empty_fleet() {
        assert!(fleet_travel_summary(Vec::<(VehicleRef, Vec<LocationSample>)>::new()).is_empty());
    }
}
