//! Geo-distance utility
//!
//! Great-circle distances for the "stores near me" sort and the
//! distance badge the UI shows next to each store.

use serde::Serialize;

use crate::domain::Store;

/// Mean Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two coordinates, in km.
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance badge: meters under one kilometer, else one decimal in km.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{}m", (km * 1000.0).round() as i64)
    } else {
        format!("{:.1}km", km)
    }
}

/// Store plus its distance from the search point
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreWithDistance {
    #[serde(flatten)]
    pub store: Store,
    pub distance_km: f64,
    pub distance_label: String,
}

/// Attach distances from `(lat, lng)` and sort ascending by proximity.
pub fn with_distances(stores: Vec<Store>, lat: f64, lng: f64) -> Vec<StoreWithDistance> {
    let mut out: Vec<StoreWithDistance> = stores
        .into_iter()
        .map(|store| {
            let km = distance_km(lat, lng, store.lat, store.lng);
            StoreWithDistance {
                store,
                distance_km: km,
                distance_label: format_distance(km),
            }
        })
        .collect();

    out.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn store(id: &str, lat: f64, lng: f64) -> Store {
        Store {
            id: id.to_string(),
            name: id.to_string(),
            lat,
            lng,
            address: String::new(),
            address_short: Vec::new(),
            phone: None,
            rating: None,
            place_uri: None,
            write_review_uri: None,
            website_uri: None,
            opening_hours: None,
        }
    }

    #[test]
    fn test_distance_zero_for_same_point() {
        assert_eq!(distance_km(-34.6, -58.4, -34.6, -58.4), 0.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let ab = distance_km(-34.6037, -58.3816, -31.4201, -64.1888);
        let ba = distance_km(-31.4201, -64.1888, -34.6037, -58.3816);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_distance_buenos_aires_cordoba() {
        // Obelisco to central Córdoba, roughly 646 km great-circle.
        let km = distance_km(-34.6037, -58.3816, -31.4201, -64.1888);
        assert!((km - 646.0).abs() < 10.0, "got {km}");
    }

    #[test]
    fn test_format_distance_meters_under_one_km() {
        assert_eq!(format_distance(0.85), "850m");
        assert_eq!(format_distance(0.0049), "5m");
    }

    #[test]
    fn test_format_distance_km_with_one_decimal() {
        assert_eq!(format_distance(1.0), "1.0km");
        assert_eq!(format_distance(2.34), "2.3km");
        assert_eq!(format_distance(12.55), "12.6km");
    }

    #[test]
    fn test_with_distances_sorts_ascending() {
        let stores = vec![
            store("far", -31.42, -64.19),
            store("near", -34.61, -58.39),
            store("here", -34.6037, -58.3816),
        ];

        let sorted = with_distances(stores, -34.6037, -58.3816);
        let ids: Vec<&str> = sorted.iter().map(|s| s.store.id.as_str()).collect();

        assert_eq!(ids, vec!["here", "near", "far"]);
        assert!(sorted[0].distance_km < sorted[1].distance_km);
        assert!(sorted[1].distance_km < sorted[2].distance_km);
    }

    #[test]
    fn test_with_distances_serializes_flat() {
        let sorted = with_distances(vec![store("s", -34.6, -58.4)], -34.6, -58.4);
        let value: Value = serde_json::to_value(&sorted[0]).unwrap();

        // Store fields and distance fields share one flat object.
        assert_eq!(value["id"], "s");
        assert_eq!(value["distanceKm"], 0.0);
        assert_eq!(value["distanceLabel"], "0m");
    }
}
