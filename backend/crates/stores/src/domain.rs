//! Store reference data
//!
//! Projects the raw Google-Places-shaped dataset into the flat records
//! the frontend consumes. Entries without numeric coordinates cannot be
//! mapped and are skipped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw dataset entry. Only the fields this layer projects are typed;
/// pass-through blobs (address components, opening hours) stay as JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceDetails {
    pub location: Option<PlaceLocation>,
    pub display_name: Option<PlaceText>,
    pub formatted_address: Option<String>,
    pub address_components: Option<Vec<Value>>,
    pub national_phone_number: Option<String>,
    pub rating: Option<f64>,
    pub google_maps_links: Option<PlaceLinks>,
    pub google_maps_uri: Option<String>,
    pub website_uri: Option<String>,
    pub regular_opening_hours: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaceLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaceText {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceLinks {
    pub place_uri: Option<String>,
    pub write_a_review_uri: Option<String>,
}

/// Store record served to the frontend
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub address_short: Vec<Value>,
    pub phone: Option<String>,
    pub rating: Option<f64>,
    pub place_uri: Option<String>,
    pub write_review_uri: Option<String>,
    pub website_uri: Option<String>,
    pub opening_hours: Option<Value>,
}

/// Project the dataset map (keyed by place id) into store records.
pub fn transform_stores(data: BTreeMap<String, PlaceDetails>) -> Vec<Store> {
    data.into_iter()
        .filter_map(|(id, place)| {
            let location = place.location?;
            let (lat, lng) = (location.latitude?, location.longitude?);

            Some(Store {
                id,
                name: place
                    .display_name
                    .and_then(|d| d.text)
                    .unwrap_or_else(|| "Sin nombre".to_string()),
                lat,
                lng,
                address: place
                    .formatted_address
                    .unwrap_or_else(|| "Sin dirección".to_string()),
                address_short: place.address_components.unwrap_or_default(),
                phone: place.national_phone_number,
                rating: place.rating,
                place_uri: place
                    .google_maps_links
                    .as_ref()
                    .and_then(|links| links.place_uri.clone())
                    .or(place.google_maps_uri),
                write_review_uri: place
                    .google_maps_links
                    .and_then(|links| links.write_a_review_uri),
                website_uri: place.website_uri,
                opening_hours: place.regular_opening_hours,
            })
        })
        .collect()
}
