//! Wire types for the Google Maps web services.
//!
//! Only the fields the planner reads are modelled; everything else in the
//! responses is ignored. Every response carries a `status` string which is
//! checked before the payload is trusted.

use serde::{Deserialize, Serialize};

/// Service status for a successful call.
pub const STATUS_OK: &str = "OK";
/// Service status for a well-formed query with no matches.
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
/// Service status for a missing or unknown place id.
pub const STATUS_NOT_FOUND: &str = "NOT_FOUND";
pub const STATUS_OVER_QUERY_LIMIT: &str = "OVER_QUERY_LIMIT";
pub const STATUS_REQUEST_DENIED: &str = "REQUEST_DENIED";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
}

/// Geocoding API response.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

/// A place as returned by Nearby Search and Place Details.
///
/// Nearby Search fills `vicinity` rather than `formatted_address`; Place
/// Details with an explicit field list omits `place_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    pub geometry: Geometry,
    #[serde(default)]
    pub price_level: Option<u8>,
}

/// Nearby Search response.
#[derive(Debug, Clone, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Place Details response.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<PlaceResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Directions API response.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    pub overview_polyline: OverviewPolyline,
    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,
    /// Present when the request asked for waypoint optimisation.
    #[serde(default)]
    pub waypoint_order: Option<Vec<usize>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsLeg {
    pub duration: TextValue,
    pub distance: TextValue,
}

/// A `{ text, value }` pair; `value` is seconds or metres.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    #[serde(default)]
    pub text: String,
    pub value: u64,
}
