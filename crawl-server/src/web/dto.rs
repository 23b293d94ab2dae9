//! Data transfer objects for web requests and responses.
//!
//! Field names follow the JSON the browser front end already speaks, which
//! is camelCase except for `price_level`.

use serde::{Deserialize, Serialize};

use crate::domain::{ClockTime, Coordinate, Mode, OpeningStatus, TripResult, Venue};
use crate::planner::{CrawlError, CrawlRequest};

/// Request to generate a crawl.
///
/// Every field is optional on the wire so that a missing one is reported as
/// a missing parameter rather than a JSON error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCrawlRequest {
    /// Start address
    pub start: Option<String>,

    /// End address
    pub end: Option<String>,

    /// Number of bars wanted
    pub bars_count: Option<usize>,

    /// Arrival time at the first bar, "HH:MM"
    pub start_time: Option<String>,

    /// "rating", "price", "mixed" or "shortest"; anything else means rating
    pub mode: Option<String>,
}

impl GenerateCrawlRequest {
    /// Convert to a planner request.
    pub fn into_crawl_request(self) -> Result<CrawlRequest, CrawlError> {
        let start = non_empty(self.start).ok_or(CrawlError::MissingParameter("start"))?;
        let end = non_empty(self.end).ok_or(CrawlError::MissingParameter("end"))?;
        let stop_count = self
            .bars_count
            .filter(|n| *n > 0)
            .ok_or(CrawlError::MissingParameter("barsCount"))?;
        let start_time = non_empty(self.start_time)
            .ok_or(CrawlError::MissingParameter("startTime"))?;

        let start_time = ClockTime::parse(&start_time)
            .map_err(|e| CrawlError::InvalidRequest(format!("startTime: {e}")))?;

        let mode = self
            .mode
            .as_deref()
            .map(Mode::parse_lenient)
            .unwrap_or_default();

        Ok(CrawlRequest::new(start, end, stop_count, start_time, mode))
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

/// A generated crawl.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResponse {
    /// Encoded polyline of the walking route
    pub route_polyline: String,

    pub bars: Vec<BarResult>,

    /// e.g. "42 minutes"
    pub total_duration: String,

    /// e.g. "3.1 km"
    pub total_distance: String,
}

impl CrawlResponse {
    pub fn from_trip(trip: &TripResult) -> Self {
        Self {
            route_polyline: trip.path.clone(),
            bars: trip.venues.iter().map(BarResult::from_venue).collect(),
            total_duration: trip.duration_label(),
            total_distance: trip.distance_label(),
        }
    }
}

/// A bar in a generated crawl.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarResult {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub user_ratings_total: u32,

    /// Opening status as display text
    pub opening_hours: String,

    pub google_maps_link: String,
    pub position: Coordinate,

    /// "HH:MM", empty if not estimated
    pub estimated_arrival_time: String,

    #[serde(rename = "price_level", skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,

    /// Distance from the direct route in metres, corridor mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation: Option<f64>,
}

impl BarResult {
    pub fn from_venue(venue: &Venue) -> Self {
        Self {
            id: venue.id.clone(),
            name: venue.name.clone(),
            address: venue.address.clone(),
            rating: venue.rating,
            user_ratings_total: venue.review_count,
            opening_hours: opening_hours_label(venue.opening_status).to_string(),
            google_maps_link: venue.maps_link.clone(),
            position: venue.position,
            estimated_arrival_time: venue
                .estimated_arrival
                .map(|t| t.to_string())
                .unwrap_or_default(),
            price_level: venue.price_tier,
            deviation: venue.corridor_deviation,
        }
    }
}

/// Display text for an opening status.
pub fn opening_hours_label(status: OpeningStatus) -> &'static str {
    match status {
        OpeningStatus::Open => "Ouvert",
        OpeningStatus::Closed => "Fermé",
        OpeningStatus::Unknown => "Horaires inconnus",
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateCrawlRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn request_from_front_end_json() {
        let body = parse(json!({
            "start": "République, Lille",
            "end": "Gare Lille Flandres, Lille",
            "barsCount": 4,
            "startTime": "20:00",
            "mode": "shortest"
        }));

        let request = body.into_crawl_request().unwrap();

        assert_eq!(request.start, "République, Lille");
        assert_eq!(request.end, "Gare Lille Flandres, Lille");
        assert_eq!(request.stop_count, 4);
        assert_eq!(request.start_time.to_string(), "20:00");
        assert_eq!(request.mode, Mode::ShortestCorridor);
    }

    #[test]
    fn mode_defaults_to_rating() {
        let absent = parse(json!({
            "start": "a", "end": "b", "barsCount": 2, "startTime": "19:30"
        }));
        assert_eq!(absent.into_crawl_request().unwrap().mode, Mode::Rating);

        let unknown = parse(json!({
            "start": "a", "end": "b", "barsCount": 2, "startTime": "19:30", "mode": "cheapest"
        }));
        assert_eq!(unknown.into_crawl_request().unwrap().mode, Mode::Rating);
    }

    #[test]
    fn missing_fields_are_named() {
        let cases = [
            (json!({ "end": "b", "barsCount": 2, "startTime": "19:30" }), "start"),
            (json!({ "start": "a", "end": "", "barsCount": 2, "startTime": "19:30" }), "end"),
            (json!({ "start": "a", "end": "b", "startTime": "19:30" }), "barsCount"),
            (json!({ "start": "a", "end": "b", "barsCount": 0, "startTime": "19:30" }), "barsCount"),
            (json!({ "start": "a", "end": "b", "barsCount": 2 }), "startTime"),
        ];

        for (value, field) in cases {
            let err = parse(value).into_crawl_request().unwrap_err();
            assert_eq!(err, CrawlError::MissingParameter(field));
        }
    }

    #[test]
    fn bad_start_time_is_invalid() {
        let body = parse(json!({
            "start": "a", "end": "b", "barsCount": 2, "startTime": "8pm"
        }));

        assert!(matches!(
            body.into_crawl_request(),
            Err(CrawlError::InvalidRequest(_))
        ));
    }

    #[test]
    fn bar_json_shape() {
        let mut venue = Venue::new("abc", "Le Bar", Coordinate::new(50.63, 3.06))
            .with_address("1 rue Solférino, Lille")
            .with_rating(4.5, 210)
            .with_opening_status(OpeningStatus::Open);
        venue.maps_link = "https://www.google.com/maps/search/?api=1".to_string();
        venue.estimated_arrival = ClockTime::from_hm(21, 15);

        let value = serde_json::to_value(BarResult::from_venue(&venue)).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "abc",
                "name": "Le Bar",
                "address": "1 rue Solférino, Lille",
                "rating": 4.5,
                "userRatingsTotal": 210,
                "openingHours": "Ouvert",
                "googleMapsLink": "https://www.google.com/maps/search/?api=1",
                "position": { "lat": 50.63, "lng": 3.06 },
                "estimatedArrivalTime": "21:15"
            })
        );
    }

    #[test]
    fn bar_json_optional_fields() {
        let mut venue = Venue::new("abc", "Le Bar", Coordinate::new(50.63, 3.06)).with_price_tier(3);
        venue.corridor_deviation = Some(42.5);

        let value = serde_json::to_value(BarResult::from_venue(&venue)).unwrap();

        assert_eq!(value["price_level"], json!(3));
        assert_eq!(value["deviation"], json!(42.5));
        assert_eq!(value["openingHours"], json!("Horaires inconnus"));
        assert_eq!(value["estimatedArrivalTime"], json!(""));
    }

    #[test]
    fn crawl_response_labels() {
        let trip = TripResult {
            path: "_p~iF~ps|U".to_string(),
            venues: vec![Venue::new("a", "A", Coordinate::new(0.0, 0.0))],
            total_duration_secs: 2_530,
            total_distance_m: 3_149,
        };

        let value = serde_json::to_value(CrawlResponse::from_trip(&trip)).unwrap();

        assert_eq!(value["routePolyline"], json!("_p~iF~ps|U"));
        assert_eq!(value["totalDuration"], json!("42 minutes"));
        assert_eq!(value["totalDistance"], json!("3.1 km"));
        assert_eq!(value["bars"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn opening_labels() {
        assert_eq!(opening_hours_label(OpeningStatus::Closed), "Fermé");
        assert_eq!(opening_hours_label(OpeningStatus::Unknown), "Horaires inconnus");
    }
}
