//! Conversion from wire types to domain types.

use reqwest::Url;

use crate::domain::{Coordinate, OpeningStatus, Venue};
use crate::planner::RouteResponse;

use super::types::{DirectionsRoute, LatLng, PlaceResult};

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

impl From<LatLng> for Coordinate {
    fn from(ll: LatLng) -> Self {
        Coordinate::new(ll.lat, ll.lng)
    }
}

/// Convert a place to a venue.
///
/// `id` is taken from the place when present, otherwise from `fallback_id`
/// (Place Details responses omit it). Returns `None` when neither is set.
pub fn venue_from_place(place: &PlaceResult, fallback_id: Option<&str>) -> Option<Venue> {
    let id = place.place_id.as_deref().or(fallback_id)?;

    let address = place
        .formatted_address
        .as_deref()
        .or(place.vicinity.as_deref())
        .unwrap_or_default()
        .to_string();

    let open_now = place.opening_hours.as_ref().and_then(|h| h.open_now);

    Some(Venue {
        id: id.to_string(),
        name: place.name.clone(),
        maps_link: maps_link(id, &place.name, &address),
        address,
        rating: place.rating.unwrap_or(0.0),
        review_count: place.user_ratings_total.unwrap_or(0),
        opening_status: OpeningStatus::from_open_now(open_now),
        position: place.geometry.location.into(),
        price_tier: place.price_level,
        estimated_arrival: None,
        corridor_deviation: None,
    })
}

/// Link that opens the venue in Google Maps.
pub fn maps_link(id: &str, name: &str, address: &str) -> String {
    let query = format!("{name} {address}");
    match Url::parse_with_params(
        MAPS_SEARCH_URL,
        &[("api", "1"), ("query", query.as_str()), ("query_place_id", id)],
    ) {
        Ok(url) => url.to_string(),
        Err(_) => MAPS_SEARCH_URL.to_string(),
    }
}

/// Convert the first directions route to a [`RouteResponse`].
pub fn route_from_directions(route: &DirectionsRoute) -> RouteResponse {
    RouteResponse {
        polyline: route.overview_polyline.points.clone(),
        leg_durations_secs: route.legs.iter().map(|l| l.duration.value).collect(),
        leg_distances_m: route.legs.iter().map(|l| l.distance.value).collect(),
        waypoint_order: route.waypoint_order.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::types::{Geometry, OpeningHours};

    fn place() -> PlaceResult {
        PlaceResult {
            place_id: Some("ChIJabc".into()),
            name: "Le Zinc".into(),
            formatted_address: None,
            vicinity: Some("3 Rue Royale, Lille".into()),
            rating: Some(4.3),
            user_ratings_total: Some(87),
            opening_hours: Some(OpeningHours {
                open_now: Some(false),
            }),
            geometry: Geometry {
                location: LatLng {
                    lat: 50.64,
                    lng: 3.06,
                },
            },
            price_level: Some(1),
        }
    }

    #[test]
    fn converts_full_place() {
        let venue = venue_from_place(&place(), None).unwrap();

        assert_eq!(venue.id, "ChIJabc");
        assert_eq!(venue.address, "3 Rue Royale, Lille");
        assert_eq!(venue.rating, 4.3);
        assert_eq!(venue.review_count, 87);
        assert_eq!(venue.opening_status, OpeningStatus::Closed);
        assert_eq!(venue.position, Coordinate::new(50.64, 3.06));
        assert_eq!(venue.price_tier, Some(1));
        assert!(venue.maps_link.contains("query_place_id=ChIJabc"));
    }

    #[test]
    fn formatted_address_wins_over_vicinity() {
        let mut p = place();
        p.formatted_address = Some("3 Rue Royale, 59800 Lille, France".into());
        let venue = venue_from_place(&p, None).unwrap();
        assert_eq!(venue.address, "3 Rue Royale, 59800 Lille, France");
    }

    #[test]
    fn missing_fields_default() {
        let mut p = place();
        p.rating = None;
        p.user_ratings_total = None;
        p.opening_hours = None;
        p.price_level = None;

        let venue = venue_from_place(&p, None).unwrap();
        assert_eq!(venue.rating, 0.0);
        assert_eq!(venue.review_count, 0);
        assert_eq!(venue.opening_status, OpeningStatus::Unknown);
        assert_eq!(venue.price_tier_or_default(), 2);
    }

    #[test]
    fn id_falls_back_when_absent() {
        let mut p = place();
        p.place_id = None;

        assert!(venue_from_place(&p, None).is_none());
        assert_eq!(venue_from_place(&p, Some("req-id")).unwrap().id, "req-id");
    }

    #[test]
    fn maps_link_encodes_query() {
        let link = maps_link("X1", "Bar & Co", "Lille");
        assert!(link.starts_with("https://www.google.com/maps/search/?api=1&query="));
        assert!(link.contains("Bar+%26+Co+Lille"));
        assert!(link.ends_with("query_place_id=X1"));
    }
}
