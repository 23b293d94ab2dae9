//! Google Maps HTTP client.
//!
//! Wraps the four web services the planner needs: Geocoding, Places Nearby
//! Search, Place Details and Directions. Handles authentication, bounded
//! concurrency, and the `status` field every response carries.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Coordinate, Venue};
use crate::planner::{MapsProvider, RouteEndpoint, RouteRequest, RouteResponse};

use super::convert::{route_from_directions, venue_from_place};
use super::error::MapsError;
use super::types::{
    DirectionsResponse, GeocodeResponse, NearbySearchResponse, PlaceDetailsResponse, STATUS_NOT_FOUND,
    STATUS_OK, STATUS_OVER_QUERY_LIMIT, STATUS_REQUEST_DENIED, STATUS_ZERO_RESULTS,
};

/// Default base URL for the Google Maps web services.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Default region bias for geocoding and directions.
const DEFAULT_REGION: &str = "fr";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Place types and keywords used for venue search.
const NEARBY_TYPE: &str = "bar";
const NEARBY_KEYWORD: &str = "bar|pub|brasserie";

/// Fields requested from Place Details.
const DETAIL_FIELDS: &str =
    "name,formatted_address,rating,user_ratings_total,opening_hours,geometry,price_level";

/// Configuration for the maps client.
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production Google Maps)
    pub base_url: String,
    /// Region bias (ccTLD code)
    pub region: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MapsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            region: DEFAULT_REGION.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the region bias.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Google Maps API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct MapsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    region: String,
    semaphore: Arc<Semaphore>,
}

impl MapsClient {
    /// Create a new maps client with the given configuration.
    pub fn new(config: MapsConfig) -> Result<Self, MapsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            region: config.region,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Resolve an address to coordinates.
    pub async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, MapsError> {
        let resp: GeocodeResponse = self
            .get_json(
                "/maps/api/geocode/json",
                &[("address", address.to_string()), ("region", self.region.clone())],
            )
            .await?;

        check_status(&resp.status, resp.error_message.as_deref())?;
        debug!(address, status = %resp.status, results = resp.results.len(), "geocoded");

        Ok(resp.results.first().map(|r| r.geometry.location.into()))
    }

    /// Find bars around a point.
    pub async fn nearby_bars(
        &self,
        center: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<Venue>, MapsError> {
        let resp: NearbySearchResponse = self
            .get_json(
                "/maps/api/place/nearbysearch/json",
                &[
                    ("location", center.to_string()),
                    ("radius", radius_m.to_string()),
                    ("type", NEARBY_TYPE.to_string()),
                    ("keyword", NEARBY_KEYWORD.to_string()),
                ],
            )
            .await?;

        check_status(&resp.status, resp.error_message.as_deref())?;
        debug!(%center, radius_m, found = resp.results.len(), "nearby search");

        Ok(resp
            .results
            .iter()
            .filter_map(|p| venue_from_place(p, None))
            .collect())
    }

    /// Get full details for a place.
    ///
    /// Returns `None` for unknown or expired place ids.
    pub async fn place_details(&self, place_id: &str) -> Result<Option<Venue>, MapsError> {
        let resp: PlaceDetailsResponse = self
            .get_json(
                "/maps/api/place/details/json",
                &[
                    ("place_id", place_id.to_string()),
                    ("fields", DETAIL_FIELDS.to_string()),
                ],
            )
            .await?;

        if resp.status == STATUS_NOT_FOUND || resp.status == STATUS_ZERO_RESULTS {
            debug!(place_id, status = %resp.status, "place not found");
            return Ok(None);
        }
        check_status(&resp.status, resp.error_message.as_deref())?;

        Ok(resp
            .result
            .as_ref()
            .and_then(|p| venue_from_place(p, Some(place_id))))
    }

    /// Get walking directions.
    ///
    /// Waypoints are sent as `optimize:true|lat,lng|...` when the request
    /// allows reordering. Returns `None` when no route exists.
    pub async fn directions(
        &self,
        request: &RouteRequest,
    ) -> Result<Option<RouteResponse>, MapsError> {
        let mut query = vec![
            ("origin", endpoint_param(&request.origin)),
            ("destination", endpoint_param(&request.destination)),
            ("mode", "walking".to_string()),
            ("region", self.region.clone()),
        ];
        if let Some(waypoints) = waypoints_param(request) {
            query.push(("waypoints", waypoints));
        }

        let resp: DirectionsResponse = self.get_json("/maps/api/directions/json", &query).await?;

        check_status(&resp.status, resp.error_message.as_deref())?;
        debug!(
            status = %resp.status,
            routes = resp.routes.len(),
            waypoints = request.waypoints.len(),
            "directions"
        );

        Ok(resp.routes.first().map(route_from_directions))
    }

    /// Issue a GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, MapsError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| MapsError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(MapsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MapsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| MapsError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl MapsProvider for MapsClient {
    async fn resolve_address(&self, address: &str) -> Result<Option<Coordinate>, MapsError> {
        self.geocode(address).await
    }

    async fn search_nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<Venue>, MapsError> {
        self.nearby_bars(center, radius_m).await
    }

    async fn fetch_details(&self, id: &str) -> Result<Option<Venue>, MapsError> {
        self.place_details(id).await
    }

    async fn compute_route(
        &self,
        request: &RouteRequest,
    ) -> Result<Option<RouteResponse>, MapsError> {
        self.directions(request).await
    }
}

/// Map a service `status` to an error, letting `OK` and `ZERO_RESULTS` through.
fn check_status(status: &str, error_message: Option<&str>) -> Result<(), MapsError> {
    match status {
        STATUS_OK | STATUS_ZERO_RESULTS => Ok(()),
        STATUS_OVER_QUERY_LIMIT => Err(MapsError::RateLimited),
        STATUS_REQUEST_DENIED => Err(MapsError::Unauthorized),
        other => Err(MapsError::Api {
            status: 200,
            message: match error_message {
                Some(msg) => format!("{other}: {msg}"),
                None => other.to_string(),
            },
        }),
    }
}

fn endpoint_param(endpoint: &RouteEndpoint) -> String {
    match endpoint {
        RouteEndpoint::Address(address) => address.clone(),
        RouteEndpoint::Point(point) => point.to_string(),
    }
}

/// The `waypoints` parameter, or `None` when there are no waypoints.
fn waypoints_param(request: &RouteRequest) -> Option<String> {
    if request.waypoints.is_empty() {
        return None;
    }

    let mut parts = Vec::with_capacity(request.waypoints.len() + 1);
    if request.optimize {
        parts.push("optimize:true".to_string());
    }
    for wp in &request.waypoints {
        if wp.stopover {
            parts.push(wp.position.to_string());
        } else {
            parts.push(format!("via:{}", wp.position));
        }
    }

    Some(parts.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::Waypoint;

    #[test]
    fn config_builder() {
        let config = MapsConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_region("be")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.region, "be");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = MapsConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.region, DEFAULT_REGION);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let client = MapsClient::new(MapsConfig::new("test-key").with_base_url("http://x/"));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url, "http://x");
    }

    #[test]
    fn status_mapping() {
        assert!(check_status("OK", None).is_ok());
        assert!(check_status("ZERO_RESULTS", None).is_ok());
        assert!(matches!(
            check_status("OVER_QUERY_LIMIT", None),
            Err(MapsError::RateLimited)
        ));
        assert!(matches!(
            check_status("REQUEST_DENIED", Some("bad key")),
            Err(MapsError::Unauthorized)
        ));
        match check_status("INVALID_REQUEST", Some("missing origin")) {
            Err(MapsError::Api { message, .. }) => {
                assert_eq!(message, "INVALID_REQUEST: missing origin")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn waypoints_param_formats() {
        let base = RouteRequest::direct(
            RouteEndpoint::Address("République, Lille".into()),
            RouteEndpoint::Address("Gare Lille Flandres, Lille".into()),
        );
        assert_eq!(waypoints_param(&base), None);

        let wps = vec![
            Waypoint::stopover(Coordinate::new(50.63, 3.06)),
            Waypoint::stopover(Coordinate::new(50.64, 3.07)),
        ];
        let optimized = base.clone().with_waypoints(wps.clone(), true);
        assert_eq!(
            waypoints_param(&optimized).unwrap(),
            "optimize:true|50.63,3.06|50.64,3.07"
        );

        let ordered = base.with_waypoints(wps, false);
        assert_eq!(waypoints_param(&ordered).unwrap(), "50.63,3.06|50.64,3.07");
    }

    #[test]
    fn endpoint_param_forms() {
        assert_eq!(endpoint_param(&RouteEndpoint::Address("Lille".into())), "Lille");
        assert_eq!(
            endpoint_param(&RouteEndpoint::Point(Coordinate::new(50.5, 3.25))),
            "50.5,3.25"
        );
    }
}
