//! Mock maps client for testing without API access.
//!
//! Serves geocodes and venues from memory. Nearby search is spatial: it
//! returns every catalogue venue within the requested radius, in catalogue
//! order. Routes are synthesised as straight walks through the waypoints
//! unless a canned response has been queued.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::domain::{Coordinate, Venue};
use crate::geo;
use crate::planner::{MapsProvider, RouteEndpoint, RouteRequest, RouteResponse};

use super::convert::venue_from_place;
use super::error::MapsError;
use super::types::PlaceResult;

/// Walking speed used for synthesised leg durations.
const WALKING_SPEED_MPS: f64 = 1.4;

/// A call made against the mock, for assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    ResolveAddress(String),
    SearchNearby { center: Coordinate, radius_m: u32 },
    FetchDetails(String),
    ComputeRoute(RouteRequest),
}

/// On-disk fixture format.
///
/// ```json
/// {
///   "geocodes": { "République, Lille": { "lat": 50.6305, "lng": 3.0573 } },
///   "places": [ { "place_id": "a", "name": "Bar A", "geometry": { "location": { "lat": 50.63, "lng": 3.06 } } } ]
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct MockFixture {
    #[serde(default)]
    pub geocodes: HashMap<String, Coordinate>,
    #[serde(default)]
    pub places: Vec<PlaceResult>,
}

#[derive(Debug, Default)]
struct MockState {
    geocodes: HashMap<String, Coordinate>,
    venues: Vec<Venue>,
    hidden_details: HashSet<String>,
    search_slack_m: f64,
    failing_searches: bool,
    routes: VecDeque<Option<RouteResponse>>,
    calls: Vec<MockCall>,
}

/// Mock maps client serving in-memory data.
#[derive(Debug, Clone, Default)]
pub struct MockMapsClient {
    state: Arc<Mutex<MockState>>,
}

impl MockMapsClient {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a mock from a JSON fixture file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MapsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| MapsError::Fixture(format!("failed to read {}: {e}", path.display())))?;

        let fixture: MockFixture = serde_json::from_str(&json)
            .map_err(|e| MapsError::Fixture(format!("failed to parse {}: {e}", path.display())))?;

        Ok(Self::from_fixture(fixture))
    }

    /// Build a mock from a parsed fixture. Places without an id are skipped.
    pub fn from_fixture(fixture: MockFixture) -> Self {
        let mut mock = Self::new();
        for (address, position) in fixture.geocodes {
            mock = mock.with_geocode(address, position);
        }
        for venue in fixture.places.iter().filter_map(|p| venue_from_place(p, None)) {
            mock = mock.with_venue(venue);
        }
        mock
    }

    /// Register an address.
    pub fn with_geocode(self, address: impl Into<String>, position: Coordinate) -> Self {
        self.lock().geocodes.insert(address.into(), position);
        self
    }

    /// Add a venue to the catalogue.
    pub fn with_venue(self, venue: Venue) -> Self {
        self.lock().venues.push(venue);
        self
    }

    /// Make `fetch_details` return nothing for this id while search still finds it.
    pub fn without_details(self, id: impl Into<String>) -> Self {
        self.lock().hidden_details.insert(id.into());
        self
    }

    /// Widen every nearby search by `slack_m`.
    ///
    /// The live service treats the radius as a hint and happily returns
    /// prominent places a little outside it.
    pub fn with_search_slack(self, slack_m: f64) -> Self {
        self.lock().search_slack_m = slack_m;
        self
    }

    /// Make every nearby search fail with a transport error.
    pub fn with_failing_searches(self) -> Self {
        self.lock().failing_searches = true;
        self
    }

    /// Queue a canned response for the next `compute_route` call.
    ///
    /// `None` means "no route found". Once the queue is empty routes are
    /// synthesised again.
    pub fn push_route(&self, route: Option<RouteResponse>) {
        self.lock().routes.push_back(route);
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    /// Route requests made so far, in order.
    pub fn route_requests(&self) -> Vec<RouteRequest> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                MockCall::ComputeRoute(req) => Some(req.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of catalogue venues.
    pub fn venue_count(&self) -> usize {
        self.lock().venues.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A panic while holding the lock only happens in a failing test
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn endpoint_position(state: &MockState, endpoint: &RouteEndpoint) -> Option<Coordinate> {
        match endpoint {
            RouteEndpoint::Address(address) => state.geocodes.get(address).copied(),
            RouteEndpoint::Point(point) => Some(*point),
        }
    }

    /// A straight walk origin → waypoints → destination.
    fn synthesise_route(state: &MockState, request: &RouteRequest) -> Option<RouteResponse> {
        let origin = Self::endpoint_position(state, &request.origin)?;
        let destination = Self::endpoint_position(state, &request.destination)?;

        let mut points = Vec::with_capacity(request.waypoints.len() + 2);
        points.push(origin);
        points.extend(request.waypoints.iter().map(|w| w.position));
        points.push(destination);

        let distances: Vec<u64> = points
            .windows(2)
            .map(|w| geo::distance(&w[0], &w[1]).round() as u64)
            .collect();
        let durations = distances
            .iter()
            .map(|d| (*d as f64 / WALKING_SPEED_MPS).round() as u64)
            .collect();

        Some(RouteResponse {
            polyline: geo::encode(&points),
            leg_durations_secs: durations,
            leg_distances_m: distances,
            waypoint_order: request
                .optimize
                .then(|| (0..request.waypoints.len()).collect()),
        })
    }
}

impl MapsProvider for MockMapsClient {
    async fn resolve_address(&self, address: &str) -> Result<Option<Coordinate>, MapsError> {
        let mut state = self.lock();
        state.calls.push(MockCall::ResolveAddress(address.to_string()));
        Ok(state.geocodes.get(address).copied())
    }

    async fn search_nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<Venue>, MapsError> {
        let mut state = self.lock();
        state.calls.push(MockCall::SearchNearby { center, radius_m });

        if state.failing_searches {
            return Err(MapsError::Api {
                status: 503,
                message: "mock search failure".to_string(),
            });
        }

        let reach = f64::from(radius_m) + state.search_slack_m;
        Ok(state
            .venues
            .iter()
            .filter(|v| geo::distance(&center, &v.position) <= reach)
            .cloned()
            .collect())
    }

    async fn fetch_details(&self, id: &str) -> Result<Option<Venue>, MapsError> {
        let mut state = self.lock();
        state.calls.push(MockCall::FetchDetails(id.to_string()));

        if state.hidden_details.contains(id) {
            return Ok(None);
        }
        Ok(state.venues.iter().find(|v| v.id == id).cloned())
    }

    async fn compute_route(
        &self,
        request: &RouteRequest,
    ) -> Result<Option<RouteResponse>, MapsError> {
        let mut state = self.lock();
        state.calls.push(MockCall::ComputeRoute(request.clone()));

        if let Some(canned) = state.routes.pop_front() {
            return Ok(canned);
        }
        Ok(Self::synthesise_route(&state, request))
    }
}
