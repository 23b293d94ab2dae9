//! The maps capability the planner depends on.
//!
//! Geocoding, venue search, venue details and walking directions all come
//! from an external service. The planner only sees this trait, so it can be
//! driven by the live client, the cached client, or a deterministic mock.

use std::future::Future;

use crate::domain::{Coordinate, Venue};
use crate::maps::MapsError;

/// Either end of a route.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteEndpoint {
    /// Free-text address, resolved by the routing service itself.
    Address(String),
    Point(Coordinate),
}

/// An intermediate location on a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub position: Coordinate,
    /// Whether the route stops here (splitting legs) or merely passes through.
    pub stopover: bool,
}

impl Waypoint {
    pub fn stopover(position: Coordinate) -> Self {
        Self {
            position,
            stopover: true,
        }
    }
}

/// A walking-directions query.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: RouteEndpoint,
    pub destination: RouteEndpoint,
    pub waypoints: Vec<Waypoint>,
    /// Let the routing service reorder waypoints to shorten the route.
    pub optimize: bool,
}

impl RouteRequest {
    /// A route with no waypoints.
    pub fn direct(origin: RouteEndpoint, destination: RouteEndpoint) -> Self {
        Self {
            origin,
            destination,
            waypoints: Vec::new(),
            optimize: false,
        }
    }

    pub fn with_waypoints(mut self, waypoints: Vec<Waypoint>, optimize: bool) -> Self {
        self.waypoints = waypoints;
        self.optimize = optimize;
        self
    }
}

/// A computed route.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteResponse {
    /// Encoded overview polyline.
    pub polyline: String,
    pub leg_durations_secs: Vec<u64>,
    pub leg_distances_m: Vec<u64>,
    /// Visiting order of the request's waypoints, when the service reordered
    /// them. `waypoint_order[k]` is the request index visited k-th.
    pub waypoint_order: Option<Vec<usize>>,
}

impl RouteResponse {
    pub fn total_duration_secs(&self) -> u64 {
        self.leg_durations_secs.iter().sum()
    }

    pub fn total_distance_m(&self) -> u64 {
        self.leg_distances_m.iter().sum()
    }
}

/// Trait for the external maps service.
///
/// "Nothing found" outcomes are `Ok(None)` / `Ok(vec![])`; `Err` is kept
/// for transport and service failures.
pub trait MapsProvider {
    /// Resolve a free-text address to a position.
    fn resolve_address(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<Coordinate>, MapsError>> + Send;

    /// Bars within `radius_m` of `center`.
    fn search_nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
    ) -> impl Future<Output = Result<Vec<Venue>, MapsError>> + Send;

    /// Full details for a venue found by [`MapsProvider::search_nearby`].
    fn fetch_details(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Venue>, MapsError>> + Send;

    /// Walking directions. `Ok(None)` when no route exists.
    fn compute_route(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<Option<RouteResponse>, MapsError>> + Send;
}
