//! Crawl planning entry point.
//!
//! Resolves the two endpoints, hands off to the strategy for the requested
//! mode, then stamps arrival estimates and route totals onto the result.
//! The strategies themselves live in `corridor` and `seeded`; the candidate
//! helpers they share are here.

use tracing::{debug, info, warn};

use crate::domain::{ClockTime, Coordinate, Mode, TripResult, Venue};

use super::config::CrawlConfig;
use super::corridor::CorridorOutcome;
use super::eta::project_arrivals;
use super::provider::{MapsProvider, RouteEndpoint, RouteRequest, RouteResponse};

/// Error from crawl planning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CrawlError {
    /// A required request field is absent or empty
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    /// A request field is present but unusable
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An endpoint address could not be resolved
    #[error("could not geocode address: {address}")]
    GeocodingFailed { address: String },

    /// The routing service produced no route
    #[error("no walking route available")]
    RouteUnavailable,

    /// The maps service failed outright
    #[error("maps service error: {0}")]
    Provider(String),
}

/// Request for a crawl.
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlRequest {
    /// Start address, free text.
    pub start: String,

    /// End address, free text.
    pub end: String,

    /// Number of bars wanted.
    pub stop_count: usize,

    /// Arrival time at the first bar.
    pub start_time: ClockTime,

    pub mode: Mode,
}

impl CrawlRequest {
    /// Create a new crawl request.
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        stop_count: usize,
        start_time: ClockTime,
        mode: Mode,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            stop_count,
            start_time,
            mode,
        }
    }

    /// Validate the request against `max_stops`.
    pub fn validate(&self, max_stops: usize) -> Result<(), CrawlError> {
        if self.start.trim().is_empty() {
            return Err(CrawlError::MissingParameter("start"));
        }

        if self.end.trim().is_empty() {
            return Err(CrawlError::MissingParameter("end"));
        }

        if self.stop_count == 0 {
            return Err(CrawlError::MissingParameter("barsCount"));
        }

        if self.stop_count > max_stops {
            return Err(CrawlError::InvalidRequest(format!(
                "at most {max_stops} bars per crawl"
            )));
        }

        Ok(())
    }

    /// A route between the request's addresses with no waypoints.
    pub(super) fn direct_route(&self) -> RouteRequest {
        RouteRequest::direct(
            RouteEndpoint::Address(self.start.clone()),
            RouteEndpoint::Address(self.end.clone()),
        )
    }
}

/// Geocoded start and end.
#[derive(Debug, Clone, Copy)]
pub(super) struct Endpoints {
    pub start: Coordinate,
    pub end: Coordinate,
}

/// Ordered stops plus the route through them, before arrival estimates.
#[derive(Debug, Clone)]
pub(super) struct Itinerary {
    pub venues: Vec<Venue>,
    pub route: RouteResponse,
}

/// Crawl planner.
///
/// Holds no state between requests: every call to [`Planner::plan`] builds
/// its own candidate lists.
pub struct Planner<'a, P: MapsProvider> {
    pub(super) provider: &'a P,
    pub(super) config: &'a CrawlConfig,
}

impl<'a, P: MapsProvider> Planner<'a, P> {
    /// Create a new planner.
    pub fn new(provider: &'a P, config: &'a CrawlConfig) -> Self {
        Self { provider, config }
    }

    /// Plan a crawl.
    pub async fn plan(&self, request: &CrawlRequest) -> Result<TripResult, CrawlError> {
        request.validate(self.config.max_stops)?;

        info!(
            start = %request.start,
            end = %request.end,
            stops = request.stop_count,
            mode = %request.mode,
            "planning crawl"
        );

        let endpoints = self.resolve_endpoints(request).await?;

        let itinerary = match request.mode {
            Mode::ShortestCorridor => match self.plan_corridor(request).await? {
                CorridorOutcome::Planned(itinerary) => itinerary,
                CorridorOutcome::NoGeometry => {
                    warn!("direct route has no geometry, falling back to rating mode");
                    self.plan_seeded(request, &endpoints, Mode::Rating).await?
                }
            },
            mode => self.plan_seeded(request, &endpoints, mode).await?,
        };

        let trip = self.assemble(itinerary, request.start_time);

        info!(
            stops = trip.venues.len(),
            duration_secs = trip.total_duration_secs,
            distance_m = trip.total_distance_m,
            "crawl planned"
        );

        Ok(trip)
    }

    async fn resolve_endpoints(&self, request: &CrawlRequest) -> Result<Endpoints, CrawlError> {
        let start = self.geocode(&request.start).await?;
        let end = self.geocode(&request.end).await?;
        Ok(Endpoints { start, end })
    }

    async fn geocode(&self, address: &str) -> Result<Coordinate, CrawlError> {
        self.provider
            .resolve_address(address)
            .await
            .map_err(|e| CrawlError::Provider(e.to_string()))?
            .ok_or_else(|| CrawlError::GeocodingFailed {
                address: address.to_string(),
            })
    }

    /// Nearby search that treats service failures as "nothing here".
    pub(super) async fn search_or_empty(&self, center: Coordinate, radius_m: u32) -> Vec<Venue> {
        match self.provider.search_nearby(center, radius_m).await {
            Ok(found) => {
                debug!(%center, radius_m, found = found.len(), "nearby search");
                found
            }
            Err(e) => {
                warn!(%center, radius_m, error = %e, "nearby search failed");
                Vec::new()
            }
        }
    }

    /// Details lookup that treats service failures as "not found".
    ///
    /// The returned venue keeps the id it was searched under.
    pub(super) async fn details_or_none(&self, id: &str) -> Option<Venue> {
        match self.provider.fetch_details(id).await {
            Ok(Some(mut venue)) => {
                venue.id = id.to_string();
                Some(venue)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(id, error = %e, "details lookup failed");
                None
            }
        }
    }

    fn assemble(&self, itinerary: Itinerary, start_time: ClockTime) -> TripResult {
        let Itinerary { mut venues, route } = itinerary;

        project_arrivals(&mut venues, start_time, self.config.stop_interval_mins());

        TripResult {
            total_duration_secs: route.total_duration_secs(),
            total_distance_m: route.total_distance_m(),
            path: route.polyline,
            venues,
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
