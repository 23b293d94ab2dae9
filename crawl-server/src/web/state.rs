//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedMapsClient;
use crate::domain::{Coordinate, Venue};
use crate::maps::{MapsError, MockMapsClient};
use crate::planner::{CrawlConfig, MapsProvider, RouteRequest, RouteResponse};

/// Where maps data comes from.
pub enum MapsBackend {
    /// The live service, behind the cache.
    Live(CachedMapsClient),
    /// A local fixture, for development without an API key.
    Mock(MockMapsClient),
}

impl MapsProvider for MapsBackend {
    async fn resolve_address(&self, address: &str) -> Result<Option<Coordinate>, MapsError> {
        match self {
            MapsBackend::Live(client) => client.resolve_address(address).await,
            MapsBackend::Mock(mock) => mock.resolve_address(address).await,
        }
    }

    async fn search_nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<Venue>, MapsError> {
        match self {
            MapsBackend::Live(client) => client.search_nearby(center, radius_m).await,
            MapsBackend::Mock(mock) => mock.search_nearby(center, radius_m).await,
        }
    }

    async fn fetch_details(&self, id: &str) -> Result<Option<Venue>, MapsError> {
        match self {
            MapsBackend::Live(client) => client.fetch_details(id).await,
            MapsBackend::Mock(mock) => mock.fetch_details(id).await,
        }
    }

    async fn compute_route(
        &self,
        request: &RouteRequest,
    ) -> Result<Option<RouteResponse>, MapsError> {
        match self {
            MapsBackend::Live(client) => client.compute_route(request).await,
            MapsBackend::Mock(mock) => mock.compute_route(request).await,
        }
    }
}

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Maps data source
    pub maps: Arc<MapsBackend>,

    /// Crawl planner configuration
    pub config: Arc<CrawlConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(maps: MapsBackend, config: CrawlConfig) -> Self {
        Self {
            maps: Arc::new(maps),
            config: Arc::new(config),
        }
    }
}
