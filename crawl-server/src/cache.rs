//! Caching layer for maps API responses.
//!
//! Geocodes and place details are stable for hours, and a single crawl asks
//! for the same details repeatedly as search radii overlap. Both are cached.
//! Nearby searches (opening status changes) and routes (depend on the whole
//! waypoint set) always go to the service.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{Coordinate, Venue};
use crate::maps::{MapsClient, MapsError};
use crate::planner::{MapsProvider, RouteRequest, RouteResponse};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cache for maps API responses.
pub struct MapsCache {
    /// Geocoded positions, keyed by address text.
    geocodes: MokaCache<String, Coordinate>,

    /// Venue details, keyed by place id.
    details: MokaCache<String, Venue>,
}

impl MapsCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let geocodes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let details = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { geocodes, details }
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.geocodes.invalidate_all();
        self.details.invalidate_all();
    }
}

/// Maps client with caching.
///
/// Wraps any [`MapsProvider`] (the live [`MapsClient`] by default). Only
/// positive results are cached: a place that is missing now may appear later.
pub struct CachedMapsClient<C = MapsClient> {
    client: C,
    cache: MapsCache,
}

impl<C: MapsProvider + Sync> CachedMapsClient<C> {
    /// Create a new cached client.
    pub fn new(client: C, cache_config: &CacheConfig) -> Self {
        Self {
            client,
            cache: MapsCache::new(cache_config),
        }
    }

    /// Access the underlying client for operations that bypass cache.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

impl<C: MapsProvider + Sync> MapsProvider for CachedMapsClient<C> {
    async fn resolve_address(&self, address: &str) -> Result<Option<Coordinate>, MapsError> {
        if let Some(cached) = self.cache.geocodes.get(address).await {
            trace!(address, "geocode cache hit");
            return Ok(Some(cached));
        }

        let resolved = self.client.resolve_address(address).await?;
        if let Some(position) = resolved {
            self.cache
                .geocodes
                .insert(address.to_string(), position)
                .await;
        }

        Ok(resolved)
    }

    async fn search_nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<Venue>, MapsError> {
        self.client.search_nearby(center, radius_m).await
    }

    async fn fetch_details(&self, id: &str) -> Result<Option<Venue>, MapsError> {
        if let Some(cached) = self.cache.details.get(id).await {
            trace!(id, "details cache hit");
            return Ok(Some(cached));
        }

        let details = self.client.fetch_details(id).await?;
        if let Some(venue) = &details {
            self.cache.details.insert(id.to_string(), venue.clone()).await;
        }

        Ok(details)
    }

    async fn compute_route(
        &self,
        request: &RouteRequest,
    ) -> Result<Option<RouteResponse>, MapsError> {
        self.client.compute_route(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::{MockCall, MockMapsClient};

    fn mock() -> MockMapsClient {
        MockMapsClient::new()
            .with_geocode("Lille", Coordinate::new(50.63, 3.06))
            .with_venue(Venue::new("a", "Bar A", Coordinate::new(50.631, 3.061)))
    }

    fn count(calls: &[MockCall], pred: impl Fn(&MockCall) -> bool) -> usize {
        calls.iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 10_000);
    }

    #[test]
    fn cache_creation() {
        let cache = MapsCache::new(&CacheConfig::default());
        assert_eq!(cache.geocodes.entry_count(), 0);
        assert_eq!(cache.details.entry_count(), 0);
    }

    #[tokio::test]
    async fn geocodes_are_cached() {
        let cached = CachedMapsClient::new(mock(), &CacheConfig::default());

        for _ in 0..3 {
            let pos = cached.resolve_address("Lille").await.unwrap();
            assert_eq!(pos, Some(Coordinate::new(50.63, 3.06)));
        }

        let calls = cached.client().calls();
        assert_eq!(count(&calls, |c| matches!(c, MockCall::ResolveAddress(_))), 1);
    }

    #[tokio::test]
    async fn details_are_cached_but_misses_are_not() {
        let cached = CachedMapsClient::new(mock(), &CacheConfig::default());

        assert!(cached.fetch_details("a").await.unwrap().is_some());
        assert!(cached.fetch_details("a").await.unwrap().is_some());
        assert!(cached.fetch_details("zz").await.unwrap().is_none());
        assert!(cached.fetch_details("zz").await.unwrap().is_none());

        let calls = cached.client().calls();
        assert_eq!(count(&calls, |c| *c == MockCall::FetchDetails("a".into())), 1);
        assert_eq!(count(&calls, |c| *c == MockCall::FetchDetails("zz".into())), 2);
    }

    #[tokio::test]
    async fn searches_bypass_cache() {
        let cached = CachedMapsClient::new(mock(), &CacheConfig::default());
        let center = Coordinate::new(50.63, 3.06);

        cached.search_nearby(center, 300).await.unwrap();
        cached.search_nearby(center, 300).await.unwrap();

        let calls = cached.client().calls();
        assert_eq!(count(&calls, |c| matches!(c, MockCall::SearchNearby { .. })), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cached = CachedMapsClient::new(mock(), &CacheConfig::default());

        cached.resolve_address("Lille").await.unwrap();
        cached.invalidate_cache();
        cached.resolve_address("Lille").await.unwrap();

        let calls = cached.client().calls();
        assert_eq!(count(&calls, |c| matches!(c, MockCall::ResolveAddress(_))), 2);
    }
}
