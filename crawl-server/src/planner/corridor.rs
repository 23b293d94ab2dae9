//! Corridor strategy: bars along the direct walking route.
//!
//! The direct route is sampled every `sample_interval_m`, each sample is
//! searched, and the pool is over-collected so that the corridor filter has
//! something to throw away. Survivors are ordered by the route vertex they
//! sit nearest, which is a cheap stand-in for distance along the route.

use tracing::{debug, warn};

use crate::domain::{Coordinate, Mode, Venue};
use crate::geo;

use super::config::CrawlConfig;
use super::dedup;
use super::provider::{MapsProvider, RouteResponse, Waypoint};
use super::score::score;
use super::search::{CrawlError, CrawlRequest, Itinerary, Planner};

/// What the corridor strategy produced.
#[derive(Debug)]
pub(super) enum CorridorOutcome {
    Planned(Itinerary),
    /// The direct route had no usable geometry.
    NoGeometry,
}

impl<P: MapsProvider> Planner<'_, P> {
    pub(super) async fn plan_corridor(
        &self,
        request: &CrawlRequest,
    ) -> Result<CorridorOutcome, CrawlError> {
        let config = self.config;

        let direct = match self.provider.compute_route(&request.direct_route()).await {
            Ok(Some(route)) => route,
            Ok(None) => return Err(CrawlError::RouteUnavailable),
            Err(e) => {
                warn!(error = %e, "direct route request failed");
                return Err(CrawlError::RouteUnavailable);
            }
        };

        let path = geo::decode(&direct.polyline);
        if path.is_empty() {
            return Ok(CorridorOutcome::NoGeometry);
        }

        let samples = geo::resample(&path, config.sample_interval_m);
        let pool_target = config.corridor_pool_target(request.stop_count);
        debug!(
            path_points = path.len(),
            samples = samples.len(),
            pool_target,
            "sampling corridor"
        );

        let mut pool: Vec<Venue> = Vec::new();

        for sample in &samples {
            if pool.len() >= pool_target {
                break;
            }

            let mut nearby = self
                .search_or_empty(*sample, config.corridor_search_radius_m)
                .await;
            if nearby.is_empty() {
                continue;
            }

            sort_by_score(&mut nearby, Mode::Rating, config);

            for candidate in nearby.iter().take(config.corridor_top_n) {
                let Some(venue) = self.details_or_none(&candidate.id).await else {
                    continue;
                };
                dedup::accept(&mut pool, venue, config.duplicate_radius_m);
            }
        }

        let collected = pool.len();
        let venues =
            select_along_corridor(pool, &path, config.corridor_width_m, request.stop_count);
        debug!(collected, kept = venues.len(), "corridor filter");

        let route = if venues.is_empty() {
            direct
        } else {
            self.reroute_through(request, &venues, direct).await
        };

        Ok(CorridorOutcome::Planned(Itinerary { venues, route }))
    }

    /// Route through `venues` in the given order, or keep `direct` if that fails.
    async fn reroute_through(
        &self,
        request: &CrawlRequest,
        venues: &[Venue],
        direct: RouteResponse,
    ) -> RouteResponse {
        let waypoints = venues.iter().map(|v| Waypoint::stopover(v.position)).collect();
        let route_request = request.direct_route().with_waypoints(waypoints, false);

        match self.provider.compute_route(&route_request).await {
            Ok(Some(route)) => route,
            Ok(None) => {
                warn!("no route through corridor stops, keeping direct route");
                direct
            }
            Err(e) => {
                warn!(error = %e, "route through corridor stops failed, keeping direct route");
                direct
            }
        }
    }
}

/// Best score first. Stable, so equal scores keep search order.
fn sort_by_score(venues: &mut [Venue], mode: Mode, config: &CrawlConfig) {
    let weights = &config.score;
    venues.sort_by(|a, b| score(b, mode, weights).total_cmp(&score(a, mode, weights)));
}

/// Keep venues within `width_m` of `path`, ordered along it, at most `limit`.
///
/// Each kept venue has its `corridor_deviation` set. A path with fewer than
/// two points has no corridor and keeps nothing.
pub(super) fn select_along_corridor(
    candidates: Vec<Venue>,
    path: &[Coordinate],
    width_m: f64,
    limit: usize,
) -> Vec<Venue> {
    let mut kept: Vec<(usize, Venue)> = candidates
        .into_iter()
        .filter_map(|mut venue| {
            let deviation = geo::point_to_path_distance(&venue.position, path);
            if !(deviation <= width_m) {
                return None;
            }
            venue.corridor_deviation = Some(deviation);
            Some((geo::nearest_vertex_index(&venue.position, path), venue))
        })
        .collect();

    kept.sort_by_key(|(index, _)| *index);

    kept.into_iter().take(limit).map(|(_, venue)| venue).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Metres per degree of latitude.
    const M_PER_DEG: f64 = 111_194.93;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng)
    }

    fn venue(id: &str, position: Coordinate) -> Venue {
        Venue::new(id, id, position)
    }

    /// 1.1 km due north.
    fn path() -> Vec<Coordinate> {
        vec![c(50.63, 3.06), c(50.635, 3.06), c(50.64, 3.06)]
    }

    /// Degrees of longitude for `m` metres east at latitude 50.635.
    fn east(m: f64) -> f64 {
        m / (M_PER_DEG * 50.635f64.to_radians().cos())
    }

    #[test]
    fn drops_venues_outside_corridor() {
        let inside = venue("in", c(50.635, 3.06 + east(299.0)));
        let outside = venue("out", c(50.635, 3.06 + east(301.0)));

        let kept = select_along_corridor(vec![inside, outside], &path(), 300.0, 10);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "in");
        let deviation = kept[0].corridor_deviation.unwrap();
        assert!((deviation - 299.0).abs() < 0.5);
    }

    #[test]
    fn orders_by_nearest_vertex() {
        let end = venue("end", c(50.6399, 3.0601));
        let start = venue("start", c(50.6301, 3.0601));
        let middle = venue("middle", c(50.6351, 3.0601));

        let kept = select_along_corridor(vec![end, start, middle], &path(), 300.0, 10);
        let ids: Vec<&str> = kept.iter().map(|v| v.id.as_str()).collect();

        assert_eq!(ids, vec!["start", "middle", "end"]);
    }

    #[test]
    fn same_vertex_keeps_collection_order() {
        let a = venue("a", c(50.6351, 3.0601));
        let b = venue("b", c(50.6349, 3.0602));

        let kept = select_along_corridor(vec![a, b], &path(), 300.0, 10);
        let ids: Vec<&str> = kept.iter().map(|v| v.id.as_str()).collect();

        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn truncates_to_limit_after_ordering() {
        let candidates = vec![
            venue("end", c(50.6399, 3.0601)),
            venue("start", c(50.6301, 3.0601)),
            venue("middle", c(50.6351, 3.0601)),
        ];

        let kept = select_along_corridor(candidates, &path(), 300.0, 2);
        let ids: Vec<&str> = kept.iter().map(|v| v.id.as_str()).collect();

        assert_eq!(ids, vec!["start", "middle"]);
    }

    #[test]
    fn single_point_path_keeps_nothing() {
        let lone = vec![venue("a", c(50.63, 3.06))];
        let kept = select_along_corridor(lone, &[c(50.63, 3.06)], 300.0, 10);
        assert!(kept.is_empty());
    }

    #[test]
    fn sort_by_score_prefers_rating() {
        let config = CrawlConfig::default();
        let mut venues = vec![
            venue("low", c(0.0, 0.0)).with_rating(3.0, 100),
            venue("none", c(0.0, 0.0)),
            venue("high", c(0.0, 0.0)).with_rating(4.7, 400),
        ];

        sort_by_score(&mut venues, Mode::Rating, &config);
        let ids: Vec<&str> = venues.iter().map(|v| v.id.as_str()).collect();

        assert_eq!(ids, vec!["high", "low", "none"]);
    }
}
