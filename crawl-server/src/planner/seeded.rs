//! Seeded strategy: bars near evenly spaced points on the straight line.
//!
//! Used for the rating, price and mixed modes. Seeds are interpolated
//! between the geocoded endpoints, not along a routed path. Around each seed
//! the search widens through `seed_radii_m`, and each radius contributes at
//! most one bar. The routing service then gets to reorder the stops.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::domain::{Coordinate, Mode, Venue};

use super::dedup;
use super::provider::{MapsProvider, Waypoint};
use super::score::{ScoreWeights, score};
use super::search::{CrawlError, CrawlRequest, Endpoints, Itinerary, Planner};

impl<P: MapsProvider> Planner<'_, P> {
    pub(super) async fn plan_seeded(
        &self,
        request: &CrawlRequest,
        endpoints: &Endpoints,
        mode: Mode,
    ) -> Result<Itinerary, CrawlError> {
        let config = self.config;
        let target = request.stop_count.max(1);
        let seeds = seed_points(endpoints.start, endpoints.end, target);

        let mut accepted: Vec<Venue> = Vec::new();

        'seeds: for (i, seed) in seeds.iter().enumerate() {
            for &radius_m in &config.seed_radii_m {
                let mut nearby = self.search_or_empty(*seed, radius_m).await;
                if nearby.is_empty() {
                    continue;
                }

                rank_candidates(&mut nearby, mode, &config.score);

                for candidate in &nearby {
                    let Some(venue) = self.details_or_none(&candidate.id).await else {
                        continue;
                    };
                    if dedup::accept(&mut accepted, venue, config.duplicate_radius_m) {
                        debug!(seed = i, radius_m, id = %candidate.id, "accepted venue");
                        break;
                    }
                }

                if accepted.len() >= target {
                    break 'seeds;
                }
            }
        }

        if accepted.len() < target {
            warn!(found = accepted.len(), target, "fewer bars than requested");
        }

        let waypoints = accepted.iter().map(|v| Waypoint::stopover(v.position)).collect();
        let route_request = request.direct_route().with_waypoints(waypoints, true);

        let route = match self.provider.compute_route(&route_request).await {
            Ok(Some(route)) => route,
            Ok(None) => return Err(CrawlError::RouteUnavailable),
            Err(e) => {
                warn!(error = %e, "route through bars failed");
                return Err(CrawlError::RouteUnavailable);
            }
        };

        let venues = match &route.waypoint_order {
            Some(order) => apply_waypoint_order(accepted, order),
            None => accepted,
        };

        Ok(Itinerary { venues, route })
    }
}

/// `count` points evenly spaced strictly between `start` and `end`.
///
/// Point `i` (1-based) sits at fraction `i / (count + 1)` of the way along.
pub(super) fn seed_points(start: Coordinate, end: Coordinate, count: usize) -> Vec<Coordinate> {
    let denominator = (count + 1) as f64;
    (1..=count)
        .map(|i| start.lerp(&end, i as f64 / denominator))
        .collect()
}

/// Open venues first, then best score first. Stable within ties.
pub(super) fn rank_candidates(candidates: &mut [Venue], mode: Mode, weights: &ScoreWeights) {
    candidates.sort_by(|a, b| {
        let by_open = b
            .opening_status
            .is_open()
            .cmp(&a.opening_status.is_open());
        if by_open != Ordering::Equal {
            return by_open;
        }
        score(b, mode, weights).total_cmp(&score(a, mode, weights))
    });
}

/// Reorder `venues` so that position k holds `venues[order[k]]`.
///
/// An order that is not a permutation of the venue indices is ignored.
pub(super) fn apply_waypoint_order(venues: Vec<Venue>, order: &[usize]) -> Vec<Venue> {
    if !is_permutation(order, venues.len()) {
        warn!(?order, count = venues.len(), "ignoring invalid waypoint order");
        return venues;
    }

    let mut slots: Vec<Option<Venue>> = venues.into_iter().map(Some).collect();
    order.iter().filter_map(|&i| slots[i].take()).collect()
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    order.iter().all(|&i| i < len && !std::mem::replace(&mut seen[i], true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OpeningStatus;

    fn venue(id: &str) -> Venue {
        Venue::new(id, id, Coordinate::new(0.0, 0.0))
    }

    fn ids(venues: &[Venue]) -> Vec<&str> {
        venues.iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn seeds_are_interior_and_even() {
        let start = Coordinate::new(50.0, 3.0);
        let end = Coordinate::new(50.4, 3.4);

        let seeds = seed_points(start, end, 3);

        assert_eq!(seeds.len(), 3);
        for (seed, expected) in seeds.iter().zip([0.1, 0.2, 0.3]) {
            assert!((seed.lat - (50.0 + expected)).abs() < 1e-9);
            assert!((seed.lng - (3.0 + expected)).abs() < 1e-9);
        }
    }

    #[test]
    fn single_seed_is_midpoint() {
        let seeds = seed_points(Coordinate::new(0.0, 0.0), Coordinate::new(2.0, 4.0), 1);
        assert_eq!(seeds, vec![Coordinate::new(1.0, 2.0)]);
    }

    #[test]
    fn open_venues_rank_first() {
        let mut candidates = vec![
            venue("great-closed")
                .with_rating(4.9, 2000)
                .with_opening_status(OpeningStatus::Closed),
            venue("meh-open")
                .with_rating(3.2, 10)
                .with_opening_status(OpeningStatus::Open),
            venue("good-unknown").with_rating(4.5, 300),
            venue("good-open")
                .with_rating(4.4, 300)
                .with_opening_status(OpeningStatus::Open),
        ];

        rank_candidates(&mut candidates, Mode::Rating, &ScoreWeights::default());

        assert_eq!(
            ids(&candidates),
            vec!["good-open", "meh-open", "great-closed", "good-unknown"]
        );
    }

    #[test]
    fn price_mode_prefers_cheap() {
        let mut candidates = vec![
            venue("dear").with_price_tier(4),
            venue("unknown"),
            venue("cheap").with_price_tier(1),
        ];

        rank_candidates(&mut candidates, Mode::Price, &ScoreWeights::default());

        assert_eq!(ids(&candidates), vec!["cheap", "unknown", "dear"]);
    }

    #[test]
    fn waypoint_order_reorders() {
        let venues = vec![venue("a"), venue("b"), venue("c")];
        let ordered = apply_waypoint_order(venues, &[2, 0, 1]);
        assert_eq!(ids(&ordered), vec!["c", "a", "b"]);
    }

    #[test]
    fn invalid_waypoint_order_is_ignored() {
        let venues = vec![venue("a"), venue("b"), venue("c")];

        let short = apply_waypoint_order(venues.clone(), &[1, 0]);
        assert_eq!(ids(&short), vec!["a", "b", "c"]);

        let repeated = apply_waypoint_order(venues.clone(), &[0, 0, 1]);
        assert_eq!(ids(&repeated), vec!["a", "b", "c"]);

        let out_of_range = apply_waypoint_order(venues, &[0, 1, 3]);
        assert_eq!(ids(&out_of_range), vec!["a", "b", "c"]);
    }
}
