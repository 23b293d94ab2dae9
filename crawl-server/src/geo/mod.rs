//! Geometry on the sphere.
//!
//! Small, allocation-light helpers used by the planner: haversine distance,
//! distance from a point to a segment or path, a coarse "how far along the
//! path" index, and fixed-interval resampling. Everything here is pure.
//!
//! Segment projection works in raw degree space (lat/lng treated as planar
//! x/y) and only the final distance is measured on the sphere. At city scale
//! the distortion is negligible.

pub mod polyline;

use crate::domain::Coordinate;

pub use polyline::{decode, encode};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points in metres.
///
/// # Examples
///
/// ```
/// use crawl_server::domain::Coordinate;
/// use crawl_server::geo::distance;
///
/// let a = Coordinate::new(50.0, 3.0);
/// assert_eq!(distance(&a, &a), 0.0);
///
/// // One degree of latitude is about 111 km
/// let b = Coordinate::new(51.0, 3.0);
/// assert!((distance(&a, &b) - 111_195.0).abs() < 1.0);
/// ```
pub fn distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let s = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push `s` a hair over 1 for antipodal points
    2.0 * EARTH_RADIUS_M * s.clamp(0.0, 1.0).sqrt().asin()
}

/// Distance in metres from `p` to the segment `a`-`b`.
///
/// When `a == b` this is exactly `distance(p, a)`.
pub fn point_to_segment_distance(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = b.lat - a.lat;
    let d_lng = b.lng - a.lng;
    let len_sq = d_lat * d_lat + d_lng * d_lng;

    if len_sq == 0.0 {
        return distance(p, a);
    }

    let t = ((p.lat - a.lat) * d_lat + (p.lng - a.lng) * d_lng) / len_sq;
    let projected = a.lerp(b, t.clamp(0.0, 1.0));

    distance(p, &projected)
}

/// Minimum distance in metres from `p` to any segment of `path`.
///
/// A path with fewer than two points has no segments and yields
/// `f64::INFINITY`; callers that care must check the length first.
pub fn point_to_path_distance(p: &Coordinate, path: &[Coordinate]) -> f64 {
    path.windows(2)
        .map(|w| point_to_segment_distance(p, &w[0], &w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Index of the path vertex closest to `p`.
///
/// Ties go to the lowest index. An empty path yields 0.
pub fn nearest_vertex_index(p: &Coordinate, path: &[Coordinate]) -> usize {
    let mut best_index = 0;
    let mut best_dist = f64::INFINITY;

    for (i, vertex) in path.iter().enumerate() {
        let d = distance(p, vertex);
        if d < best_dist {
            best_dist = d;
            best_index = i;
        }
    }

    best_index
}

/// Resample `path` with a point every `interval_m` metres.
///
/// Leftover distance at the end of one segment is carried into the next, so
/// spacing stays even across vertices. The last input point is always
/// kept. Paths shorter than two points, and non-positive intervals, come
/// back unchanged.
pub fn resample(path: &[Coordinate], interval_m: f64) -> Vec<Coordinate> {
    if path.len() < 2 || !(interval_m > 0.0) {
        return path.to_vec();
    }

    let mut resampled = Vec::new();
    let mut carried = 0.0;

    for w in path.windows(2) {
        let (a, b) = (&w[0], &w[1]);
        let segment_len = distance(a, b);

        let mut along = carried;
        while along < segment_len {
            resampled.push(a.lerp(b, along / segment_len));
            along += interval_m;
        }
        carried = along - segment_len;
    }

    if let Some(last) = path.last() {
        resampled.push(*last);
    }

    resampled
}
