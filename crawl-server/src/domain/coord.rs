//! Geographic coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
///
/// Plain value type: two coordinates are the same place exactly when both
/// components compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Linear interpolation towards `other` in raw degree space.
    ///
    /// `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn lerp(&self, other: &Coordinate, t: f64) -> Coordinate {
        Coordinate {
            lat: self.lat + (other.lat - self.lat) * t,
            lng: self.lng + (other.lng - self.lng) * t,
        }
    }
}

/// Renders as `lat,lng`, the form the routing service takes for waypoints.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
