//! The assembled crawl.

use super::Venue;

/// A finished crawl: the ordered stops and the walking route through them.
#[derive(Debug, Clone, PartialEq)]
pub struct TripResult {
    /// Encoded polyline of the walking route.
    pub path: String,
    /// Stops in visiting order, each with an estimated arrival time.
    pub venues: Vec<Venue>,
    /// Sum of the route's leg durations.
    pub total_duration_secs: u64,
    /// Sum of the route's leg distances.
    pub total_distance_m: u64,
}

impl TripResult {
    /// Total walking time, e.g. `"42 minutes"`.
    pub fn duration_label(&self) -> String {
        let minutes = (self.total_duration_secs as f64 / 60.0).round();
        format!("{minutes} minutes")
    }

    /// Total walking distance, e.g. `"3.1 km"`. Halves round up.
    pub fn distance_label(&self) -> String {
        let tenths = self.total_distance_m.saturating_add(50) / 100;
        format!("{}.{} km", tenths / 10, tenths % 10)
    }
}
