//! Arrival-time estimates.
//!
//! Estimates are a fixed cadence from the start time: each stop adds one
//! interval, a dwell period plus a walking allowance (see
//! [`CrawlConfig::stop_interval_mins`](super::CrawlConfig::stop_interval_mins)).
//! Actual routed walking times are ignored so the schedule stays round.

use crate::domain::{ClockTime, Venue};

/// Estimated arrival at the stop at `index` (0-based).
///
/// ```
/// use crawl_server::domain::ClockTime;
/// use crawl_server::planner::arrival_time;
///
/// let start = ClockTime::parse("20:00").unwrap();
/// assert_eq!(arrival_time(start, 0, 75).to_string(), "20:00");
/// assert_eq!(arrival_time(start, 3, 75).to_string(), "23:45");
/// ```
pub fn arrival_time(start: ClockTime, index: usize, interval_mins: u32) -> ClockTime {
    let per_stop = u64::from(interval_mins);
    // Only the offset modulo one day matters
    let offset = (index as u64 % (24 * 60)) * per_stop % (24 * 60);
    start.add_minutes(offset as u32)
}

/// Fill in `estimated_arrival` for every venue, in order.
pub fn project_arrivals(venues: &mut [Venue], start: ClockTime, interval_mins: u32) {
    for (i, venue) in venues.iter_mut().enumerate() {
        venue.estimated_arrival = Some(arrival_time(start, i, interval_mins));
    }
}
