//! Tuning parameters for crawl planning.

use super::score::ScoreWeights;

/// Configuration parameters for crawl planning.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Largest stop count a request may ask for.
    pub max_stops: usize,

    /// Venues closer than this (metres) to an accepted venue are duplicates.
    pub duplicate_radius_m: f64,

    /// Corridor mode: spacing of sample points along the base route (metres).
    pub sample_interval_m: f64,

    /// Corridor mode: search radius around each sample point (metres).
    pub corridor_search_radius_m: u32,

    /// Corridor mode: venues further than this from the base route are dropped.
    pub corridor_width_m: f64,

    /// Corridor mode: only the best N results of each search are examined.
    pub corridor_top_n: usize,

    /// Corridor mode: stop sampling once this many times the stop count
    /// have been collected, leaving slack for the corridor filter.
    pub overcollect_factor: usize,

    /// Seeded modes: radii tried in turn around each seed point (metres).
    pub seed_radii_m: Vec<u32>,

    /// Minutes spent at each stop.
    pub dwell_mins: u32,

    /// Minutes allowed for walking between stops.
    pub walk_mins: u32,

    /// Scoring weights.
    pub score: ScoreWeights,
}

impl CrawlConfig {
    /// Minutes between consecutive arrivals.
    pub fn stop_interval_mins(&self) -> u32 {
        self.dwell_mins + self.walk_mins
    }

    /// How many corridor candidates to collect for `stop_count` stops.
    pub fn corridor_pool_target(&self, stop_count: usize) -> usize {
        stop_count.saturating_mul(self.overcollect_factor)
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_stops: 10,
            duplicate_radius_m: 60.0,
            sample_interval_m: 100.0,
            corridor_search_radius_m: 300,
            corridor_width_m: 300.0,
            corridor_top_n: 10,
            overcollect_factor: 3,
            seed_radii_m: vec![300, 500, 700],
            dwell_mins: 60,
            walk_mins: 15,
            score: ScoreWeights::default(),
        }
    }
}
