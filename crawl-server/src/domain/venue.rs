//! Venues (bars) as returned by the places service.

use serde::{Deserialize, Serialize};

use super::{ClockTime, Coordinate};

/// Price tier assumed when the places service doesn't report one.
pub const DEFAULT_PRICE_TIER: u8 = 2;

/// Whether a venue is open right now, as far as the places service knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OpeningStatus {
    Open,
    Closed,
    #[default]
    Unknown,
}

impl OpeningStatus {
    /// Build from the service's tri-state `open_now` flag.
    pub fn from_open_now(open_now: Option<bool>) -> Self {
        match open_now {
            Some(true) => OpeningStatus::Open,
            Some(false) => OpeningStatus::Closed,
            None => OpeningStatus::Unknown,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, OpeningStatus::Open)
    }
}

/// A bar that may become a stop on the crawl.
///
/// Everything except `estimated_arrival` and `corridor_deviation` comes from
/// the places service and is left alone once the venue is built. Those two
/// fields are filled in by the planner as the route is assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    /// Opaque place identifier, stable across calls.
    pub id: String,
    pub name: String,
    pub address: String,
    /// Average rating; 0 when the venue has none.
    pub rating: f64,
    pub review_count: u32,
    pub opening_status: OpeningStatus,
    pub maps_link: String,
    pub position: Coordinate,
    /// 0 (free) to 4 (very expensive).
    pub price_tier: Option<u8>,
    pub estimated_arrival: Option<ClockTime>,
    /// Distance from the base route in metres (corridor mode only).
    pub corridor_deviation: Option<f64>,
}

impl Venue {
    /// Create a venue with no rating, reviews, or price information.
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            rating: 0.0,
            review_count: 0,
            opening_status: OpeningStatus::Unknown,
            maps_link: String::new(),
            position,
            price_tier: None,
            estimated_arrival: None,
            corridor_deviation: None,
        }
    }

    /// Price tier, falling back to [`DEFAULT_PRICE_TIER`].
    pub fn price_tier_or_default(&self) -> u8 {
        self.price_tier.unwrap_or(DEFAULT_PRICE_TIER)
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_rating(mut self, rating: f64, review_count: u32) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }

    pub fn with_price_tier(mut self, tier: u8) -> Self {
        self.price_tier = Some(tier);
        self
    }

    pub fn with_opening_status(mut self, status: OpeningStatus) -> Self {
        self.opening_status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_status_from_tri_state() {
        assert_eq!(OpeningStatus::from_open_now(Some(true)), OpeningStatus::Open);
        assert_eq!(OpeningStatus::from_open_now(Some(false)), OpeningStatus::Closed);
        assert_eq!(OpeningStatus::from_open_now(None), OpeningStatus::Unknown);

        assert!(OpeningStatus::Open.is_open());
        assert!(!OpeningStatus::Unknown.is_open());
    }

    #[test]
    fn price_tier_defaults_to_two() {
        let venue = Venue::new("a", "A", Coordinate::new(0.0, 0.0));
        assert_eq!(venue.price_tier_or_default(), 2);
        assert_eq!(venue.with_price_tier(4).price_tier_or_default(), 4);
    }

    #[test]
    fn builder_fills_fields() {
        let venue = Venue::new("id-1", "Le Zinc", Coordinate::new(50.63, 3.06))
            .with_address("1 rue de Paris, Lille")
            .with_rating(4.4, 120)
            .with_opening_status(OpeningStatus::Open);

        assert_eq!(venue.address, "1 rue de Paris, Lille");
        assert_eq!(venue.rating, 4.4);
        assert_eq!(venue.review_count, 120);
        assert!(venue.opening_status.is_open());
        assert!(venue.estimated_arrival.is_none());
        assert!(venue.corridor_deviation.is_none());
    }
}
