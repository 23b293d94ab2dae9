//! Google Maps Platform client.
//!
//! This module provides a client for the geocoding, nearby search, place
//! details and directions web services, plus an in-memory mock that serves
//! the same [`MapsProvider`](crate::planner::MapsProvider) interface.

mod client;
mod convert;
mod error;
mod mock;
pub mod types;

pub use client::{MapsClient, MapsConfig};
pub use convert::{maps_link, route_from_directions, venue_from_place};
pub use error::MapsError;
pub use mock::{MockCall, MockFixture, MockMapsClient};
