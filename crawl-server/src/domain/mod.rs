//! Domain types for the crawl planner.
//!
//! Plain value types shared by the planner, the maps client and the web
//! layer. Validation happens at construction where there is something to
//! validate (times); the rest are simple records.

mod coord;
mod mode;
mod time;
mod trip;
mod venue;

pub use coord::Coordinate;
pub use mode::Mode;
pub use time::{ClockTime, TimeError};
pub use trip::TripResult;
pub use venue::{DEFAULT_PRICE_TIER, OpeningStatus, Venue};
