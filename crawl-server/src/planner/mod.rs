//! Bar crawl planner.
//!
//! Given two addresses and a stop count, picks bars between them and a
//! walking route through them. Two strategies:
//!
//! - the corridor strategy (`shortest` mode) samples the direct walking route
//!   and keeps bars within a fixed distance of it;
//! - the seeded strategy (every other mode) searches around points on the
//!   straight line between the endpoints and lets the routing service order
//!   the stops.
//!
//! Everything the planner learns about the world comes through
//! [`MapsProvider`].

mod config;
mod corridor;
mod dedup;
mod eta;
mod provider;
mod score;
mod search;
mod seeded;

pub use config::CrawlConfig;
pub use dedup::is_duplicate;
pub use eta::{arrival_time, project_arrivals};
pub use provider::{MapsProvider, RouteEndpoint, RouteRequest, RouteResponse, Waypoint};
pub use score::{NEUTRAL_RATING, ScoreWeights, score, weighted_score};
pub use search::{CrawlError, CrawlRequest, Planner};
