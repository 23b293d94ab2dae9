//! Web layer for the bar crawl planner.
//!
//! Provides the JSON endpoint the front end calls to generate a crawl.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, MapsBackend};
