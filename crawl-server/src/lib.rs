//! Bar crawl planner server.
//!
//! A web service that answers: "I'm walking from here to there tonight,
//! which bars should I stop at on the way?"

pub mod cache;
pub mod domain;
pub mod geo;
pub mod maps;
pub mod planner;
pub mod web;
