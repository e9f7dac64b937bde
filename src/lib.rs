//! localcast - local weather and nearby recommendations for a point on a map.
//!
//! The core is [`coordinator::Coordinator`], which reconciles geolocation
//! fixes, map clicks and language changes into a single authoritative
//! coordinate and language, dispatches backend fetches, and renders only the
//! most recently requested result.

pub mod cli;
pub mod client;
pub mod config;
pub mod coordinator;
pub mod map;
pub mod models;
pub mod render;
pub mod store;
pub mod tracker;
