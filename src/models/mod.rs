//! Data models for localcast.

mod coordinate;
mod language;
mod recommendation;

pub use coordinate::{Coordinate, CoordinateError};
pub use language::LanguageCode;
pub use recommendation::{Place, RecommendationResult};
