//! Events delivered to the coordinator.

use crate::client::FetchError;
use crate::models::{Coordinate, LanguageCode, RecommendationResult};
use crate::store::RequestToken;

/// Input from the user interface.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Answer to the "use my location?" prompt.
    PermissionDecision(bool),
    MapClick(Coordinate),
    LanguageChanged(LanguageCode),
    StartTracking,
    StopTracking,
}

/// A completed recommendation fetch, tagged with its token.
#[derive(Debug)]
pub struct FetchOutcome {
    pub token: RequestToken,
    pub coordinate: Coordinate,
    pub language: LanguageCode,
    pub result: Result<RecommendationResult, FetchError>,
}

/// What the coordinator did with a fetch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Rendered,
    Stale,
    Failed,
}
