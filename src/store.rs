//! Authoritative coordinate, language and request-token state.
//!
//! The store is plain data. Only the coordinator mutates it.

use std::fmt;

use crate::models::{Coordinate, LanguageCode};
use crate::tracker::TrackingState;

/// Identifies one dispatched recommendation fetch.
///
/// Tokens increase monotonically; only the most recently issued one is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only view returned by [`Store::current`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub coordinate: Option<Coordinate>,
    pub language: LanguageCode,
}

#[derive(Debug, Default)]
pub struct Store {
    coordinate: Option<Coordinate>,
    language: LanguageCode,
    tracking: TrackingState,
    latest_token: Option<RequestToken>,
    issued: u64,
}

impl Store {
    pub fn new(language: LanguageCode) -> Self {
        Self {
            language,
            ..Default::default()
        }
    }

    pub fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.coordinate = Some(coordinate);
    }

    pub fn set_language(&mut self, language: LanguageCode) {
        self.language = language;
    }

    pub fn current(&self) -> Snapshot {
        Snapshot {
            coordinate: self.coordinate,
            language: self.language,
        }
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    pub fn language(&self) -> LanguageCode {
        self.language
    }

    pub fn tracking(&self) -> TrackingState {
        self.tracking
    }

    pub fn set_tracking(&mut self, state: TrackingState) {
        self.tracking = state;
    }

    /// Issue a new token, superseding every earlier one.
    pub fn issue_token(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.latest_token = Some(token);
        token
    }

    pub fn latest_token(&self) -> Option<RequestToken> {
        self.latest_token
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.latest_token == Some(token)
    }
}
