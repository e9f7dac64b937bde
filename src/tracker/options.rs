//! Options handed to the position source.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Whether the tracker samples once or keeps watching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackingMode {
    OneShot,
    #[default]
    Continuous,
}

impl TrackingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneShot => "one-shot",
            Self::Continuous => "continuous",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "one-shot" | "oneshot" | "once" => Some(Self::OneShot),
            "continuous" | "watch" => Some(Self::Continuous),
            _ => None,
        }
    }

    /// Sensing options used for this mode.
    pub fn options(&self) -> PositionOptions {
        match self {
            Self::OneShot => PositionOptions::one_shot(),
            Self::Continuous => PositionOptions::continuous(),
        }
    }
}

/// Sensing configuration, mirroring the browser geolocation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    /// Oldest cached fix the source may return.
    pub maximum_age: Duration,
    /// Longest wait for a single fix before a timeout error.
    pub timeout: Duration,
}

impl PositionOptions {
    /// Fresh fix only, 5 s timeout.
    pub fn one_shot() -> Self {
        Self {
            high_accuracy: true,
            maximum_age: Duration::ZERO,
            timeout: Duration::from_secs(5),
        }
    }

    /// Fixes up to 10 s old are acceptable, 5 s timeout per fix.
    pub fn continuous() -> Self {
        Self {
            high_accuracy: true,
            maximum_age: Duration::from_secs(10),
            timeout: Duration::from_secs(5),
        }
    }
}
