//! Position source abstraction.
//!
//! Wraps whatever actually produces fixes (a browser bridge, a GPS daemon, a
//! replay file). Sources are expected to honor `maximum_age` and
//! `high_accuracy`; the tracker enforces `timeout` itself.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use thiserror::Error;

use super::PositionOptions;
use crate::models::Coordinate;

/// Errors reported by a position source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SensorError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Position unavailable: {0}")]
    Unavailable(String),
    #[error("Timed out after {0:?} waiting for a position")]
    Timeout(Duration),
}

/// A single geolocation sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Fix {
    pub coordinate: Coordinate,
    /// Accuracy radius in metres, when the source reports one.
    pub accuracy: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl Fix {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            accuracy: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_accuracy(mut self, metres: f64) -> Self {
        self.accuracy = Some(metres);
        self
    }
}

/// Trait for position sources.
///
/// Implementations must be thread-safe; the tracker polls them from spawned
/// tasks.
#[async_trait]
pub trait PositionSource: Send + Sync + 'static {
    /// Produce a single fix.
    async fn current_position(&self, options: &PositionOptions) -> Result<Fix, SensorError>;

    /// Produce fixes until the stream is dropped.
    fn watch_position(
        &self,
        options: PositionOptions,
    ) -> BoxStream<'static, Result<Fix, SensorError>>;
}
