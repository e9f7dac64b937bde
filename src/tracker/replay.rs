//! Position source that replays a recorded track.
//!
//! Track files hold one `lat,lon` pair per line. Blank lines and lines
//! starting with `#` are ignored.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use thiserror::Error;

use super::{Fix, PositionOptions, PositionSource, SensorError};
use crate::models::Coordinate;

/// Errors from loading a replay track.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Replays a fixed list of coordinates at a steady interval.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    track: Vec<Coordinate>,
    interval: Duration,
}

impl ReplaySource {
    pub fn new(track: Vec<Coordinate>, interval: Duration) -> Self {
        Self { track, interval }
    }

    /// Load a track file.
    pub fn from_file(path: &Path, interval: Duration) -> Result<Self, ReplayError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(parse_track(&text)?, interval))
    }

    pub fn is_empty(&self) -> bool {
        self.track.is_empty()
    }
}

/// Parse `lat,lon` lines into coordinates.
pub fn parse_track(text: &str) -> Result<Vec<Coordinate>, ReplayError> {
    let mut track = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parse_err = |reason: String| ReplayError::Parse {
            line: idx + 1,
            reason,
        };
        let (lat, lon) = line
            .split_once(',')
            .ok_or_else(|| parse_err("expected `lat,lon`".to_string()))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|e| parse_err(format!("bad latitude: {}", e)))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|e| parse_err(format!("bad longitude: {}", e)))?;
        track.push(Coordinate::new(lat, lon).map_err(|e| parse_err(e.to_string()))?);
    }
    Ok(track)
}

#[async_trait]
impl PositionSource for ReplaySource {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Fix, SensorError> {
        self.track
            .first()
            .map(|c| Fix::new(*c))
            .ok_or_else(|| SensorError::Unavailable("replay track is empty".to_string()))
    }

    fn watch_position(
        &self,
        _options: PositionOptions,
    ) -> BoxStream<'static, Result<Fix, SensorError>> {
        let interval = self.interval;
        stream::iter(self.track.clone().into_iter().enumerate())
            .then(move |(idx, coordinate)| async move {
                if idx > 0 {
                    tokio::time::sleep(interval).await;
                }
                Ok(Fix::new(coordinate))
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_track() {
        let track = parse_track("# seoul\n37.5665, 126.978\n\n37.50,127.03\n").unwrap();
        assert_eq!(track.len(), 2);
        assert_eq!(track[1], Coordinate::new(37.50, 127.03).unwrap());
    }

    #[test]
    fn test_parse_track_errors() {
        match parse_track("37.5\n") {
            Err(ReplayError::Parse { line, .. }) => assert_eq!(line, 1),
            other => panic!("unexpected: {:?}", other),
        }
        match parse_track("1,2\n95,0\n") {
            Err(ReplayError::Parse { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("Latitude"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_replay_watch_yields_track() {
        let source = ReplaySource::new(
            vec![
                Coordinate::new(1.0, 1.0).unwrap(),
                Coordinate::new(2.0, 2.0).unwrap(),
            ],
            Duration::from_millis(1),
        );
        let fixes: Vec<_> = source
            .watch_position(PositionOptions::continuous())
            .collect()
            .await;
        assert_eq!(fixes.len(), 2);
        assert_eq!(
            fixes[1].as_ref().unwrap().coordinate,
            Coordinate::new(2.0, 2.0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_empty_replay_is_unavailable() {
        let source = ReplaySource::new(Vec::new(), Duration::from_millis(1));
        let err = source
            .current_position(&PositionOptions::one_shot())
            .await
            .unwrap_err();
        assert!(matches!(err, SensorError::Unavailable(_)));
    }
}
