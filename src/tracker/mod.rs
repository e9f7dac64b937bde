//! Location tracker.
//!
//! Owns at most one sensor subscription. Every subscription runs in its own
//! tokio task and forwards fixes to the coordinator tagged with its
//! [`SubscriptionId`]. The coordinator passes each event back through
//! [`LocationTracker::accept`], which drops anything that does not belong to
//! the active subscription. That gate is what makes `cancel()` effective
//! immediately, even for fixes already sitting in the channel.

mod options;
mod replay;
mod source;

use std::fmt;
use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub use options::{PositionOptions, TrackingMode};
pub use replay::{parse_track, ReplayError, ReplaySource};
pub use source::{Fix, PositionSource, SensorError};

/// Tracker lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    #[default]
    Idle,
    Watching,
    Stopped,
}

impl TrackingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Watching => "watching",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for TrackingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one `start()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A fix or sensor error produced by a subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerEvent {
    pub subscription: SubscriptionId,
    pub outcome: Result<Fix, SensorError>,
    /// No further events follow on this subscription.
    pub last: bool,
}

struct Subscription {
    id: SubscriptionId,
    task: JoinHandle<()>,
}

/// Wraps a [`PositionSource`] with start/cancel semantics.
pub struct LocationTracker<S: PositionSource> {
    source: Arc<S>,
    events: mpsc::UnboundedSender<TrackerEvent>,
    state: TrackingState,
    active: Option<Subscription>,
    next_id: u64,
}

impl<S: PositionSource> LocationTracker<S> {
    /// Create a tracker that delivers its events on `events`.
    pub fn new(source: Arc<S>, events: mpsc::UnboundedSender<TrackerEvent>) -> Self {
        Self {
            source,
            events,
            state: TrackingState::Idle,
            active: None,
            next_id: 0,
        }
    }

    pub fn state(&self) -> TrackingState {
        self.state
    }

    /// Whether a subscription is currently delivering events.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start a new subscription, replacing any active one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, mode: TrackingMode) -> SubscriptionId {
        self.abort_active();

        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        let options = mode.options();
        let source = Arc::clone(&self.source);
        let events = self.events.clone();

        let task = match mode {
            TrackingMode::OneShot => tokio::spawn(request_once(source, id, options, events)),
            TrackingMode::Continuous => tokio::spawn(watch(source, id, options, events)),
        };

        info!("Location tracking started ({})", mode.as_str());
        self.active = Some(Subscription { id, task });
        self.state = TrackingState::Watching;
        id
    }

    /// Stop the active subscription.
    ///
    /// Returns `false` without changing state when nothing is being watched.
    pub fn cancel(&mut self) -> bool {
        if self.abort_active() {
            self.state = TrackingState::Stopped;
            info!("Location tracking cancelled");
            true
        } else {
            false
        }
    }

    /// Drop the subscription and return to `Idle` (permission revoked).
    pub fn reset(&mut self) {
        self.abort_active();
        self.state = TrackingState::Idle;
    }

    /// Decide whether an event may reach the coordinator.
    ///
    /// Accepting the final event of a subscription moves tracking to `Stopped`.
    pub fn accept(&mut self, event: &TrackerEvent) -> bool {
        let id = match &self.active {
            Some(sub) => sub.id,
            None => {
                debug!("Dropping event from inactive subscription {:?}", event.subscription);
                return false;
            }
        };
        if id != event.subscription {
            debug!("Dropping event from superseded subscription {:?}", event.subscription);
            return false;
        }
        if event.last {
            self.active = None;
            self.state = TrackingState::Stopped;
        }
        true
    }

    fn abort_active(&mut self) -> bool {
        match self.active.take() {
            Some(sub) => {
                sub.task.abort();
                true
            }
            None => false,
        }
    }
}

impl<S: PositionSource> Drop for LocationTracker<S> {
    fn drop(&mut self) {
        self.abort_active();
    }
}

async fn request_once<S: PositionSource>(
    source: Arc<S>,
    id: SubscriptionId,
    options: PositionOptions,
    events: mpsc::UnboundedSender<TrackerEvent>,
) {
    let outcome = match tokio::time::timeout(options.timeout, source.current_position(&options)).await
    {
        Ok(result) => result,
        Err(_) => Err(SensorError::Timeout(options.timeout)),
    };
    let _ = events.send(TrackerEvent {
        subscription: id,
        outcome,
        last: true,
    });
}

async fn watch<S: PositionSource>(
    source: Arc<S>,
    id: SubscriptionId,
    options: PositionOptions,
    events: mpsc::UnboundedSender<TrackerEvent>,
) {
    let mut fixes = source.watch_position(options);
    loop {
        let outcome = match tokio::time::timeout(options.timeout, fixes.next()).await {
            Ok(Some(result)) => result,
            Ok(None) => {
                debug!("Position stream for {:?} ended", id);
                let _ = events.send(TrackerEvent {
                    subscription: id,
                    outcome: Err(SensorError::Unavailable("position stream ended".to_string())),
                    last: true,
                });
                break;
            }
            Err(_) => Err(SensorError::Timeout(options.timeout)),
        };
        if events
            .send(TrackerEvent {
                subscription: id,
                outcome,
                last: false,
            })
            .is_err()
        {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use async_trait::async_trait;
    use futures::stream::{self, BoxStream};
    use std::time::Duration;

    struct StaticSource(Coordinate);

    #[async_trait]
    impl PositionSource for StaticSource {
        async fn current_position(&self, _: &PositionOptions) -> Result<Fix, SensorError> {
            Ok(Fix::new(self.0))
        }

        fn watch_position(&self, _: PositionOptions) -> BoxStream<'static, Result<Fix, SensorError>> {
            let fix = Fix::new(self.0);
            stream::unfold(fix, |fix| async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Some((Ok(fix.clone()), fix))
            })
            .boxed()
        }
    }

    struct SilentSource;

    #[async_trait]
    impl PositionSource for SilentSource {
        async fn current_position(&self, _: &PositionOptions) -> Result<Fix, SensorError> {
            futures::future::pending().await
        }

        fn watch_position(&self, _: PositionOptions) -> BoxStream<'static, Result<Fix, SensorError>> {
            stream::pending().boxed()
        }
    }

    fn tracker<S: PositionSource>(
        source: S,
    ) -> (LocationTracker<S>, mpsc::UnboundedReceiver<TrackerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (LocationTracker::new(Arc::new(source), tx), rx)
    }

    fn seoul() -> Coordinate {
        Coordinate::new(37.5665, 126.978).unwrap()
    }

    #[tokio::test]
    async fn test_cancel_before_start_is_noop() {
        let (mut tracker, _rx) = tracker(StaticSource(seoul()));
        assert!(!tracker.cancel());
        assert_eq!(tracker.state(), TrackingState::Idle);
    }

    #[tokio::test]
    async fn test_one_shot_stops_after_first_event() {
        let (mut tracker, mut rx) = tracker(StaticSource(seoul()));
        let id = tracker.start(TrackingMode::OneShot);
        assert_eq!(tracker.state(), TrackingState::Watching);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.subscription, id);
        assert!(tracker.accept(&event));
        assert_eq!(tracker.state(), TrackingState::Stopped);
        assert!(!tracker.is_active());
        assert!(!tracker.cancel());
    }

    #[tokio::test]
    async fn test_cancel_blocks_queued_events() {
        let (mut tracker, mut rx) = tracker(StaticSource(seoul()));
        tracker.start(TrackingMode::Continuous);

        let queued = rx.recv().await.unwrap();
        assert!(tracker.cancel());
        assert_eq!(tracker.state(), TrackingState::Stopped);
        assert!(!tracker.accept(&queued));
    }

    #[tokio::test]
    async fn test_restart_supersedes_previous_subscription() {
        let (mut tracker, mut rx) = tracker(StaticSource(seoul()));
        let first = tracker.start(TrackingMode::Continuous);
        let stale = rx.recv().await.unwrap();
        assert_eq!(stale.subscription, first);

        tracker.cancel();
        let second = tracker.start(TrackingMode::Continuous);
        assert_ne!(first, second);
        assert_eq!(tracker.state(), TrackingState::Watching);
        assert!(!tracker.accept(&stale));

        loop {
            let event = rx.recv().await.unwrap();
            if event.subscription == second {
                assert!(tracker.accept(&event));
                break;
            }
            assert!(!tracker.accept(&event));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_shot_timeout() {
        let (mut tracker, mut rx) = tracker(SilentSource);
        tracker.start(TrackingMode::OneShot);
        let event = rx.recv().await.unwrap();
        assert_eq!(
            event.outcome,
            Err(SensorError::Timeout(Duration::from_secs(5)))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_keeps_going_after_timeout() {
        let (mut tracker, mut rx) = tracker(SilentSource);
        let id = tracker.start(TrackingMode::Continuous);
        for _ in 0..2 {
            let event = rx.recv().await.unwrap();
            assert_eq!(event.subscription, id);
            assert!(matches!(event.outcome, Err(SensorError::Timeout(_))));
            assert!(tracker.accept(&event));
        }
        assert_eq!(tracker.state(), TrackingState::Watching);
    }

    #[tokio::test]
    async fn test_empty_watch_reports_unavailable_and_stops() {
        let (mut tracker, mut rx) = tracker(ReplaySource::new(Vec::new(), Duration::from_millis(1)));
        let id = tracker.start(TrackingMode::Continuous);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.subscription, id);
        assert!(event.last);
        assert!(matches!(event.outcome, Err(SensorError::Unavailable(_))));
        assert!(tracker.accept(&event));
        assert_eq!(tracker.state(), TrackingState::Stopped);
        assert!(!tracker.is_active());
    }

    #[tokio::test]
    async fn test_finite_watch_delivers_fixes_then_stops() {
        let track = vec![seoul(), Coordinate::new(37.57, 126.98).unwrap()];
        let (mut tracker, mut rx) = tracker(ReplaySource::new(track.clone(), Duration::from_millis(1)));
        tracker.start(TrackingMode::Continuous);

        for expected in &track {
            let event = rx.recv().await.unwrap();
            assert!(!event.last);
            assert_eq!(event.outcome.as_ref().unwrap().coordinate, *expected);
            assert!(tracker.accept(&event));
            assert_eq!(tracker.state(), TrackingState::Watching);
        }
        let end = rx.recv().await.unwrap();
        assert!(end.last);
        assert!(tracker.accept(&end));
        assert_eq!(tracker.state(), TrackingState::Stopped);
    }

    #[tokio::test]
    async fn test_reset_returns_to_idle() {
        let (mut tracker, _rx) = tracker(StaticSource(seoul()));
        tracker.start(TrackingMode::Continuous);
        tracker.reset();
        assert_eq!(tracker.state(), TrackingState::Idle);
        assert!(!tracker.is_active());
    }
}
