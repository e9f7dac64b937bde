//! Interaction coordinator.
//!
//! Decides which coordinate and language are authoritative, when to issue a
//! backend request, and which responses are still worth showing. Every input
//! (UI event, tracker event, fetch outcome) is handled serially on one task;
//! fetches and sensor subscriptions run in spawned tasks and only talk back
//! through channels.
//!
//! The ordering rule: a fetch result is rendered only if its token is the
//! most recently issued one, whatever order the fetches complete in.

mod events;
mod sink;

pub use events::{FetchOutcome, Resolution, UiEvent};
pub use sink::DisplaySink;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::client::RecommendationSource;
use crate::map::{MapSurface, MarkerManager};
use crate::models::{Coordinate, LanguageCode};
use crate::render;
use crate::store::{RequestToken, Store};
use crate::tracker::{
    LocationTracker, PositionSource, SensorError, TrackerEvent, TrackingMode, TrackingState,
};

/// Whether a coordinate has been established yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoLocation,
    Ready,
}

/// Behavior switches that distinguish the client variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorOptions {
    pub mode: TrackingMode,
    /// Stop tracking on the first manual map click.
    pub cancel_tracking_on_click: bool,
    /// Move the map center to each sensor fix before placing the marker.
    pub recenter_on_fix: bool,
    pub default_language: LanguageCode,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            mode: TrackingMode::Continuous,
            cancel_tracking_on_click: true,
            recenter_on_fix: true,
            default_language: LanguageCode::Ko,
        }
    }
}

pub struct Coordinator<S, M, R, D>
where
    S: PositionSource,
    M: MapSurface,
    R: RecommendationSource,
    D: DisplaySink,
{
    options: CoordinatorOptions,
    store: Store,
    tracker: LocationTracker<S>,
    tracker_rx: mpsc::UnboundedReceiver<TrackerEvent>,
    map: M,
    markers: MarkerManager,
    client: Arc<R>,
    fetch_tx: mpsc::UnboundedSender<FetchOutcome>,
    fetch_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    in_flight: usize,
    sink: D,
}

impl<S, M, R, D> Coordinator<S, M, R, D>
where
    S: PositionSource,
    M: MapSurface,
    R: RecommendationSource,
    D: DisplaySink,
{
    pub fn new(options: CoordinatorOptions, source: Arc<S>, map: M, client: Arc<R>, sink: D) -> Self {
        let (tracker_tx, tracker_rx) = mpsc::unbounded_channel();
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        Self {
            options,
            store: Store::new(options.default_language),
            tracker: LocationTracker::new(source, tracker_tx),
            tracker_rx,
            map,
            markers: MarkerManager::new(),
            client,
            fetch_tx,
            fetch_rx,
            in_flight: 0,
            sink,
        }
    }

    /// Show the heading for the starting language.
    pub fn boot(&mut self) {
        let language = self.store.language();
        info!("Booting with language {}", language);
        self.sink.show_heading(&render::update_language(language));
    }

    pub fn handle_ui(&mut self, event: UiEvent) {
        match event {
            UiEvent::PermissionDecision(true) | UiEvent::StartTracking => self.start_tracking(),
            UiEvent::PermissionDecision(false) => {
                info!("User chose not to use their location");
            }
            UiEvent::StopTracking => {
                self.tracker.cancel();
                self.sync_tracking();
            }
            UiEvent::MapClick(coordinate) => self.on_click(coordinate),
            UiEvent::LanguageChanged(language) => self.on_language(language),
        }
    }

    pub fn handle_tracker_event(&mut self, event: TrackerEvent) {
        if !self.tracker.accept(&event) {
            return;
        }
        self.sync_tracking();

        match event.outcome {
            Ok(fix) => {
                let coordinate = fix.coordinate;
                debug!("Fix {} (accuracy {:?})", coordinate, fix.accuracy);
                self.store.set_coordinate(coordinate);
                if self.options.recenter_on_fix {
                    self.map.set_center(coordinate);
                }
                self.markers.place(&mut self.map, coordinate);
                self.dispatch();
            }
            Err(SensorError::PermissionDenied) => {
                warn!("Location permission denied; manual selection remains available");
                self.tracker.reset();
                self.sync_tracking();
            }
            Err(e) => {
                warn!("Error getting location: {}", e);
            }
        }
    }

    /// Apply a completed fetch if it is still the latest one.
    pub fn handle_fetch_outcome(&mut self, outcome: FetchOutcome) -> Resolution {
        self.in_flight = self.in_flight.saturating_sub(1);

        if !self.store.is_latest(outcome.token) {
            debug!(
                "Discarding stale result {} for {} ({})",
                outcome.token, outcome.coordinate, outcome.language
            );
            return Resolution::Stale;
        }

        match outcome.result {
            Ok(result) => {
                let document = render::render(self.store.language(), &result);
                self.sink.show_document(&document);
                Resolution::Rendered
            }
            Err(e) => {
                warn!("Fetch {} failed: {}", outcome.token, e);
                Resolution::Failed
            }
        }
    }

    /// Process events until the UI channel closes.
    pub async fn run(&mut self, mut ui: mpsc::Receiver<UiEvent>) {
        loop {
            tokio::select! {
                event = ui.recv() => match event {
                    Some(event) => self.handle_ui(event),
                    None => break,
                },
                Some(event) = self.tracker_rx.recv() => self.handle_tracker_event(event),
                Some(outcome) = self.fetch_rx.recv() => {
                    self.handle_fetch_outcome(outcome);
                }
            }
        }
    }

    /// Handle tracker events and fetch outcomes until no subscription is active.
    pub async fn follow_tracking(&mut self) {
        while self.tracker.is_active() {
            tokio::select! {
                Some(event) = self.tracker_rx.recv() => self.handle_tracker_event(event),
                Some(outcome) = self.fetch_rx.recv() => {
                    self.handle_fetch_outcome(outcome);
                }
            }
        }
    }

    /// Wait for the next tracker event and handle it.
    pub async fn process_next_tracker_event(&mut self) -> Option<TrackingState> {
        let event = self.tracker_rx.recv().await?;
        self.handle_tracker_event(event);
        Some(self.store.tracking())
    }

    /// Wait for the next fetch outcome and handle it.
    pub async fn process_next_fetch(&mut self) -> Option<Resolution> {
        if self.in_flight == 0 {
            return None;
        }
        let outcome = self.fetch_rx.recv().await?;
        Some(self.handle_fetch_outcome(outcome))
    }

    /// Handle every outstanding fetch.
    pub async fn settle(&mut self) {
        while self.process_next_fetch().await.is_some() {}
    }

    pub fn phase(&self) -> Phase {
        if self.store.coordinate().is_some() {
            Phase::Ready
        } else {
            Phase::NoLocation
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn tracking(&self) -> TrackingState {
        self.store.tracking()
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn marker_position(&self) -> Option<Coordinate> {
        self.markers.position()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    fn start_tracking(&mut self) {
        self.tracker.start(self.options.mode);
        self.sync_tracking();
    }

    fn on_click(&mut self, coordinate: Coordinate) {
        debug!("Map click at {}", coordinate);
        self.store.set_coordinate(coordinate);
        if self.options.cancel_tracking_on_click && self.tracker.cancel() {
            info!("Tracking stopped by manual selection");
        }
        self.sync_tracking();
        self.markers.place(&mut self.map, coordinate);
        self.dispatch();
    }

    fn on_language(&mut self, language: LanguageCode) {
        info!("Language changed to {}", language);
        self.store.set_language(language);
        self.sink.show_heading(&render::update_language(language));
        self.dispatch();
    }

    /// Issue a token and fetch for the current coordinate and language.
    fn dispatch(&mut self) -> Option<RequestToken> {
        let snapshot = self.store.current();
        let coordinate = snapshot.coordinate?;
        let language = snapshot.language;
        let token = self.store.issue_token();
        info!("Dispatching fetch {} for {} in {}", token, coordinate, language);

        let client = Arc::clone(&self.client);
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let result = client.fetch(coordinate, language).await;
            let _ = tx.send(FetchOutcome {
                token,
                coordinate,
                language,
                result,
            });
        });
        self.in_flight += 1;
        Some(token)
    }

    fn sync_tracking(&mut self) {
        self.store.set_tracking(self.tracker.state());
    }
}
