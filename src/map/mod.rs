//! Map surface and single-marker management.

mod marker;

pub use marker::MarkerManager;

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::Coordinate;

/// Handle to a marker attached to a map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerHandle(u64);

/// Initial view of a map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapOptions {
    pub center: Coordinate,
    pub zoom: u8,
}

/// The parts of a map widget the coordinator drives.
///
/// Placement is assumed to succeed once the map exists, so there is no error
/// path.
pub trait MapSurface: Send + 'static {
    fn set_center(&mut self, center: Coordinate);

    fn create_marker(&mut self, position: Coordinate) -> MarkerHandle;

    fn detach_marker(&mut self, marker: MarkerHandle);
}

/// In-process map that records its state instead of drawing it.
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    container: String,
    center: Coordinate,
    zoom: u8,
    markers: BTreeMap<MarkerHandle, Coordinate>,
    next_marker: u64,
}

impl HeadlessMap {
    pub fn new(container: &str, options: MapOptions) -> Self {
        Self {
            container: container.to_string(),
            center: options.center,
            zoom: options.zoom,
            markers: BTreeMap::new(),
            next_marker: 0,
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Positions of all attached markers, oldest first.
    pub fn markers(&self) -> Vec<Coordinate> {
        self.markers.values().copied().collect()
    }
}

impl MapSurface for HeadlessMap {
    fn set_center(&mut self, center: Coordinate) {
        debug!("[{}] center -> {}", self.container, center);
        self.center = center;
    }

    fn create_marker(&mut self, position: Coordinate) -> MarkerHandle {
        self.next_marker += 1;
        let handle = MarkerHandle(self.next_marker);
        self.markers.insert(handle, position);
        handle
    }

    fn detach_marker(&mut self, marker: MarkerHandle) {
        self.markers.remove(&marker);
    }
}
