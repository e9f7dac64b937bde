//! Keeps exactly zero or one marker on the map.

use super::{MapSurface, MarkerHandle};
use crate::models::Coordinate;

#[derive(Debug, Default)]
pub struct MarkerManager {
    current: Option<(MarkerHandle, Coordinate)>,
}

impl MarkerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retire the previous marker, if any, and place a new one.
    pub fn place<M: MapSurface + ?Sized>(&mut self, map: &mut M, position: Coordinate) -> MarkerHandle {
        if let Some((previous, _)) = self.current.take() {
            map.detach_marker(previous);
        }
        let handle = map.create_marker(position);
        self.current = Some((handle, position));
        handle
    }

    pub fn position(&self) -> Option<Coordinate> {
        self.current.map(|(_, position)| position)
    }
}
