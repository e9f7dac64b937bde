//! Output side of the coordinator.

use crate::render::{DisplayDocument, PageHeading};

/// Receives everything the coordinator wants shown.
pub trait DisplaySink: Send + 'static {
    fn show_heading(&mut self, heading: &PageHeading);

    fn show_document(&mut self, document: &DisplayDocument);
}
