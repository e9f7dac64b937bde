//! Command-line host for the coordinator.

mod commands;
mod display;
mod icons;
mod input;

pub use commands::{is_verbose, run};
