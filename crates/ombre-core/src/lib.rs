//! Ombre core crate.
//!
//! This crate owns the gradient-editing engine used by the widget layer:
//! the stop collection, the drag constraint engine, track geometry, frame
//! scheduling, and the shared picker state bundle.

pub mod drag;
pub mod logging;
pub mod schedule;
pub mod state;
pub mod stops;
pub mod track;
