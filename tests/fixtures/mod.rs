//! Test fixtures for flight-route-planner.
//!
//! Provides realistic test data including:
//! - Real airport coordinates (WGS84, from public aerodrome data)
//! - Aircraft figures in the shape reference tables list them

pub mod airports;

pub use airports::*;
