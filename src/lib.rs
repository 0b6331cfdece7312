//! flight-route-planner
//!
//! Weather-aware closed-tour optimization over a small set of waypoints, and
//! per-leg fuel/time feasibility for a given vehicle.

pub mod error;
pub mod models;
pub mod traits;
pub mod haversine;
pub mod cost;
pub mod factors;
pub mod weather;
pub mod solver;
pub mod feasibility;
pub mod catalog;
pub mod openweather;
pub mod planner;
