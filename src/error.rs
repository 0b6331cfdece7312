//! Error type shared by the route optimizer, the feasibility evaluator and
//! the directory lookups.

use thiserror::Error;

use crate::models::{Leg, SegmentKey};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// Fewer than two waypoints, or the same identifier given twice.
    #[error("invalid waypoint set: {0}")]
    InvalidWaypointSet(String),

    #[error("{count} waypoints exceeds the exhaustive search limit of {max}")]
    TooManyWaypoints { count: usize, max: usize },

    #[error("these identifiers were not found: {}", .0.join(", "))]
    UnknownWaypoint(Vec<String>),

    #[error("vehicle type '{0}' not found")]
    UnknownVehicle(String),

    /// The cost model was asked about a segment the aggregator never saw.
    #[error("segment {0} not found in route factors")]
    SegmentNotFound(SegmentKey),

    #[error("no distance recorded for leg {0}")]
    DistanceNotFound(Leg),

    #[error("vehicle '{0}' has no usable cruising speed")]
    DivisionDegenerate(String),

    #[error("route search cancelled before completion")]
    SearchCancelled,

    #[error("weather data unavailable: {0}")]
    WeatherUnavailable(String),
}
