//! Interfaces to the collaborators the planner core depends on.
//!
//! Reference data (waypoints, vehicles) and weather come from outside the
//! core. Concrete apps implement these for their own data sources; the crate
//! ships in-memory catalogs and an OpenWeather adapter.

use std::fmt::Display;

use crate::error::RouteError;
use crate::factors::Observation;
use crate::haversine::DistanceTable;
use crate::models::{VehicleSpec, Waypoint};

/// Resolves waypoint identifiers to coordinates.
pub trait WaypointDirectory {
    /// Looks up one identifier. A miss is `RouteError::UnknownWaypoint`,
    /// never a default location.
    fn waypoint(&self, id: &str) -> Result<Waypoint, RouteError>;

    /// Resolves every identifier, reporting all misses together.
    fn resolve_all(&self, ids: &[String]) -> Result<Vec<Waypoint>, RouteError> {
        let mut found = Vec::with_capacity(ids.len());
        let mut missing = Vec::new();
        for id in ids {
            match self.waypoint(id) {
                Ok(waypoint) => found.push(waypoint),
                Err(_) => missing.push(id.clone()),
            }
        }

        if missing.is_empty() {
            Ok(found)
        } else {
            Err(RouteError::UnknownWaypoint(missing))
        }
    }
}

/// Resolves vehicle names to performance figures.
pub trait VehicleDirectory {
    /// A miss is `RouteError::UnknownVehicle`.
    fn vehicle(&self, name: &str) -> Result<VehicleSpec, RouteError>;
}

/// Supplies en-route weather for one segment.
///
/// Implementations are called once per unique segment before the search
/// starts; the results are frozen into a `WeatherSnapshot`.
pub trait WeatherProvider {
    type Error: Display;

    fn observe_segment(&self, from: &Waypoint, to: &Waypoint) -> Result<Observation, Self::Error>;
}

/// Provides pairwise distances for a set of waypoints.
///
/// The returned table must hold every pair in both orientations.
pub trait DistanceProvider {
    fn distances_for(&self, waypoints: &[Waypoint]) -> DistanceTable;
}
