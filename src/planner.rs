//! End-to-end planning: resolve inputs, search, evaluate.
//!
//! Bad inputs (unknown waypoints or vehicle, malformed sets, unusable vehicle
//! specs) are rejected before any weather is fetched or any permutation is
//! scored.

use tracing::info;

use crate::error::RouteError;
use crate::factors::RouteFactors;
use crate::feasibility::{evaluate, FeasibilityReport};
use crate::haversine::{DistanceTable, HaversineDistances};
use crate::models::{format_tour, VehicleSpec};
use crate::solver::{find_optimal_route, validate_waypoint_set, SolveOptions};
use crate::traits::{DistanceProvider, VehicleDirectory, WaypointDirectory, WeatherProvider};
use crate::weather::WeatherSnapshot;

#[derive(Debug, Clone)]
pub struct RoutePlan {
    pub tour: Vec<String>,
    /// Adjusted cost of the tour (distance plus environmental penalties).
    pub cost: f64,
    pub vehicle: VehicleSpec,
    pub distances: DistanceTable,
    pub report: FeasibilityReport,
}

impl RoutePlan {
    pub fn route_string(&self) -> String {
        format_tour(&self.tour)
    }

    pub fn summary(&self) -> String {
        let verdict = if self.report.feasible {
            "Yes, no refueling required."
        } else {
            "No, refueling required in one or more sectors."
        };
        format!(
            "Optimal route: {}\nTotal round trip cost: {} km\nCan fly entire route: {}",
            self.route_string(),
            self.cost,
            verdict
        )
    }
}

pub struct RoutePlanner<'a, W, V, P, D = HaversineDistances> {
    waypoints: &'a W,
    vehicles: &'a V,
    weather: &'a P,
    distances: D,
    options: SolveOptions,
}

impl<'a, W, V, P> RoutePlanner<'a, W, V, P, HaversineDistances>
where
    W: WaypointDirectory,
    V: VehicleDirectory,
    P: WeatherProvider,
{
    pub fn new(waypoints: &'a W, vehicles: &'a V, weather: &'a P, options: SolveOptions) -> Self {
        Self {
            waypoints,
            vehicles,
            weather,
            distances: HaversineDistances,
            options,
        }
    }
}

impl<'a, W, V, P, D> RoutePlanner<'a, W, V, P, D>
where
    W: WaypointDirectory,
    V: VehicleDirectory,
    P: WeatherProvider,
    D: DistanceProvider,
{
    /// Replaces the haversine distance source.
    pub fn with_distances<D2: DistanceProvider>(self, distances: D2) -> RoutePlanner<'a, W, V, P, D2> {
        RoutePlanner {
            waypoints: self.waypoints,
            vehicles: self.vehicles,
            weather: self.weather,
            distances,
            options: self.options,
        }
    }

    pub fn plan(&self, ids: &[String], vehicle_name: &str) -> Result<RoutePlan, RouteError> {
        validate_waypoint_set(ids)?;
        if ids.len() > self.options.max_waypoints {
            return Err(RouteError::TooManyWaypoints {
                count: ids.len(),
                max: self.options.max_waypoints,
            });
        }
        let waypoints = self.waypoints.resolve_all(ids)?;
        let vehicle = self.vehicles.vehicle(vehicle_name)?;
        vehicle.validate()?;

        info!(waypoints = ids.len(), vehicle = %vehicle.name, "planning route");

        let snapshot = WeatherSnapshot::fetch(self.weather, &waypoints)
            .map_err(|err| RouteError::WeatherUnavailable(err.to_string()))?;
        let factors = RouteFactors::from_snapshot(&snapshot);
        let distances = self.distances.distances_for(&waypoints);

        let optimal = find_optimal_route(ids, &distances, &factors, &self.options)?;
        let report = evaluate(&optimal.tour, &distances, &vehicle)?;

        info!(
            route = %format_tour(&optimal.tour),
            cost = optimal.cost,
            feasible = report.feasible,
            total_fuel_kg = report.total_fuel_kg,
            "route planned"
        );

        Ok(RoutePlan {
            tour: optimal.tour,
            cost: optimal.cost,
            vehicle,
            distances,
            report,
        })
    }
}
