//! Realistic planning tests using real airport coordinates.
//!
//! These tests run the full pipeline (catalog lookup, weather snapshot,
//! haversine distances, exhaustive search, feasibility) with a deterministic
//! climate model standing in for live weather.

mod fixtures;

use std::cell::Cell;

use flight_route_planner::catalog::VehicleCatalog;
use flight_route_planner::error::RouteError;
use flight_route_planner::factors::{Observation, RouteFactors};
use flight_route_planner::feasibility::evaluate;
use flight_route_planner::haversine::pairwise_distances;
use flight_route_planner::models::{Leg, VehicleSpec, Waypoint};
use flight_route_planner::planner::RoutePlanner;
use flight_route_planner::solver::{find_optimal_route, SolveOptions};
use flight_route_planner::traits::{WaypointDirectory, WeatherProvider};
use flight_route_planner::weather::WeatherSnapshot;

use fixtures::airports::{aircraft_catalog, airport_catalog, codes, narrow_body, EUROPE, HUBS};

// ============================================================================
// Test Infrastructure
// ============================================================================

/// Weather by mid-segment latitude: wet tropics, cloudy high latitudes.
struct ClimateWeather {
    calls: Cell<usize>,
}

impl ClimateWeather {
    fn new() -> Self {
        Self { calls: Cell::new(0) }
    }
}

impl WeatherProvider for ClimateWeather {
    type Error = String;

    fn observe_segment(&self, from: &Waypoint, to: &Waypoint) -> Result<Observation, Self::Error> {
        self.calls.set(self.calls.get() + 1);
        let mid_lat = (from.lat + to.lat) / 2.0;
        let weather = if mid_lat.abs() < 15.0 {
            "light rain"
        } else if mid_lat.abs() > 45.0 {
            "overcast clouds"
        } else {
            "few clouds"
        };
        Ok(Observation::new(weather, 30.0 - mid_lat.abs() * 0.5))
    }
}

struct OfflineWeather;

impl WeatherProvider for OfflineWeather {
    type Error = String;

    fn observe_segment(&self, _from: &Waypoint, _to: &Waypoint) -> Result<Observation, Self::Error> {
        Err("connection refused".to_string())
    }
}

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_hub_tour_visits_every_airport_once() {
    let airports = airport_catalog();
    let vehicles = aircraft_catalog();
    let weather = ClimateWeather::new();
    let planner = RoutePlanner::new(&airports, &vehicles, &weather, SolveOptions::default());

    let requested = codes(&HUBS[..5]);
    let plan = planner.plan(&requested, "Airbus A350-900").unwrap();

    let mut visited = plan.tour.clone();
    visited.sort();
    let mut expected = requested.clone();
    expected.sort();
    assert_eq!(visited, expected);

    // C(5,2) weather calls, five legs including the return
    assert_eq!(weather.calls.get(), 10);
    assert_eq!(plan.report.legs.len(), 5);
    assert_eq!(plan.report.legs[4].leg, Leg::new(plan.tour[4].as_str(), plan.tour[0].as_str()));
    assert!(plan.route_string().ends_with(&format!("-> {}", plan.tour[0])));
}

#[test]
fn test_planner_matches_direct_search() {
    let airports = airport_catalog();
    let vehicles = aircraft_catalog();
    let weather = ClimateWeather::new();
    let planner = RoutePlanner::new(&airports, &vehicles, &weather, SolveOptions::default());

    let requested = codes(&HUBS[..6]);
    let plan = planner.plan(&requested, "Airbus A350-900").unwrap();

    let waypoints = airports.resolve_all(&requested).unwrap();
    let snapshot = WeatherSnapshot::fetch(&ClimateWeather::new(), &waypoints).unwrap();
    let factors = RouteFactors::from_snapshot(&snapshot);
    let distances = pairwise_distances(&waypoints);
    let direct = find_optimal_route(&requested, &distances, &factors, &SolveOptions::default()).unwrap();

    assert_eq!(plan.tour, direct.tour);
    assert_eq!(plan.cost, direct.cost);
    assert_eq!(plan.report, evaluate(&direct.tour, &distances, &plan.vehicle).unwrap());
}

#[test]
fn test_narrow_body_needs_refuel_into_singapore() {
    let airports = airport_catalog();
    let vehicles = aircraft_catalog();
    let weather = ClimateWeather::new();
    let planner = RoutePlanner::new(&airports, &vehicles, &weather, SolveOptions::default());

    let plan = planner.plan(&codes(&HUBS[..5]), &narrow_body().name).unwrap();

    assert!(!plan.report.feasible);
    // every leg touching SIN is over 10,000 km
    for report in &plan.report.legs {
        let touches_sin = report.leg.from == "SIN" || report.leg.to == "SIN";
        if touches_sin {
            assert!(report.refuel_required, "{} should need a refuel", report.leg);
        }
    }
    assert!(plan.report.refuel_legs().len() >= 2);
    assert!(plan.summary().contains("No, refueling required"));

    // totals still cover all legs
    let summed: f64 = plan.report.legs.iter().map(|l| l.fuel_kg).sum();
    assert!((plan.report.total_fuel_kg - summed).abs() < 0.05);
}

#[test]
fn test_turboprop_flies_european_hops() {
    let airports = airport_catalog();
    let vehicles = aircraft_catalog();
    let weather = ClimateWeather::new();
    let planner = RoutePlanner::new(&airports, &vehicles, &weather, SolveOptions::default());

    let plan = planner.plan(&codes(EUROPE), "ATR 72-600").unwrap();

    assert!(plan.report.feasible);
    assert!(plan.report.refuel_legs().is_empty());
    assert!(plan.report.total_time_h > 4.0 * (0.25 + 10.0 / 60.0) - 0.01);
    assert!(plan.report.total_co2_kg() > plan.report.total_fuel_kg);
}

#[test]
fn test_lookup_by_airport_name() {
    let airports = airport_catalog();
    let vehicles = aircraft_catalog();
    let weather = ClimateWeather::new();
    let planner = RoutePlanner::new(&airports, &vehicles, &weather, SolveOptions::default());

    let plan = planner.plan(&ids(&["Heathrow", "CDG", "AMS"]), "Boeing 737-800").unwrap();
    assert!(plan.tour.contains(&"Heathrow".to_string()));
    assert!(plan.report.feasible);
}

#[test]
fn test_unknown_airports_fail_before_weather() {
    let airports = airport_catalog();
    let vehicles = aircraft_catalog();
    let weather = ClimateWeather::new();
    let planner = RoutePlanner::new(&airports, &vehicles, &weather, SolveOptions::default());

    let err = planner.plan(&ids(&["SIN", "XXX", "LHR", "ZZZ"]), "Airbus A350-900").unwrap_err();
    assert_eq!(err, RouteError::UnknownWaypoint(ids(&["XXX", "ZZZ"])));
    assert_eq!(weather.calls.get(), 0);
}

#[test]
fn test_duplicate_airport_rejected() {
    let airports = airport_catalog();
    let vehicles = aircraft_catalog();
    let weather = ClimateWeather::new();
    let planner = RoutePlanner::new(&airports, &vehicles, &weather, SolveOptions::default());

    let err = planner.plan(&ids(&["SIN", "LHR", "SIN"]), "Airbus A350-900").unwrap_err();
    assert!(matches!(err, RouteError::InvalidWaypointSet(_)));
}

#[test]
fn test_degenerate_vehicle_rejected() {
    let airports = airport_catalog();
    let vehicles = VehicleCatalog::new(vec![VehicleSpec::new("Balloon", 0.0, 5.0, 100.0)]);
    let weather = ClimateWeather::new();
    let planner = RoutePlanner::new(&airports, &vehicles, &weather, SolveOptions::default());

    let err = planner.plan(&ids(&["LHR", "CDG"]), "Balloon").unwrap_err();
    assert_eq!(err, RouteError::DivisionDegenerate("Balloon".to_string()));
    assert_eq!(weather.calls.get(), 0);
}

#[test]
fn test_weather_outage_surfaces() {
    let airports = airport_catalog();
    let vehicles = aircraft_catalog();
    let planner = RoutePlanner::new(&airports, &vehicles, &OfflineWeather, SolveOptions::default());

    let err = planner.plan(&ids(&["LHR", "CDG"]), "Airbus A350-900").unwrap_err();
    assert_eq!(err, RouteError::WeatherUnavailable("connection refused".to_string()));
}
