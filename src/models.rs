//! Plain data carried between the planner stages.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RouteError;

/// A named point (airport, port) in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
}

impl Waypoint {
    pub fn new(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
        }
    }

    /// Location as (lat, lon).
    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

/// Unordered pair of waypoint identifiers.
///
/// `SegmentKey::new("A", "B") == SegmentKey::new("B", "A")`, so lookups keyed
/// by segment never need to try the reversed orientation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentKey {
    low: String,
    high: String,
}

impl SegmentKey {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.low, self.high)
    }
}

/// One directed leg of a concrete tour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Leg {
    pub from: String,
    pub to: String,
}

impl Leg {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn key(&self) -> SegmentKey {
        SegmentKey::new(self.from.as_str(), self.to.as_str())
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Every leg of a closed tour, including the one back to the start.
///
/// A single-waypoint tour yields no legs.
pub fn tour_legs(tour: &[String]) -> Vec<Leg> {
    if tour.len() < 2 {
        return Vec::new();
    }
    let n = tour.len();
    (0..n)
        .map(|i| Leg::new(tour[i].as_str(), tour[(i + 1) % n].as_str()))
        .collect()
}

/// Renders a closed tour as `"A -> B -> C -> A"`.
pub fn format_tour(tour: &[String]) -> String {
    match tour.first() {
        Some(first) => {
            let mut parts: Vec<&str> = tour.iter().map(String::as_str).collect();
            parts.push(first);
            parts.join(" -> ")
        }
        None => String::new(),
    }
}

/// Knots to km/h.
pub fn knots_to_kmh(knots: f64) -> f64 {
    knots * 1.852
}

pub fn nautical_miles_to_km(nautical_miles: f64) -> f64 {
    nautical_miles * 1.852
}

/// Hours needed to fly `range_km` at `speed_kmh`; `None` without forward speed.
pub fn max_flight_time_h(range_km: f64, speed_kmh: f64) -> Option<f64> {
    if speed_kmh > 0.0 && speed_kmh.is_finite() {
        Some(range_km / speed_kmh)
    } else {
        None
    }
}

/// Performance figures of an aircraft or vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub name: String,
    pub cruising_speed_kmh: f64,
    pub fuel_burn_kg_per_h: f64,
    pub max_fuel_capacity_kg: f64,
}

impl VehicleSpec {
    pub fn new(
        name: impl Into<String>,
        cruising_speed_kmh: f64,
        fuel_burn_kg_per_h: f64,
        max_fuel_capacity_kg: f64,
    ) -> Self {
        Self {
            name: name.into(),
            cruising_speed_kmh,
            fuel_burn_kg_per_h,
            max_fuel_capacity_kg,
        }
    }

    /// Derives tank capacity from endurance: burn rate times maximum flight
    /// time. Reference tables often list endurance instead of capacity.
    pub fn from_endurance(
        name: impl Into<String>,
        cruising_speed_kmh: f64,
        fuel_burn_kg_per_h: f64,
        max_flight_time_h: f64,
    ) -> Self {
        Self::new(
            name,
            cruising_speed_kmh,
            fuel_burn_kg_per_h,
            fuel_burn_kg_per_h * max_flight_time_h,
        )
    }

    /// Derives tank capacity from published range. Fails when the cruising
    /// speed cannot turn range into flight time.
    pub fn from_range(
        name: impl Into<String>,
        cruising_speed_kmh: f64,
        fuel_burn_kg_per_h: f64,
        range_km: f64,
    ) -> Result<Self, RouteError> {
        let name = name.into();
        let hours = max_flight_time_h(range_km, cruising_speed_kmh)
            .ok_or_else(|| RouteError::DivisionDegenerate(name.clone()))?;
        Ok(Self::from_endurance(name, cruising_speed_kmh, fuel_burn_kg_per_h, hours))
    }

    /// Rejects specs the cruise-time division cannot handle.
    pub fn validate(&self) -> Result<(), RouteError> {
        if self.cruising_speed_kmh.is_finite() && self.cruising_speed_kmh > 0.0 {
            Ok(())
        } else {
            Err(RouteError::DivisionDegenerate(self.name.clone()))
        }
    }
}

/// Rounds to two decimal places, the precision every reported figure uses.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
