//! Fuel and time figures for a tour, leg by leg.
//!
//! Each leg is flown as climb, cruise and descent. Climb and descent use
//! fixed speeds and durations; only cruise depends on the vehicle. A fixed
//! reserve of 5% of tank capacity is added to every leg.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::RouteError;
use crate::haversine::DistanceTable;
use crate::models::{round2, tour_legs, Leg, VehicleSpec};
use crate::solver::validate_waypoint_set;

pub const CLIMB_SPEED_KMH: f64 = 280.0;
pub const CLIMB_DURATION_H: f64 = 15.0 / 60.0;
pub const DESCENT_SPEED_KMH: f64 = 250.0;
pub const DESCENT_DURATION_H: f64 = 10.0 / 60.0;

/// Share of tank capacity held back as reserve on every leg.
pub const RESERVE_FUEL_FRACTION: f64 = 0.05;

/// kg of CO2 emitted per kg of jet fuel burned.
pub const CO2_PER_KG_FUEL: f64 = 3.16;

/// Fuel and time for one leg, unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentEstimate {
    pub fuel_kg: f64,
    pub time_h: f64,
}

/// Fuel (reserve included) and elapsed time to fly `distance_km`.
///
/// Legs shorter than climb plus descent never reach cruise: climb and
/// descent keep their fixed distances and cruise is zero. A vehicle without
/// a positive cruising speed cannot cover any cruise distance, which shows up
/// as infinite time and fuel.
pub fn segment_fuel_and_time(distance_km: f64, vehicle: &VehicleSpec) -> SegmentEstimate {
    let climb_distance = CLIMB_SPEED_KMH * CLIMB_DURATION_H;
    let descent_distance = DESCENT_SPEED_KMH * DESCENT_DURATION_H;

    let (climb_time, descent_time, cruise_distance) = if distance_km < climb_distance + descent_distance {
        (
            climb_distance / CLIMB_SPEED_KMH,
            descent_distance / DESCENT_SPEED_KMH,
            0.0,
        )
    } else {
        (
            CLIMB_DURATION_H,
            DESCENT_DURATION_H,
            distance_km - climb_distance - descent_distance,
        )
    };

    let cruise_time = if cruise_distance <= 0.0 {
        0.0
    } else if vehicle.validate().is_ok() {
        cruise_distance / vehicle.cruising_speed_kmh
    } else {
        f64::INFINITY
    };

    let time_h = climb_time + cruise_time + descent_time;
    let reserve = RESERVE_FUEL_FRACTION * vehicle.max_fuel_capacity_kg;
    let fuel_kg = if time_h.is_finite() {
        time_h * vehicle.fuel_burn_kg_per_h + reserve
    } else {
        f64::INFINITY
    };

    SegmentEstimate { fuel_kg, time_h }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegReport {
    pub leg: Leg,
    pub distance_km: f64,
    /// Rounded to 2 decimals.
    pub fuel_kg: f64,
    /// Rounded to 2 decimals.
    pub time_h: f64,
    pub refuel_required: bool,
}

impl LegReport {
    pub fn co2_kg(&self) -> f64 {
        round2(self.fuel_kg * CO2_PER_KG_FUEL)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityReport {
    /// True when no leg needs a refuel.
    pub feasible: bool,
    pub total_fuel_kg: f64,
    pub total_time_h: f64,
    pub legs: Vec<LegReport>,
}

impl FeasibilityReport {
    /// Legs whose fuel demand exceeds tank capacity.
    pub fn refuel_legs(&self) -> Vec<&Leg> {
        self.legs
            .iter()
            .filter(|report| report.refuel_required)
            .map(|report| &report.leg)
            .collect()
    }

    pub fn total_co2_kg(&self) -> f64 {
        round2(self.total_fuel_kg * CO2_PER_KG_FUEL)
    }
}

/// Flies every leg of `tour`, the closing one included.
///
/// An infeasible leg marks the route infeasible but evaluation continues, so
/// the report always covers every leg and the totals include all of them.
pub fn evaluate(
    tour: &[String],
    distances: &DistanceTable,
    vehicle: &VehicleSpec,
) -> Result<FeasibilityReport, RouteError> {
    validate_waypoint_set(tour)?;

    let mut legs = Vec::with_capacity(tour.len());
    let mut total_fuel = 0.0;
    let mut total_time = 0.0;
    let mut feasible = true;

    for leg in tour_legs(tour) {
        let distance_km = distances
            .get(&leg.from, &leg.to)
            .ok_or_else(|| RouteError::DistanceNotFound(leg.clone()))?;
        let estimate = segment_fuel_and_time(distance_km, vehicle);

        let refuel_required = estimate.fuel_kg > vehicle.max_fuel_capacity_kg;
        if refuel_required {
            warn!(
                leg = %leg,
                fuel_kg = round2(estimate.fuel_kg),
                capacity_kg = vehicle.max_fuel_capacity_kg,
                "cannot fly leg without refueling"
            );
            feasible = false;
        } else {
            debug!(
                leg = %leg,
                fuel_kg = round2(estimate.fuel_kg),
                time_h = round2(estimate.time_h),
                "leg within range"
            );
        }

        total_fuel += estimate.fuel_kg;
        total_time += estimate.time_h;
        legs.push(LegReport {
            leg,
            distance_km,
            fuel_kg: round2(estimate.fuel_kg),
            time_h: round2(estimate.time_h),
            refuel_required,
        });
    }

    Ok(FeasibilityReport {
        feasible,
        total_fuel_kg: round2(total_fuel),
        total_time_h: round2(total_time),
        legs,
    })
}
