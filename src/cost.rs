//! Environmental cost model.
//!
//! Turns a segment's aggregated weather and temperature into a penalty that
//! is added to its geodesic distance. The weights let weather dominate
//! distance on short and medium legs.

use crate::error::RouteError;
use crate::factors::RouteFactors;
use crate::models::Leg;

/// Penalty per unit of weather risk.
pub const WEATHER_WEIGHT: f64 = 100.0;

/// Penalty per unit of temperature impact.
pub const TEMPERATURE_WEIGHT: f64 = 50.0;

/// Risk assigned to descriptors missing from the table.
pub const DEFAULT_WEATHER_RISK: f64 = 0.5;

const WEATHER_RISKS: &[(&str, f64)] = &[
    ("clear sky", 0.1),
    ("few clouds", 0.2),
    ("scattered clouds", 0.3),
    ("broken clouds", 0.4),
    ("overcast clouds", 0.5),
    ("light rain", 0.6),
    ("rain", 0.7),
    ("storm", 0.9),
];

const IDEAL_TEMPERATURE_C: (f64, f64) = (20.0, 25.0);
const IDEAL_IMPACT: f64 = 0.1;

/// Risk score in [0, 1] for a weather descriptor.
pub fn weather_risk(descriptor: &str) -> f64 {
    WEATHER_RISKS
        .iter()
        .find(|(name, _)| *name == descriptor)
        .map(|(_, risk)| *risk)
        .unwrap_or(DEFAULT_WEATHER_RISK)
}

/// Impact of temperature on fuel efficiency.
///
/// Flat inside the ideal band, otherwise grows linearly with the distance
/// from 22.5 °C. Not clamped.
pub fn temperature_impact(celsius: f64) -> f64 {
    let (low, high) = IDEAL_TEMPERATURE_C;
    if celsius < low || celsius > high {
        (celsius - (low + high) / 2.0).abs() / 30.0
    } else {
        IDEAL_IMPACT
    }
}

/// Distance plus weather and temperature penalties for one leg.
///
/// The segment must have been recorded in `factors` (either orientation).
pub fn adjusted_cost(leg: &Leg, base_distance: f64, factors: &RouteFactors) -> Result<f64, RouteError> {
    let key = leg.key();
    let factor = factors
        .factor_for(&key)
        .ok_or(RouteError::SegmentNotFound(key))?;

    let weather_cost = weather_risk(&factor.weather) * WEATHER_WEIGHT;
    let temperature_cost = temperature_impact(factor.mean_temperature_c) * TEMPERATURE_WEIGHT;

    Ok(base_distance + weather_cost + temperature_cost)
}
