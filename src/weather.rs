//! Read-only weather lookup built before the search starts.
//!
//! Weather is a property of a segment, not of a tour, so a provider is asked
//! once per unordered waypoint pair. The resulting snapshot is handed to the
//! core by value; nothing in the core fetches or caches on its own.

use std::collections::BTreeMap;

use tracing::debug;

use crate::factors::{most_common, Observation, SegmentObservation, TourObservations};
use crate::models::{round2, tour_legs, Leg, SegmentKey, Waypoint};
use crate::traits::WeatherProvider;

/// Interior sample points used along a segment.
pub const DEFAULT_SAMPLE_POINTS: usize = 4;

/// One observation per unordered segment.
#[derive(Debug, Clone, Default)]
pub struct WeatherSnapshot {
    segments: BTreeMap<SegmentKey, Observation>,
}

impl WeatherSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queries `provider` for every C(N,2) pair of `waypoints`.
    ///
    /// Stops at the first provider failure.
    pub fn fetch<P: WeatherProvider>(provider: &P, waypoints: &[Waypoint]) -> Result<Self, P::Error> {
        let mut snapshot = Self::new();
        for (i, from) in waypoints.iter().enumerate() {
            for to in &waypoints[i + 1..] {
                let observation = provider.observe_segment(from, to)?;
                debug!(
                    from = %from.id,
                    to = %to.id,
                    weather = %observation.weather,
                    temperature_c = observation.temperature_c,
                    "segment weather observed"
                );
                snapshot.insert(SegmentKey::new(from.id.as_str(), to.id.as_str()), observation);
            }
        }
        Ok(snapshot)
    }

    pub fn insert(&mut self, key: SegmentKey, observation: Observation) {
        self.segments.insert(key, observation);
    }

    pub fn get(&self, key: &SegmentKey) -> Option<&Observation> {
        self.segments.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SegmentKey, &Observation)> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Expands the snapshot into the tour-keyed shape of providers that
    /// enumerate every ordering. Each tour lists its open-path legs, the
    /// closing leg excluded. Legs absent from the snapshot are left out.
    pub fn tour_observations(&self, tours: &[Vec<String>]) -> Vec<TourObservations> {
        tours
            .iter()
            .map(|tour| {
                let legs = tour_legs(tour);
                let open_path = legs.len().saturating_sub(1);
                let segments = legs
                    .into_iter()
                    .take(open_path)
                    .filter_map(|leg| self.observation_for(leg))
                    .collect();
                TourObservations {
                    tour_key: tour.join(" -> "),
                    segments,
                }
            })
            .collect()
    }

    fn observation_for(&self, leg: Leg) -> Option<SegmentObservation> {
        let observation = self.segments.get(&leg.key())?;
        Some(SegmentObservation {
            segment: leg,
            weather: observation.weather.clone(),
            temperature_c: observation.temperature_c,
        })
    }
}

/// `count` evenly spaced points strictly between `start` and `end`, by
/// linear interpolation of latitude and longitude.
pub fn intermediate_points(start: (f64, f64), end: (f64, f64), count: usize) -> Vec<(f64, f64)> {
    let steps = (count + 1) as f64;
    let lat_step = (end.0 - start.0) / steps;
    let lon_step = (end.1 - start.1) / steps;

    (1..=count)
        .map(|i| {
            let i = i as f64;
            (start.0 + lat_step * i, start.1 + lon_step * i)
        })
        .collect()
}

/// Start, `count` interior points, end.
pub fn sample_points(start: (f64, f64), end: (f64, f64), count: usize) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(count + 2);
    points.push(start);
    points.extend(intermediate_points(start, end, count));
    points.push(end);
    points
}

/// Collapses point samples into one segment observation: most common
/// descriptor and mean temperature rounded to 2 decimals.
pub fn summarize_samples(samples: &[Observation]) -> Option<Observation> {
    let weather = most_common(samples.iter().map(|o| o.weather.as_str()))?;
    let mean = samples.iter().map(|o| o.temperature_c).sum::<f64>() / samples.len() as f64;
    Some(Observation::new(weather, round2(mean)))
}
