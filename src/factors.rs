//! Per-segment environmental factors.
//!
//! Weather providers report observations per tour or per segment. Everything
//! is reshaped into one bucket per unordered segment; repeated observations
//! accumulate and each weighs equally in the derived factor.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Leg, SegmentKey};
use crate::weather::WeatherSnapshot;

/// Weather descriptor and temperature seen along a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub weather: String,
    pub temperature_c: f64,
}

impl Observation {
    pub fn new(weather: impl Into<String>, temperature_c: f64) -> Self {
        Self {
            weather: weather.into(),
            temperature_c,
        }
    }
}

/// An observation tagged with the leg it was taken on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentObservation {
    pub segment: Leg,
    pub weather: String,
    pub temperature_c: f64,
}

/// The observations a provider reported for one full tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourObservations {
    /// e.g. `"SIN -> LAX -> JFK"`.
    pub tour_key: String,
    pub segments: Vec<SegmentObservation>,
}

/// Representative conditions for a segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentFactor {
    /// Most frequent descriptor; ties go to the one recorded first.
    pub weather: String,
    pub mean_temperature_c: f64,
}

/// Observations bucketed by unordered segment.
#[derive(Debug, Clone, Default)]
pub struct RouteFactors {
    buckets: HashMap<SegmentKey, Vec<Observation>>,
}

impl RouteFactors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buckets every segment of every tour. A segment shared by several
    /// tours ends up with one observation per tour.
    pub fn aggregate_tours(tours: &[TourObservations]) -> Self {
        let mut factors = Self::new();
        for tour in tours {
            for observation in &tour.segments {
                factors.record(
                    observation.segment.key(),
                    Observation::new(observation.weather.as_str(), observation.temperature_c),
                );
            }
        }
        factors
    }

    /// One observation per unique segment, as captured in the snapshot.
    pub fn from_snapshot(snapshot: &WeatherSnapshot) -> Self {
        let mut factors = Self::new();
        for (key, observation) in snapshot.iter() {
            factors.record(key.clone(), observation.clone());
        }
        factors
    }

    /// Appends to the segment's bucket.
    pub fn record(&mut self, key: SegmentKey, observation: Observation) {
        self.buckets.entry(key).or_default().push(observation);
    }

    pub fn observations(&self, key: &SegmentKey) -> &[Observation] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, key: &SegmentKey) -> bool {
        self.buckets.get(key).is_some_and(|bucket| !bucket.is_empty())
    }

    pub fn factor_for(&self, key: &SegmentKey) -> Option<SegmentFactor> {
        let bucket = self.buckets.get(key)?;
        let weather = most_common(bucket.iter().map(|o| o.weather.as_str()))?;
        let mean_temperature_c =
            bucket.iter().map(|o| o.temperature_c).sum::<f64>() / bucket.len() as f64;

        Some(SegmentFactor {
            weather: weather.to_string(),
            mean_temperature_c,
        })
    }

    /// Number of distinct segments recorded.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Most frequent item; on a tie the earliest one wins.
pub(crate) fn most_common<'a>(items: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(seen, _)| *seen == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (item, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((item, count));
        }
    }
    best.map(|(item, _)| item)
}
