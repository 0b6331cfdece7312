//! Great-circle distances between waypoints.
//!
//! Uses the haversine formula on a spherical Earth. Every distance is
//! rounded to 2 decimals so that tables built from the same coordinates
//! compare equal.

use std::collections::HashMap;

use crate::models::{round2, Waypoint};
use crate::traits::DistanceProvider;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two (lat, lon) points in degrees.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // rounding can push `a` just past 1 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();

    round2(EARTH_RADIUS_KM * c)
}

/// Directed lookup of leg distances in kilometers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceTable {
    entries: HashMap<(String, String), f64>,
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores one orientation only.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>, km: f64) {
        self.entries.insert((from.into(), to.into()), km);
    }

    /// Mirrors every entry so both orientations are present.
    ///
    /// An orientation that already exists is left alone.
    pub fn complete_symmetric(&mut self) {
        let mirrored: Vec<((String, String), f64)> = self
            .entries
            .iter()
            .map(|((a, b), km)| ((b.clone(), a.clone()), *km))
            .collect();
        for (key, km) in mirrored {
            self.entries.entry(key).or_insert(km);
        }
    }

    pub fn get(&self, from: &str, to: &str) -> Option<f64> {
        self.entries
            .get(&(from.to_string(), to.to_string()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Computes all C(N,2) pairwise distances, written in both orientations.
pub fn pairwise_distances(waypoints: &[Waypoint]) -> DistanceTable {
    let mut table = DistanceTable::new();
    for (i, from) in waypoints.iter().enumerate() {
        for to in &waypoints[i + 1..] {
            let km = haversine_km(from.coords(), to.coords());
            table.insert(from.id.as_str(), to.id.as_str(), km);
        }
    }
    table.complete_symmetric();
    table
}

/// Haversine-backed distance provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineDistances;

impl DistanceProvider for HaversineDistances {
    fn distances_for(&self, waypoints: &[Waypoint]) -> DistanceTable {
        pairwise_distances(waypoints)
    }
}
