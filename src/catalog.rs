//! In-memory waypoint and vehicle directories.
//!
//! Records are serde-deserialisable so apps can fill the catalogs from
//! whatever reference tables they ship (CSV, JSON, a database).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::RouteError;
use crate::models::{VehicleSpec, Waypoint};
use crate::traits::{VehicleDirectory, WaypointDirectory};

/// One row of an airport/port reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointRecord {
    /// Short code, e.g. an IATA code.
    pub code: String,
    /// Full name, e.g. "Changi Intl".
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// Waypoints addressable by code or by full name.
#[derive(Debug, Clone, Default)]
pub struct WaypointCatalog {
    records: Vec<WaypointRecord>,
    by_code: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl WaypointCatalog {
    pub fn new(records: impl IntoIterator<Item = WaypointRecord>) -> Self {
        let mut catalog = Self::default();
        for record in records {
            catalog.insert(record);
        }
        catalog
    }

    /// Adds a record; a later record with the same code or name shadows the
    /// earlier one.
    pub fn insert(&mut self, record: WaypointRecord) {
        let index = self.records.len();
        self.by_code.insert(record.code.clone(), index);
        self.by_name.insert(record.name.clone(), index);
        self.records.push(record);
    }

    pub fn records(&self) -> &[WaypointRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Option label in the form "CODE - Name - Country".
    pub fn label(&self, id: &str) -> Option<String> {
        let record = self.find(id)?;
        Some(match &record.country {
            Some(country) => format!("{} - {} - {}", record.code, record.name, country),
            None => format!("{} - {}", record.code, record.name),
        })
    }

    fn find(&self, id: &str) -> Option<&WaypointRecord> {
        let index = self.by_code.get(id).or_else(|| self.by_name.get(id))?;
        self.records.get(*index)
    }
}

impl WaypointDirectory for WaypointCatalog {
    /// The returned waypoint keeps the identifier the caller asked for.
    fn waypoint(&self, id: &str) -> Result<Waypoint, RouteError> {
        self.find(id)
            .map(|record| Waypoint::new(id, record.lat, record.lon))
            .ok_or_else(|| RouteError::UnknownWaypoint(vec![id.to_string()]))
    }
}

/// Vehicles keyed by name.
#[derive(Debug, Clone, Default)]
pub struct VehicleCatalog {
    vehicles: HashMap<String, VehicleSpec>,
}

impl VehicleCatalog {
    pub fn new(specs: impl IntoIterator<Item = VehicleSpec>) -> Self {
        Self {
            vehicles: specs.into_iter().map(|spec| (spec.name.clone(), spec)).collect(),
        }
    }

    /// Sorted vehicle names.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.vehicles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl VehicleDirectory for VehicleCatalog {
    fn vehicle(&self, name: &str) -> Result<VehicleSpec, RouteError> {
        self.vehicles
            .get(name)
            .cloned()
            .ok_or_else(|| RouteError::UnknownVehicle(name.to_string()))
    }
}
