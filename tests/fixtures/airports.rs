//! Real airport locations and representative aircraft figures.
//!
//! Coordinates are aerodrome reference points rounded to 4 decimals.

use flight_route_planner::catalog::{VehicleCatalog, WaypointCatalog, WaypointRecord};
use flight_route_planner::models::VehicleSpec;

/// A named airport with coordinates.
#[derive(Debug, Clone)]
pub struct Airport {
    pub code: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Airport {
    pub const fn new(code: &'static str, name: &'static str, country: &'static str, lat: f64, lon: f64) -> Self {
        Self {
            code,
            name,
            country,
            lat,
            lon,
        }
    }

    pub fn record(&self) -> WaypointRecord {
        WaypointRecord {
            code: self.code.to_string(),
            name: self.name.to_string(),
            country: Some(self.country.to_string()),
            lat: self.lat,
            lon: self.lon,
        }
    }
}

// ============================================================================
// Long-haul hubs
// ============================================================================

pub const HUBS: &[Airport] = &[
    Airport::new("SIN", "Changi Intl", "Singapore", 1.3644, 103.9915),
    Airport::new("LAX", "Los Angeles Intl", "United States", 33.9416, -118.4085),
    Airport::new("JFK", "John F Kennedy Intl", "United States", 40.6413, -73.7781),
    Airport::new("CDG", "Charles De Gaulle", "France", 49.0097, 2.5479),
    Airport::new("LHR", "Heathrow", "United Kingdom", 51.4700, -0.4543),
    Airport::new("DXB", "Dubai Intl", "United Arab Emirates", 25.2532, 55.3657),
    Airport::new("HND", "Tokyo Intl", "Japan", 35.5494, 139.7798),
    Airport::new("SYD", "Sydney Kingsford Smith", "Australia", -33.9399, 151.1753),
];

// ============================================================================
// Western Europe (short hops, all under 500 km from each other)
// ============================================================================

pub const EUROPE: &[Airport] = &[
    Airport::new("LHR", "Heathrow", "United Kingdom", 51.4700, -0.4543),
    Airport::new("CDG", "Charles De Gaulle", "France", 49.0097, 2.5479),
    Airport::new("AMS", "Schiphol", "Netherlands", 52.3105, 4.7683),
    Airport::new("BRU", "Brussels", "Belgium", 50.9014, 4.4844),
];

/// Every fixture airport, deduplicated by code.
pub fn all_airports() -> Vec<Airport> {
    let mut all: Vec<Airport> = HUBS.to_vec();
    for airport in EUROPE {
        if !all.iter().any(|a| a.code == airport.code) {
            all.push(airport.clone());
        }
    }
    all
}

pub fn airport_catalog() -> WaypointCatalog {
    WaypointCatalog::new(all_airports().iter().map(Airport::record))
}

// ============================================================================
// Aircraft
// ============================================================================

pub fn wide_body() -> VehicleSpec {
    VehicleSpec::new("Airbus A350-900", 903.0, 5800.0, 110_000.0)
}

pub fn narrow_body() -> VehicleSpec {
    VehicleSpec::new("Boeing 737-800", 842.0, 2530.0, 20_894.0)
}

pub fn turboprop() -> VehicleSpec {
    // 4.5 h endurance at 650 kg/h
    VehicleSpec::from_endurance("ATR 72-600", 510.0, 650.0, 4.5)
}

pub fn aircraft_catalog() -> VehicleCatalog {
    VehicleCatalog::new(vec![wide_body(), narrow_body(), turboprop()])
}

pub fn codes(airports: &[Airport]) -> Vec<String> {
    airports.iter().map(|a| a.code.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_airports_unique() {
        let all = all_airports();
        for (i, a) in all.iter().enumerate() {
            assert!(!all[i + 1..].iter().any(|b| b.code == a.code), "duplicate {}", a.code);
        }
    }

    #[test]
    fn test_coordinates_in_range() {
        for airport in all_airports() {
            assert!(airport.lat.abs() <= 90.0, "{} lat out of range", airport.code);
            assert!(airport.lon.abs() <= 180.0, "{} lon out of range", airport.code);
        }
    }
}
