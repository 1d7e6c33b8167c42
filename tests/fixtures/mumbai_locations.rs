//! Real Mumbai locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. Only the relative geometry
//! matters to the tests; no network lookups are made against them.

/// A named location with coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }
}

/// Warehouse / depot candidates.
pub const DEPOTS: &[Location] = &[
    Location::new("Lower Parel Warehouse", 18.9977, 72.8302),
    Location::new("BKC Hub", 19.0653, 72.8693),
];

/// Delivery stops spread across the city, roughly south to north.
pub const STOPS: &[Location] = &[
    Location::new("Colaba", 18.9067, 72.8147),
    Location::new("Gateway of India", 18.9220, 72.8347),
    Location::new("CST Station", 18.9398, 72.8355),
    Location::new("Worli", 19.0096, 72.8175),
    Location::new("Dadar", 19.0178, 72.8478),
    Location::new("Juhu", 19.0948, 72.8258),
    Location::new("Andheri", 19.1197, 72.8464),
    Location::new("Powai", 19.1176, 72.9060),
];
