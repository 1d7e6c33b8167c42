//! Typed domain model shared between the core and its HTTP collaborator.
//!
//! These are the canonical representations: the boundary deserializes
//! straight into them, and unknown enum values are rejected by serde rather
//! than defaulted away.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Package size class of a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageSize {
    Small,
    Medium,
    Large,
}

/// Vehicle type, which determines the assumed base travel speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Motorcycle,
    Van,
    Truck,
}

/// Vehicle capacity class, compared against the summed size weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityClass {
    Small,
    Medium,
    Large,
}

/// What the solver minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationGoal {
    Time,
    Distance,
    Fuel,
}

/// A single delivery stop. Immutable input.
///
/// Time windows are carried through for the caller's benefit but are not
/// enforced against the computed schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryPoint {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub address: String,
    pub size: PackageSize,
    /// 1 = highest priority, 5 = lowest.
    pub priority: u8,
    #[serde(default)]
    pub time_window_start: Option<String>,
    #[serde(default)]
    pub time_window_end: Option<String>,
}

impl DeliveryPoint {
    pub fn location(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

/// The vehicle performing the deliveries. Immutable input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub capacity: CapacityClass,
    /// Kilometers travelled per unit of fuel. Must be positive.
    pub fuel_efficiency: f64,
}

/// One cell of the distance/time matrix.
///
/// `traffic_delay_minutes` is additive on top of `duration_minutes`, not
/// already included in it. Diagonal cells are all zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatrixEntry {
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub traffic_delay_minutes: f64,
    /// Set when the upstream marked this cell unusable and it was
    /// zero-filled instead of failing the batch. Cost functions ignore it;
    /// callers can use it to detect degraded edges.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub low_confidence: bool,
}

impl MatrixEntry {
    pub const ZERO: MatrixEntry = MatrixEntry {
        distance_km: 0.0,
        duration_minutes: 0.0,
        traffic_delay_minutes: 0.0,
        low_confidence: false,
    };
}

/// Complete pairwise distance/time matrix over a set of point ids.
///
/// Not guaranteed symmetric when sourced from a live service; symmetric when
/// synthesized by the fallback provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistanceMatrix {
    cells: HashMap<String, HashMap<String, MatrixEntry>>,
}

impl DistanceMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, from: &str, to: &str, entry: MatrixEntry) {
        self.cells
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string(), entry);
    }

    pub fn get(&self, from: &str, to: &str) -> Option<&MatrixEntry> {
        self.cells.get(from)?.get(to)
    }

    /// Look up a cell that must exist for ids already admitted into a route.
    ///
    /// A missing cell at this point is a programming defect, so this panics
    /// rather than masking it.
    pub fn entry(&self, from: &str, to: &str) -> &MatrixEntry {
        &self.cells[from][to]
    }

    pub fn contains(&self, from: &str, to: &str) -> bool {
        self.get(from, to).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A consecutive leg of the final route, annotated with its matrix cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub from_point: String,
    pub to_point: String,
    #[serde(flatten)]
    pub entry: MatrixEntry,
}

/// The result of one optimization call. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedRoute {
    /// Start id first, then every delivery id exactly once.
    pub route_order: Vec<String>,
    pub segments: Vec<RouteSegment>,
    pub total_distance_km: f64,
    pub total_time_minutes: f64,
    pub estimated_fuel_cost: f64,
    /// Confidence score in (0, 1.0], capped at 1.0.
    pub optimization_score: f64,
}
