//! Tunable constants at the core's boundary.
//!
//! Callers override economics (fuel price, weights, limits, speeds,
//! multipliers) here without touching the algorithms. Defaults match the
//! production constants.

use crate::models::{CapacityClass, PackageSize, VehicleType};

/// Capacity-weight units per package size class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeWeights {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
}

impl Default for SizeWeights {
    fn default() -> Self {
        Self {
            small: 1.0,
            medium: 1.5,
            large: 2.0,
        }
    }
}

impl SizeWeights {
    pub fn weight(&self, size: PackageSize) -> f64 {
        match size {
            PackageSize::Small => self.small,
            PackageSize::Medium => self.medium,
            PackageSize::Large => self.large,
        }
    }
}

/// Capacity-weight limit per vehicle capacity class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityLimits {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
}

impl Default for CapacityLimits {
    fn default() -> Self {
        Self {
            small: 3.0,
            medium: 8.0,
            large: 15.0,
        }
    }
}

impl CapacityLimits {
    pub fn limit(&self, class: CapacityClass) -> f64 {
        match class {
            CapacityClass::Small => self.small,
            CapacityClass::Medium => self.medium,
            CapacityClass::Large => self.large,
        }
    }
}

/// Assumed base travel speed per vehicle type, km/h.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSpeeds {
    pub motorcycle: f64,
    pub van: f64,
    pub truck: f64,
}

impl Default for VehicleSpeeds {
    fn default() -> Self {
        Self {
            motorcycle: 25.0,
            van: 20.0,
            truck: 15.0,
        }
    }
}

impl VehicleSpeeds {
    pub fn speed_kmh(&self, vehicle_type: VehicleType) -> f64 {
        match vehicle_type {
            VehicleType::Motorcycle => self.motorcycle,
            VehicleType::Van => self.van,
            VehicleType::Truck => self.truck,
        }
    }
}

/// Top-level optimizer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    /// Price of one unit of fuel, used by the "fuel" goal and the final
    /// cost estimate.
    pub fuel_price_per_unit: f64,
    pub size_weights: SizeWeights,
    pub capacity_limits: CapacityLimits,
    pub vehicle_speeds: VehicleSpeeds,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            fuel_price_per_unit: 105.0,
            size_weights: SizeWeights::default(),
            capacity_limits: CapacityLimits::default(),
            vehicle_speeds: VehicleSpeeds::default(),
        }
    }
}
