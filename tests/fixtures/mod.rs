//! Test fixtures for routegenie-core.
//!
//! Provides:
//! - Real Mumbai locations for realistic pipeline tests
//! - Builders for delivery points and vehicles
//! - A matrix source pinned to a fixed time of day for reproducibility

pub mod mumbai_locations;

pub use mumbai_locations::*;

use chrono::NaiveTime;
use routegenie_core::config::OptimizerConfig;
use routegenie_core::matrix::{FallbackMatrix, MatrixSource};
use routegenie_core::models::{
    CapacityClass, DeliveryPoint, PackageSize, Vehicle, VehicleType,
};
use routegenie_core::traffic::TrafficModel;

/// Builder for delivery points with sensible defaults.
#[derive(Debug, Clone)]
pub struct TestPoint {
    point: DeliveryPoint,
}

impl TestPoint {
    pub fn new(id: &str) -> Self {
        Self {
            point: DeliveryPoint {
                id: id.to_string(),
                lat: 0.0,
                lon: 0.0,
                address: String::new(),
                size: PackageSize::Small,
                priority: 3,
                time_window_start: None,
                time_window_end: None,
            },
        }
    }

    pub fn at(mut self, lat: f64, lon: f64) -> Self {
        self.point.lat = lat;
        self.point.lon = lon;
        self
    }

    pub fn located(self, location: &Location) -> Self {
        self.at(location.lat, location.lon)
    }

    pub fn size(mut self, size: PackageSize) -> Self {
        self.point.size = size;
        self
    }

    pub fn priority(mut self, priority: u8) -> Self {
        self.point.priority = priority;
        self
    }

    pub fn build(self) -> DeliveryPoint {
        self.point
    }
}

pub fn point(id: &str) -> TestPoint {
    TestPoint::new(id)
}

pub fn van() -> Vehicle {
    Vehicle {
        vehicle_type: VehicleType::Van,
        capacity: CapacityClass::Medium,
        fuel_efficiency: 10.0,
    }
}

pub fn truck() -> Vehicle {
    Vehicle {
        vehicle_type: VehicleType::Truck,
        capacity: CapacityClass::Large,
        fuel_efficiency: 6.0,
    }
}

/// Fallback-only matrix source at the configured van speed, pinned to
/// midday (moderate traffic, x1.3) so estimates do not depend on when the
/// tests run.
pub fn midday_source() -> MatrixSource {
    let mut fallback = FallbackMatrix::for_vehicle(VehicleType::Van, &OptimizerConfig::default());
    fallback.traffic = TrafficModel::default().at(NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    MatrixSource::fallback_only(fallback)
}
