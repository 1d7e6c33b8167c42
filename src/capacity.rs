//! Vehicle capacity feasibility check.

use crate::config::OptimizerConfig;
use crate::error::OptimizeError;
use crate::models::{DeliveryPoint, Vehicle};

/// Aggregate size-weighted load of a set of deliveries.
pub fn total_weight(points: &[DeliveryPoint], config: &OptimizerConfig) -> f64 {
    points
        .iter()
        .map(|p| config.size_weights.weight(p.size))
        .sum()
}

/// Check that the vehicle's capacity class can carry all deliveries.
///
/// A load exactly at the limit is feasible. Runs before any matrix or
/// construction work; failure aborts the whole request.
pub fn check(
    points: &[DeliveryPoint],
    vehicle: &Vehicle,
    config: &OptimizerConfig,
) -> Result<(), OptimizeError> {
    let needed = total_weight(points, config);
    let available = config.capacity_limits.limit(vehicle.capacity);
    if needed > available {
        return Err(OptimizeError::CapacityExceeded { needed, available });
    }
    Ok(())
}
