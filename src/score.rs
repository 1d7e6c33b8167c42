//! Confidence scoring for an optimized route.
//!
//! Composite of route efficiency, priority adherence, and capacity
//! utilization, weighted 0.4/0.3/0.3 and capped at 1.0.

use std::collections::HashMap;

use crate::capacity::total_weight;
use crate::config::OptimizerConfig;
use crate::models::{DeliveryPoint, DistanceMatrix, Vehicle};

const EFFICIENCY_WEIGHT: f64 = 0.4;
const PRIORITY_WEIGHT: f64 = 0.3;
const UTILIZATION_WEIGHT: f64 = 0.3;

pub fn evaluate(
    route: &[String],
    matrix: &DistanceMatrix,
    vehicle: &Vehicle,
    points: &[DeliveryPoint],
    config: &OptimizerConfig,
) -> f64 {
    let score = EFFICIENCY_WEIGHT * efficiency(route, matrix)
        + PRIORITY_WEIGHT * priority_adherence(route, points)
        + UTILIZATION_WEIGHT * capacity_utilization(points, vehicle, config);
    score.min(1.0)
}

/// Sum of direct start-to-stop distances over the actual route distance.
///
/// A star-shaped lower-bound proxy, not a true TSP bound; it can exceed 1
/// for short routes, which the cap in `evaluate` absorbs.
pub fn efficiency(route: &[String], matrix: &DistanceMatrix) -> f64 {
    let route_distance: f64 = route
        .windows(2)
        .map(|leg| matrix.entry(&leg[0], &leg[1]).distance_km)
        .sum();
    if route_distance <= 0.0 {
        return 0.0;
    }

    let start = &route[0];
    let star_bound: f64 = route[1..]
        .iter()
        .map(|stop| matrix.entry(start, stop).distance_km)
        .sum();
    star_bound / route_distance
}

/// Fraction of ordered delivery-stop pairs scheduled in priority order.
///
/// A violation is an earlier stop whose priority value is strictly larger
/// (less important) than a later stop's. 1.0 when there are fewer than two
/// delivery stops.
pub fn priority_adherence(route: &[String], points: &[DeliveryPoint]) -> f64 {
    let priorities: HashMap<&str, u8> = points
        .iter()
        .map(|p| (p.id.as_str(), p.priority))
        .collect();

    let mut violations = 0u32;
    let mut comparisons = 0u32;
    // Skip index 0: the start location has no priority of its own.
    for i in 1..route.len() {
        for j in i + 1..route.len() {
            let (Some(earlier), Some(later)) = (
                priorities.get(route[i].as_str()),
                priorities.get(route[j].as_str()),
            ) else {
                continue;
            };
            comparisons += 1;
            if earlier > later {
                violations += 1;
            }
        }
    }

    if comparisons == 0 {
        return 1.0;
    }
    1.0 - f64::from(violations) / f64::from(comparisons)
}

/// How well the load fills the vehicle, rewarding utilization up to 90%
/// and penalizing beyond it (floor 0.1).
pub fn capacity_utilization(
    points: &[DeliveryPoint],
    vehicle: &Vehicle,
    config: &OptimizerConfig,
) -> f64 {
    let ratio = total_weight(points, config) / config.capacity_limits.limit(vehicle.capacity);
    if ratio <= 0.9 {
        ratio / 0.9
    } else {
        (1.0 - (ratio - 0.9) * 2.0).max(0.1)
    }
}
