//! Route construction, 2-opt refinement, and the `optimize` orchestrator.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::debug;

use crate::capacity;
use crate::config::OptimizerConfig;
use crate::error::{InputError, OptimizeError};
use crate::matrix::DistanceMatrixProvider;
use crate::models::{
    DeliveryPoint, DistanceMatrix, MatrixEntry, OptimizationGoal, OptimizedRoute, RouteSegment,
    Vehicle,
};
use crate::score;

/// Cost of traversing one matrix cell under the active goal.
fn edge_cost(
    entry: &MatrixEntry,
    goal: OptimizationGoal,
    vehicle: &Vehicle,
    config: &OptimizerConfig,
) -> f64 {
    match goal {
        OptimizationGoal::Distance => entry.distance_km,
        OptimizationGoal::Time => entry.duration_minutes + entry.traffic_delay_minutes,
        OptimizationGoal::Fuel => {
            entry.distance_km / vehicle.fuel_efficiency * config.fuel_price_per_unit
        }
    }
}

/// Total cost of a route: sum of edge costs over consecutive stops.
pub fn route_cost(
    route: &[String],
    matrix: &DistanceMatrix,
    vehicle: &Vehicle,
    goal: OptimizationGoal,
    config: &OptimizerConfig,
) -> f64 {
    route
        .windows(2)
        .map(|leg| edge_cost(matrix.entry(&leg[0], &leg[1]), goal, vehicle, config))
        .sum()
}

/// Greedy nearest-neighbor construction.
///
/// Candidates are iterated in priority-then-input order, so equal-cost ties
/// always resolve to the earliest candidate in that fixed sequence and the
/// result is reproducible. No return leg to the start.
pub fn construct_route(
    deliveries: &[DeliveryPoint],
    start_id: &str,
    matrix: &DistanceMatrix,
    vehicle: &Vehicle,
    goal: OptimizationGoal,
    config: &OptimizerConfig,
) -> Vec<String> {
    // Stable sort: ties keep the original input order.
    let mut remaining: Vec<&DeliveryPoint> = deliveries.iter().collect();
    remaining.sort_by_key(|p| p.priority);

    let mut route = Vec::with_capacity(deliveries.len() + 1);
    route.push(start_id.to_string());
    let mut current = start_id.to_string();

    while !remaining.is_empty() {
        let mut best_index = 0;
        let mut best_cost = f64::INFINITY;
        for (index, candidate) in remaining.iter().enumerate() {
            let cost = edge_cost(matrix.entry(&current, &candidate.id), goal, vehicle, config);
            // Strict comparison keeps the earliest candidate on ties.
            if cost < best_cost {
                best_cost = cost;
                best_index = index;
            }
        }
        let next = remaining.remove(best_index);
        current.clone_from(&next.id);
        route.push(next.id.clone());
    }

    route
}

/// First-improvement 2-opt refinement.
///
/// Each scan evaluates every candidate reversal (full route recost), accepts
/// the first strictly improving one in (i, j) order and restarts; stops when
/// a full scan finds none. Candidates within a scan are costed in parallel,
/// but the accepted move is the lexicographically first improving pair, so
/// the outcome matches the sequential policy exactly.
pub fn two_opt(
    mut route: Vec<String>,
    matrix: &DistanceMatrix,
    vehicle: &Vehicle,
    goal: OptimizationGoal,
    config: &OptimizerConfig,
) -> Vec<String> {
    let n = route.len();
    if n < 4 {
        return route;
    }

    // Index 0 (the start) is fixed; reversals cover positions i..j-1.
    let candidates: Vec<(usize, usize)> = (1..n - 2)
        .flat_map(|i| (i + 2..n).map(move |j| (i, j)))
        .collect();

    let mut best_cost = route_cost(&route, matrix, vehicle, goal, config);
    loop {
        let improving = candidates
            .par_iter()
            .filter_map(|&(i, j)| {
                let mut candidate = route.clone();
                candidate[i..j].reverse();
                let cost = route_cost(&candidate, matrix, vehicle, goal, config);
                (cost < best_cost).then_some(((i, j), cost))
            })
            .min_by_key(|&(pair, _)| pair);

        let Some(((i, j), cost)) = improving else {
            break;
        };
        route[i..j].reverse();
        best_cost = cost;
    }

    route
}

fn build_segments(route: &[String], matrix: &DistanceMatrix) -> Vec<RouteSegment> {
    route
        .windows(2)
        .map(|leg| RouteSegment {
            from_point: leg[0].clone(),
            to_point: leg[1].clone(),
            entry: *matrix.entry(&leg[0], &leg[1]),
        })
        .collect()
}

fn check_coordinates(point: &DeliveryPoint) -> Result<(), InputError> {
    if !(-90.0..=90.0).contains(&point.lat) || !(-180.0..=180.0).contains(&point.lon) {
        return Err(InputError::CoordinateOutOfRange {
            id: point.id.clone(),
            lat: point.lat,
            lon: point.lon,
        });
    }
    Ok(())
}

fn check_priority(point: &DeliveryPoint) -> Result<(), InputError> {
    if !(1..=5).contains(&point.priority) {
        return Err(InputError::PriorityOutOfRange {
            id: point.id.clone(),
            priority: point.priority,
        });
    }
    Ok(())
}

fn validate(
    deliveries: &[DeliveryPoint],
    vehicle: &Vehicle,
    start: &DeliveryPoint,
) -> Result<(), InputError> {
    if deliveries.len() < 2 {
        return Err(InputError::TooFewDeliveries(deliveries.len()));
    }

    check_coordinates(start)?;
    check_priority(start)?;
    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(start.id.as_str());
    for point in deliveries {
        check_coordinates(point)?;
        check_priority(point)?;
        if !seen.insert(point.id.as_str()) {
            return Err(InputError::DuplicateId(point.id.clone()));
        }
    }

    if vehicle.fuel_efficiency <= 0.0 {
        return Err(InputError::NonPositiveFuelEfficiency(vehicle.fuel_efficiency));
    }
    Ok(())
}

/// Compute an optimized delivery route.
///
/// Validates input, checks capacity, acquires a matrix (the supplied one if
/// any, otherwise from `provider`), constructs and refines the tour, and
/// assembles the result. Atomic: any failure yields an error, never a
/// partial route.
pub fn optimize<M: DistanceMatrixProvider>(
    deliveries: &[DeliveryPoint],
    vehicle: &Vehicle,
    start: &DeliveryPoint,
    external_matrix: Option<DistanceMatrix>,
    goal: OptimizationGoal,
    consider_traffic: bool,
    provider: &M,
    config: &OptimizerConfig,
) -> Result<OptimizedRoute, OptimizeError> {
    validate(deliveries, vehicle, start)?;
    capacity::check(deliveries, vehicle, config)?;

    let matrix = match external_matrix {
        Some(matrix) => matrix,
        None => {
            let mut all_points = Vec::with_capacity(deliveries.len() + 1);
            all_points.push(start.clone());
            all_points.extend_from_slice(deliveries);
            provider.matrix_for(&all_points, consider_traffic)
        }
    };

    let initial = construct_route(deliveries, &start.id, &matrix, vehicle, goal, config);
    let initial_cost = route_cost(&initial, &matrix, vehicle, goal, config);
    let route = two_opt(initial, &matrix, vehicle, goal, config);
    let refined_cost = route_cost(&route, &matrix, vehicle, goal, config);
    debug!(
        stops = deliveries.len(),
        goal = ?goal,
        initial_cost,
        refined_cost,
        "route refined"
    );

    let segments = build_segments(&route, &matrix);
    let total_distance_km: f64 = segments.iter().map(|s| s.entry.distance_km).sum();
    let total_time_minutes: f64 = segments
        .iter()
        .map(|s| s.entry.duration_minutes + s.entry.traffic_delay_minutes)
        .sum();
    let estimated_fuel_cost =
        total_distance_km / vehicle.fuel_efficiency * config.fuel_price_per_unit;
    let optimization_score = score::evaluate(&route, &matrix, vehicle, deliveries, config);

    Ok(OptimizedRoute {
        route_order: route,
        segments,
        total_distance_km,
        total_time_minutes,
        estimated_fuel_cost,
        optimization_score,
    })
}
