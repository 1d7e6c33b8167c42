//! Behavior tests for the optimize pipeline.
//!
//! Covers input rejection, capacity aborts, route shape, external matrix
//! pass-through, determinism, and per-goal cost functions.

mod fixtures;

use std::collections::HashSet;

use fixtures::{midday_source, point, van};
use routegenie_core::config::OptimizerConfig;
use routegenie_core::error::{InputError, OptimizeError};
use routegenie_core::matrix::DistanceMatrixProvider;
use routegenie_core::models::{
    DeliveryPoint, DistanceMatrix, MatrixEntry, OptimizationGoal, PackageSize,
};
use routegenie_core::solver::optimize;

/// Provider that must never be consulted.
struct NoProvider;

impl DistanceMatrixProvider for NoProvider {
    fn matrix_for(&self, _points: &[DeliveryPoint], _consider_traffic: bool) -> DistanceMatrix {
        panic!("provider consulted despite an external matrix");
    }
}

fn scattered_deliveries() -> Vec<DeliveryPoint> {
    vec![
        point("a").at(19.01, 72.84).priority(2).build(),
        point("b").at(19.08, 72.88).priority(1).build(),
        point("c").at(18.95, 72.82).priority(4).build(),
        point("d").at(19.11, 72.85).priority(3).build(),
        point("e").at(19.05, 72.90).priority(2).build(),
    ]
}

fn run(
    deliveries: &[DeliveryPoint],
    goal: OptimizationGoal,
) -> Result<routegenie_core::models::OptimizedRoute, OptimizeError> {
    let start = point("depot").at(19.0, 72.85).build();
    optimize(
        deliveries,
        &van(),
        &start,
        None,
        goal,
        true,
        &midday_source(),
        &OptimizerConfig::default(),
    )
}

#[test]
fn route_is_start_plus_permutation_of_deliveries() {
    let deliveries = scattered_deliveries();
    for goal in [
        OptimizationGoal::Distance,
        OptimizationGoal::Time,
        OptimizationGoal::Fuel,
    ] {
        let result = run(&deliveries, goal).expect("feasible request");
        assert_eq!(result.route_order.len(), deliveries.len() + 1);
        assert_eq!(result.route_order[0], "depot");
        assert_eq!(result.segments.len(), deliveries.len());

        let routed: HashSet<&str> = result.route_order[1..]
            .iter()
            .map(String::as_str)
            .collect();
        let expected: HashSet<&str> = deliveries.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(routed, expected);
    }
}

#[test]
fn repeated_runs_are_identical() {
    let deliveries = scattered_deliveries();
    let first = run(&deliveries, OptimizationGoal::Time).unwrap();
    let second = run(&deliveries, OptimizationGoal::Time).unwrap();
    assert_eq!(first, second);
}

#[test]
fn too_few_deliveries_rejected() {
    let deliveries = vec![point("only").at(19.0, 72.8).build()];
    let err = run(&deliveries, OptimizationGoal::Time).unwrap_err();
    assert_eq!(
        err,
        OptimizeError::InvalidInput(InputError::TooFewDeliveries(1))
    );
}

#[test]
fn out_of_range_coordinates_rejected() {
    let deliveries = vec![
        point("a").at(19.0, 181.0).build(),
        point("b").at(19.0, 72.8).build(),
    ];
    let err = run(&deliveries, OptimizationGoal::Time).unwrap_err();
    assert!(matches!(
        err,
        OptimizeError::InvalidInput(InputError::CoordinateOutOfRange { .. })
    ));
}

#[test]
fn duplicate_ids_rejected() {
    let deliveries = vec![
        point("a").at(19.0, 72.8).build(),
        point("a").at(19.1, 72.9).build(),
    ];
    let err = run(&deliveries, OptimizationGoal::Time).unwrap_err();
    assert_eq!(
        err,
        OptimizeError::InvalidInput(InputError::DuplicateId("a".to_string()))
    );
}

#[test]
fn non_positive_fuel_efficiency_rejected() {
    let mut vehicle = van();
    vehicle.fuel_efficiency = -1.0;
    let start = point("depot").at(19.0, 72.85).build();
    let deliveries = vec![
        point("a").at(19.01, 72.84).build(),
        point("b").at(19.02, 72.86).build(),
    ];
    let err = optimize(
        &deliveries,
        &vehicle,
        &start,
        None,
        OptimizationGoal::Fuel,
        true,
        &midday_source(),
        &OptimizerConfig::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        OptimizeError::InvalidInput(InputError::NonPositiveFuelEfficiency(-1.0))
    );
}

#[test]
fn over_capacity_aborts_before_routing() {
    // Nine small packages against the van's medium limit of 8.
    let deliveries: Vec<DeliveryPoint> = (0..9)
        .map(|i| {
            point(&format!("p{i}"))
                .at(19.0 + f64::from(i) * 0.01, 72.8)
                .build()
        })
        .collect();
    let err = run(&deliveries, OptimizationGoal::Time).unwrap_err();
    assert_eq!(
        err,
        OptimizeError::CapacityExceeded {
            needed: 9.0,
            available: 8.0
        }
    );
}

#[test]
fn load_exactly_at_capacity_is_feasible() {
    // Four large packages at 2.0 units each sum to exactly the van's
    // medium limit of 8.
    let deliveries: Vec<DeliveryPoint> = (0..4)
        .map(|i| {
            point(&format!("p{i}"))
                .at(19.0 + f64::from(i) * 0.01, 72.8)
                .size(PackageSize::Large)
                .build()
        })
        .collect();
    assert!(run(&deliveries, OptimizationGoal::Time).is_ok());
}

#[test]
fn external_matrix_bypasses_the_provider() {
    let start = point("s").at(0.0, 0.0).build();
    let deliveries = vec![point("a").at(0.0, 0.01).build(), point("b").at(0.0, 0.02).build()];

    let mut matrix = DistanceMatrix::new();
    for from in ["s", "a", "b"] {
        for to in ["s", "a", "b"] {
            let entry = if from == to {
                MatrixEntry::ZERO
            } else {
                MatrixEntry {
                    distance_km: 5.0,
                    duration_minutes: 12.0,
                    traffic_delay_minutes: 3.0,
                    low_confidence: false,
                }
            };
            matrix.insert(from, to, entry);
        }
    }

    let result = optimize(
        &deliveries,
        &van(),
        &start,
        Some(matrix),
        OptimizationGoal::Time,
        true,
        &NoProvider,
        &OptimizerConfig::default(),
    )
    .expect("feasible request");

    assert_eq!(result.total_distance_km, 10.0);
    assert_eq!(result.total_time_minutes, 30.0);
}

#[test]
fn goal_selects_different_routes_when_costs_disagree() {
    // a is nearer in distance but badly congested; b is farther but clear.
    let start = point("s").at(0.0, 0.0).build();
    let deliveries = vec![point("a").at(0.0, 0.01).build(), point("b").at(0.0, 0.02).build()];

    let mut matrix = DistanceMatrix::new();
    let cells = [
        ("s", "a", 1.0, 3.0, 60.0),
        ("a", "s", 1.0, 3.0, 60.0),
        ("s", "b", 2.0, 6.0, 0.0),
        ("b", "s", 2.0, 6.0, 0.0),
        ("a", "b", 3.0, 9.0, 60.0),
        ("b", "a", 3.0, 9.0, 60.0),
    ];
    for (from, to, km, minutes, delay) in cells {
        matrix.insert(from, to, MatrixEntry {
            distance_km: km,
            duration_minutes: minutes,
            traffic_delay_minutes: delay,
            low_confidence: false,
        });
    }
    for id in ["s", "a", "b"] {
        matrix.insert(id, id, MatrixEntry::ZERO);
    }

    let config = OptimizerConfig::default();
    let by_distance = optimize(
        &deliveries,
        &van(),
        &start,
        Some(matrix.clone()),
        OptimizationGoal::Distance,
        true,
        &NoProvider,
        &config,
    )
    .unwrap();
    let by_time = optimize(
        &deliveries,
        &van(),
        &start,
        Some(matrix),
        OptimizationGoal::Time,
        true,
        &NoProvider,
        &config,
    )
    .unwrap();

    assert_eq!(by_distance.route_order, vec!["s", "a", "b"]);
    assert_eq!(by_time.route_order, vec!["s", "b", "a"]);
}

#[test]
fn score_stays_within_bounds() {
    let deliveries = scattered_deliveries();
    for goal in [
        OptimizationGoal::Distance,
        OptimizationGoal::Time,
        OptimizationGoal::Fuel,
    ] {
        let result = run(&deliveries, goal).unwrap();
        assert!(result.optimization_score > 0.0);
        assert!(result.optimization_score <= 1.0);
    }
}
