//! Distance/time matrix acquisition.
//!
//! `MatrixSource` prefers a live distance service and degrades to the
//! deterministic Haversine + traffic estimate on any failure. Capability
//! loss degrades quality, never availability: `matrix_for` is infallible.

use tracing::{debug, warn};

use crate::config::{OptimizerConfig, VehicleSpeeds};
use crate::gmaps::DistanceApiClient;
use crate::haversine::haversine_km;
use crate::models::{DeliveryPoint, DistanceMatrix, MatrixEntry, VehicleType};
use crate::traffic::TrafficModel;

/// Produces a complete pairwise distance/time matrix for a set of points.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, points: &[DeliveryPoint], consider_traffic: bool) -> DistanceMatrix;
}

/// Deterministic matrix synthesis from great-circle distances.
///
/// `duration_minutes` is the nominal (traffic-free) estimate at the assumed
/// speed; `traffic_delay_minutes` is the additional time the traffic model
/// predicts on top of it. Always symmetric, always succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackMatrix {
    /// Assumed travel speed in km/h.
    pub speed_kmh: f64,
    pub traffic: TrafficModel,
}

impl Default for FallbackMatrix {
    /// Assumes the van base speed, matching the behavior when no vehicle
    /// is known to the matrix layer.
    fn default() -> Self {
        Self::new(VehicleSpeeds::default().van, TrafficModel::default())
    }
}

impl FallbackMatrix {
    pub fn new(speed_kmh: f64, traffic: TrafficModel) -> Self {
        Self { speed_kmh, traffic }
    }

    /// Fallback tuned to the configured base speed of a vehicle type.
    pub fn for_vehicle(vehicle_type: VehicleType, config: &OptimizerConfig) -> Self {
        Self::new(
            config.vehicle_speeds.speed_kmh(vehicle_type),
            TrafficModel::default(),
        )
    }

    fn entry_between(
        &self,
        from: &DeliveryPoint,
        to: &DeliveryPoint,
        consider_traffic: bool,
    ) -> MatrixEntry {
        let distance_km = haversine_km(from.location(), to.location());
        let nominal = TrafficModel::nominal_minutes(distance_km, self.speed_kmh);
        let adjusted = self
            .traffic
            .estimate_minutes(distance_km, self.speed_kmh, consider_traffic);
        MatrixEntry {
            distance_km,
            duration_minutes: nominal,
            traffic_delay_minutes: adjusted - nominal,
            low_confidence: false,
        }
    }
}

impl DistanceMatrixProvider for FallbackMatrix {
    fn matrix_for(&self, points: &[DeliveryPoint], consider_traffic: bool) -> DistanceMatrix {
        let mut matrix = DistanceMatrix::new();
        for (i, from) in points.iter().enumerate() {
            matrix.insert(&from.id, &from.id, MatrixEntry::ZERO);
            // Haversine is symmetric, so each unordered pair is computed once.
            for to in points.iter().skip(i + 1) {
                let entry = self.entry_between(from, to, consider_traffic);
                matrix.insert(&from.id, &to.id, entry);
                matrix.insert(&to.id, &from.id, entry);
            }
        }
        matrix
    }
}

/// Live service with deterministic degradation.
#[derive(Debug, Clone)]
pub struct MatrixSource {
    live: Option<DistanceApiClient>,
    fallback: FallbackMatrix,
}

impl MatrixSource {
    pub fn new(live: Option<DistanceApiClient>, fallback: FallbackMatrix) -> Self {
        Self { live, fallback }
    }

    /// A source with no live client: every lookup is synthesized.
    pub fn fallback_only(fallback: FallbackMatrix) -> Self {
        Self {
            live: None,
            fallback,
        }
    }
}

impl Default for MatrixSource {
    fn default() -> Self {
        Self::fallback_only(FallbackMatrix::default())
    }
}

impl DistanceMatrixProvider for MatrixSource {
    fn matrix_for(&self, points: &[DeliveryPoint], consider_traffic: bool) -> DistanceMatrix {
        if let Some(client) = &self.live {
            match client.try_matrix_for(points, consider_traffic) {
                Ok(matrix) => {
                    debug!(points = points.len(), "distance matrix from live service");
                    return matrix;
                }
                Err(err) => {
                    warn!(error = %err, "distance service degraded, using haversine fallback");
                }
            }
        }
        self.fallback.matrix_for(points, consider_traffic)
    }
}
