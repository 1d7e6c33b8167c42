//! Error taxonomy for the optimization core.
//!
//! Only two conditions are reportable to callers: malformed input and an
//! infeasible load. Upstream distance-service degradation is absorbed by the
//! fallback matrix provider and logged, never surfaced here.

use thiserror::Error;

/// A specific input constraint violated by the request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("at least 2 delivery points are required, got {0}")]
    TooFewDeliveries(usize),
    #[error("point '{id}' has out-of-range coordinates ({lat}, {lon})")]
    CoordinateOutOfRange { id: String, lat: f64, lon: f64 },
    #[error("point '{id}' has priority {priority}, expected 1..=5")]
    PriorityOutOfRange { id: String, priority: u8 },
    #[error("duplicate point id '{0}'")]
    DuplicateId(String),
    #[error("fuel efficiency must be positive, got {0}")]
    NonPositiveFuelEfficiency(f64),
}

/// Failure modes of a single `optimize` call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    /// Rejected before any computation; carries the violated constraint.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    /// The aggregate load does not fit the vehicle's capacity class.
    #[error("vehicle capacity exceeded: needed {needed} units, available {available}")]
    CapacityExceeded { needed: f64, available: f64 },
}
