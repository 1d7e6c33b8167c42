//! routegenie-core delivery route optimizer
//!
//! Orders a single vehicle's deliveries from a start location, given a
//! pairwise distance/time matrix and an optimization goal. The matrix is
//! fetched from a live distance service when one is configured and degrades
//! to a deterministic Haversine + traffic-model estimate otherwise.

pub mod capacity;
pub mod config;
pub mod error;
pub mod gmaps;
pub mod haversine;
pub mod matrix;
pub mod models;
pub mod score;
pub mod solver;
pub mod traffic;
