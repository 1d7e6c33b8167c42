//! HTTP adapter for a Google-style Distance Matrix service.
//!
//! One batched all-pairs lookup per request. Any total failure (missing
//! key, network error, non-success status) is returned as an error so the
//! caller can fall back; individual unusable cells are zero-filled with
//! `low_confidence` set rather than failing the whole batch.

use serde::Deserialize;
use thiserror::Error;

use crate::models::{DeliveryPoint, DistanceMatrix, MatrixEntry};

#[derive(Debug, Clone)]
pub struct GmapsConfig {
    /// API key; `None` disables the live path entirely.
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GmapsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://maps.googleapis.com/maps/api".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Why a live matrix lookup could not be used.
#[derive(Debug, Error)]
pub enum MatrixFetchError {
    #[error("no API key configured")]
    NotConfigured,
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned status {0}")]
    BadStatus(String),
    #[error("response rows do not match requested points")]
    IncompleteResponse,
}

#[derive(Debug, Clone)]
pub struct DistanceApiClient {
    config: GmapsConfig,
    client: reqwest::blocking::Client,
}

impl DistanceApiClient {
    pub fn new(config: GmapsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// One batched lookup over every ordered pair of `points`.
    pub fn try_matrix_for(
        &self,
        points: &[DeliveryPoint],
        consider_traffic: bool,
    ) -> Result<DistanceMatrix, MatrixFetchError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(MatrixFetchError::NotConfigured)?;

        let coords = points
            .iter()
            .map(|p| format!("{:.6},{:.6}", p.lat, p.lon))
            .collect::<Vec<_>>()
            .join("|");

        let mut params = vec![
            ("origins", coords.clone()),
            ("destinations", coords),
            ("key", key.to_string()),
            ("units", "metric".to_string()),
            ("mode", "driving".to_string()),
        ];
        if consider_traffic {
            params.push(("departure_time", "now".to_string()));
            params.push(("traffic_model", "best_guess".to_string()));
        }

        let url = format!("{}/distancematrix/json", self.config.base_url);
        let body = self
            .client
            .get(url)
            .query(&params)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<TableResponse>())?;

        let ids: Vec<&str> = points.iter().map(|p| p.id.as_str()).collect();
        matrix_from_response(&body, &ids)
    }
}

fn matrix_from_response(
    body: &TableResponse,
    ids: &[&str],
) -> Result<DistanceMatrix, MatrixFetchError> {
    if body.status != "OK" {
        return Err(MatrixFetchError::BadStatus(body.status.clone()));
    }
    if body.rows.len() != ids.len() {
        return Err(MatrixFetchError::IncompleteResponse);
    }

    let mut matrix = DistanceMatrix::new();
    for (i, row) in body.rows.iter().enumerate() {
        if row.elements.len() != ids.len() {
            return Err(MatrixFetchError::IncompleteResponse);
        }
        for (j, element) in row.elements.iter().enumerate() {
            if i == j {
                matrix.insert(ids[i], ids[j], MatrixEntry::ZERO);
            } else {
                matrix.insert(ids[i], ids[j], element.to_entry());
            }
        }
    }
    Ok(matrix)
}

#[derive(Debug, Deserialize)]
struct TableResponse {
    status: String,
    #[serde(default)]
    rows: Vec<TableRow>,
}

#[derive(Debug, Deserialize)]
struct TableRow {
    elements: Vec<TableElement>,
}

#[derive(Debug, Deserialize)]
struct TableElement {
    status: String,
    distance: Option<ValueField>,
    duration: Option<ValueField>,
    duration_in_traffic: Option<ValueField>,
}

#[derive(Debug, Deserialize)]
struct ValueField {
    /// Meters for distances, seconds for durations.
    value: f64,
}

impl TableElement {
    fn to_entry(&self) -> MatrixEntry {
        // Unusable cells become zero-cost edges marked low-confidence.
        let (Some(distance), Some(duration)) = (&self.distance, &self.duration) else {
            return degraded();
        };
        if self.status != "OK" {
            return degraded();
        }

        let duration_minutes = duration.value / 60.0;
        let in_traffic_minutes = self
            .duration_in_traffic
            .as_ref()
            .map_or(duration_minutes, |d| d.value / 60.0);
        MatrixEntry {
            distance_km: distance.value / 1000.0,
            duration_minutes,
            traffic_delay_minutes: (in_traffic_minutes - duration_minutes).max(0.0),
            low_confidence: false,
        }
    }
}

fn degraded() -> MatrixEntry {
    MatrixEntry {
        low_confidence: true,
        ..MatrixEntry::ZERO
    }
}
