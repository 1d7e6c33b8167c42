//! Time-of-day traffic model.
//!
//! Converts a nominal travel time into a traffic-adjusted one using coarse
//! hour-of-day buckets. The reference time defaults to "now" in local time;
//! tests inject a fixed time.

use chrono::{Local, NaiveTime, Timelike};

/// Duration multipliers per congestion bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficMultipliers {
    /// 08:00-10:00 and 17:00-19:00.
    pub peak: f64,
    /// 10:00-17:00.
    pub moderate: f64,
    /// All other hours.
    pub low: f64,
}

impl Default for TrafficMultipliers {
    fn default() -> Self {
        Self {
            peak: 1.8,
            moderate: 1.3,
            low: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrafficModel {
    pub multipliers: TrafficMultipliers,
    /// Reference time-of-day; `None` means the local time at lookup.
    pub reference_time: Option<NaiveTime>,
}

impl TrafficModel {
    pub fn new(multipliers: TrafficMultipliers) -> Self {
        Self {
            multipliers,
            reference_time: None,
        }
    }

    /// Pin the model to a fixed time-of-day, for reproducible estimates.
    pub fn at(mut self, time: NaiveTime) -> Self {
        self.reference_time = Some(time);
        self
    }

    pub fn multiplier(&self) -> f64 {
        let hour = self
            .reference_time
            .unwrap_or_else(|| Local::now().time())
            .hour();
        self.multiplier_for_hour(hour)
    }

    pub fn multiplier_for_hour(&self, hour: u32) -> f64 {
        match hour {
            8..=9 | 17..=18 => self.multipliers.peak,
            10..=16 => self.multipliers.moderate,
            _ => self.multipliers.low,
        }
    }

    /// Nominal travel time in minutes at the given base speed.
    pub fn nominal_minutes(distance_km: f64, speed_kmh: f64) -> f64 {
        distance_km / speed_kmh * 60.0
    }

    /// Travel time in minutes, scaled by the current bucket's multiplier
    /// when traffic is considered.
    pub fn estimate_minutes(&self, distance_km: f64, speed_kmh: f64, consider_traffic: bool) -> f64 {
        let nominal = Self::nominal_minutes(distance_km, speed_kmh);
        if consider_traffic {
            nominal * self.multiplier()
        } else {
            nominal
        }
    }
}
