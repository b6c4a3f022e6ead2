//! Telemetry record shape and its JSON wire encoding.
//!
//! Field names on the wire mix snake_case and camelCase (`vertical_speed`
//! next to `flightTime`); consumers already depend on the exact casing, so it
//! is pinned with per-field renames rather than a blanket rename rule.
use serde::{Deserialize, Serialize};

use crate::DSResult;

/// Battery percentage at or below which a drone reports [`DroneStatus::Landed`].
pub const LOW_BATTERY_PCT: f64 = 10.0;

/// Geographic position, degrees for lat/lng and meters for altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
    pub altitude: f64,
}

/// Reported flight state. Derived from battery level only: the flight model
/// keeps the drone moving even after it reports `Landed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DroneStatus {
    Flying,
    Landed,
}

impl DroneStatus {
    /// `Flying` iff the battery is strictly above [`LOW_BATTERY_PCT`].
    pub fn from_battery(battery_pct: f64) -> Self {
        if battery_pct > LOW_BATTERY_PCT {
            DroneStatus::Flying
        } else {
            DroneStatus::Landed
        }
    }
}

/// One telemetry sample. Constructed fresh every tick, serialized, and
/// dropped; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub id: String,
    pub location: Position,
    /// Horizontal speed, m/s.
    pub speed: f64,
    /// Climb rate, m/s.
    pub vertical_speed: f64,
    /// Remaining charge, percent in `[0, 100]`.
    pub battery: f64,
    /// Link strength, nominal 90.
    pub signal: f64,
    /// Degrees in `[0, 360)`.
    pub heading: f64,
    pub status: DroneStatus,
    /// Seconds since the simulation started.
    #[serde(rename = "flightTime")]
    pub flight_time: f64,
    /// Wall-clock milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(rename = "gpsSatellites")]
    pub gps_satellites: u32,
}

impl TelemetryRecord {
    pub fn with_drone_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn to_bytes(&self) -> DSResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> DSResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
