//! Simulated drone telemetry publisher.
//!
//! The [`model`] module generates a stream of telemetry records from a
//! closed-form flight model; the [`publish`] module serializes each record to
//! JSON and pushes it to an MQTT broker on a fixed cadence.
use std::sync::Once;

use thiserror::Error;

pub mod coord;
pub mod model;
pub mod publish;
pub mod telemetry;

/// Result type for this library
pub type DSResult<T> = std::result::Result<T, Error>;

/// Error type for this library
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid coordinate: {0}")]
    InvalidCoord(String),
    #[error("MQTT client error: {0}")]
    Client(#[from] rumqttc::ClientError),
    #[error("MQTT connection error: {0}")]
    Connection(#[from] rumqttc::ConnectionError),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Test binary helper to init tracing. This is usually the responsibility of the consumer of the
/// library crate.
pub fn lazy_init_tracing() {
    {
        static INIT: Once = Once::new();
        &INIT
    }
    .call_once(|| {
        tracing_subscriber::fmt::init();
    });
}
