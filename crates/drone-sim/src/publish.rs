//! MQTT transport and the fixed-cadence publish loop.
use std::time::Duration;

use rumqttc::{AsyncClient, Event, Incoming, MqttOptions, QoS};
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::{
    model::{CircularOrbit, JitterSource},
    DSResult,
};

/// Records for drone `id` are published to `drone/<id>/telemetry`.
const TOPIC_PREFIX: &str = "drone";
/// Cadence of the publish loop.
pub const PUBLISH_INTERVAL: Duration = Duration::from_secs(1);
const KEEP_ALIVE: Duration = Duration::from_secs(60);
/// rumqttc outgoing request channel capacity.
const REQUEST_CAP: usize = 10;

pub fn telemetry_topic(drone_id: &str) -> String {
    format!("{TOPIC_PREFIX}/{drone_id}/telemetry")
}

fn client_id(drone_id: &str) -> String {
    format!("sim_{drone_id}")
}

/// Thin wrapper over the MQTT client: connect, fire-and-forget publish,
/// orderly disconnect.
pub struct MqttPublisher {
    client: AsyncClient,
}

impl MqttPublisher {
    /// Connect to the broker and wait for its ConnAck before returning, so an
    /// unreachable broker fails startup instead of the first publish.
    pub async fn connect(host: &str, port: u16, drone_id: &str) -> DSResult<Self> {
        let mut options = MqttOptions::new(client_id(drone_id), host, port);
        options.set_keep_alive(KEEP_ALIVE);

        let (client, mut eventloop) = AsyncClient::new(options, REQUEST_CAP);

        loop {
            match eventloop.poll().await? {
                Event::Incoming(Incoming::ConnAck(_)) => break,
                event => debug!("startup event: {event:?}"),
            }
        }

        // The event loop has to keep turning for queued publishes to reach
        // the wire. Poll errors after a lost connection make rumqttc retry
        // the broker on the next poll.
        tokio::spawn(async move {
            loop {
                if let Err(err) = eventloop.poll().await {
                    error!("MQTT event loop error: {err}");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        });

        Ok(Self { client })
    }

    /// Queue one payload, at-most-once delivery, no retain, no ack wait.
    pub async fn publish(&self, topic: &str, payload: Vec<u8>) -> DSResult<()> {
        self.client
            .publish(topic, QoS::AtMostOnce, false, payload)
            .await?;
        Ok(())
    }

    pub async fn disconnect(&self) -> DSResult<()> {
        self.client.disconnect().await?;
        Ok(())
    }
}

/// Drive the flight model once per [`PUBLISH_INTERVAL`] and publish each
/// record until Ctrl-C, then disconnect.
///
/// Cancellation is observed at tick boundaries only; a tick in progress
/// finishes before the loop winds down.
pub async fn run<J>(
    publisher: &MqttPublisher,
    orbit: &mut CircularOrbit<J>,
    drone_id: &str,
) -> DSResult<()>
where
    J: JitterSource,
{
    let topic = telemetry_topic(drone_id);
    let started = Instant::now();
    let mut ticker = tokio::time::interval(PUBLISH_INTERVAL);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Stopping simulation...");
                break;
            }
            _ = ticker.tick() => {
                let record = orbit.sample(started.elapsed()).with_drone_id(drone_id);
                let payload = record.to_bytes()?;
                publisher.publish(&topic, payload).await?;
                info!(
                    "Published to {}: Alt={:.1}m Bat={:.1}%",
                    topic, record.location.altitude, record.battery
                );
            }
        }
    }

    publisher.disconnect().await
}
