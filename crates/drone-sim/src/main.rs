//! Drone telemetry simulator CLI.
use clap::Parser;
use drone_sim::{
    coord::Point2d,
    model::CircularOrbit,
    publish::{self, MqttPublisher},
    DSResult,
};
use tracing::{error, info};

/// Base of the simulated orbit (San Francisco).
const BASE_LAT: f64 = 37.7749;
const BASE_LNG: f64 = -122.4194;

/// Publish synthetic telemetry for one simulated drone over MQTT.
#[derive(Debug, Parser)]
#[command(name = "drone-sim", version)]
struct Args {
    /// Drone identifier
    #[arg(long, default_value = "drone-sim-001")]
    id: String,

    /// MQTT broker host
    #[arg(long, default_value = "localhost")]
    broker: String,

    /// MQTT broker port
    #[arg(long, default_value_t = 1883)]
    port: u16,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    if let Err(err) = run(args).await {
        error!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> DSResult<()> {
    let base = Point2d::new(BASE_LAT, BASE_LNG)?;

    info!("Connecting to {}:{}...", args.broker, args.port);
    let publisher = MqttPublisher::connect(&args.broker, args.port, &args.id).await?;
    info!("Connected!");

    let mut orbit = CircularOrbit::new(base);
    publish::run(&publisher, &mut orbit, &args.id).await
}
