//! Simulated drone flight model used to generate a stream of telemetry
//! records.
//!
//! The model is closed-form: every field except the jittered ones is a pure
//! function of elapsed time, so consecutive ticks need no shared state and
//! several drones can run independently in one process.
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tracing::debug;

use crate::{
    coord::{Heading, Point2d},
    telemetry::{DroneStatus, Position, TelemetryRecord},
};

//  _____
// |_   _|   _ _ __   ___  ___
//   | || | | | '_ \ / _ \/ __|
//   | || |_| | |_) |  __/\__ \
//   |_| \__, | .__/ \___||___/
//       |___/|_|

/// Orbit radius in degrees, roughly 100 m at mid-latitudes.
pub const ORBIT_RADIUS_DEG: f64 = 0.001;
/// Angular speed around the orbit, rad/s.
pub const ANGULAR_SPEED_RAD_S: f64 = 0.1;
/// Mean altitude, meters.
pub const CRUISE_ALTITUDE_M: f64 = 50.0;
/// Peak deviation of the altitude oscillation, meters.
pub const ALTITUDE_SWING_M: f64 = 5.0;
/// Angular rate of the altitude oscillation, rad/s.
pub const ALTITUDE_RATE_RAD_S: f64 = 0.5;
/// Seconds to drain one percent of battery.
pub const BATTERY_DRAIN_SECS_PER_PCT: f64 = 30.0;
/// Nominal horizontal speed, m/s, jittered by +/- [`SPEED_JITTER_MPS`].
pub const NOMINAL_SPEED_MPS: f64 = 15.0;
pub const SPEED_JITTER_MPS: f64 = 1.0;
/// Nominal signal strength, jittered by +/- [`SIGNAL_JITTER`].
pub const NOMINAL_SIGNAL: f64 = 90.0;
pub const SIGNAL_JITTER: f64 = 5.0;
/// Fixed satellite count reported for a healthy GPS fix.
pub const GPS_SATELLITES: u32 = 12;

/// Source of the uniform random perturbation applied to speed and signal.
///
/// Kept behind a trait so tests can substitute a fixed source and assert the
/// deterministic fields exactly.
pub trait JitterSource {
    /// Uniform sample in `[-amplitude, amplitude]`.
    fn sample(&mut self, amplitude: f64) -> f64;
}

/// Default jitter source backed by the thread-local RNG.
#[derive(Debug, Default)]
pub struct ThreadRngJitter;

impl JitterSource for ThreadRngJitter {
    fn sample(&mut self, amplitude: f64) -> f64 {
        rand::thread_rng().gen_range(-amplitude..=amplitude)
    }
}

//  ____  _                 _        __  __           _      _
// / ___|(_)_ __ ___  _ __ | | ___  |  \/  | ___   __| | ___| |
// \___ \| | '_ ` _ \| '_ \| |/ _ \ | |\/| |/ _ \ / _` |/ _ \ |
//  ___) | | | | | | | |_) | |  __/ | |  | | (_) | (_| |  __/ |
// |____/|_|_| |_| |_| .__/|_|\___| |_|  |_|\___/ \__,_|\___|_|
//                   |_|

/// Super simple drone motion model: a circular path around a base point with
/// a sinusoidal altitude profile and a linear battery drain. Not realistic.
pub struct CircularOrbit<J = ThreadRngJitter> {
    base: Point2d,
    jitter: J,
}

impl CircularOrbit<ThreadRngJitter> {
    pub fn new(base: Point2d) -> Self {
        Self::with_jitter(base, ThreadRngJitter)
    }
}

impl<J> CircularOrbit<J>
where
    J: JitterSource,
{
    pub fn with_jitter(base: Point2d, jitter: J) -> Self {
        Self { base, jitter }
    }

    /// Sample the model at `elapsed` time since simulation start.
    ///
    /// The record id is left empty; callers attach it with
    /// [`TelemetryRecord::with_drone_id`]. Battery exhaustion only flips the
    /// reported status: the orbit and the altitude oscillation carry on after
    /// the drone reads as landed.
    pub fn sample(&mut self, elapsed: Duration) -> TelemetryRecord {
        let t = elapsed.as_secs_f64();
        let theta = ANGULAR_SPEED_RAD_S * t;

        let lat = self.base.0 + ORBIT_RADIUS_DEG * theta.sin();
        let lng = self.base.1 + ORBIT_RADIUS_DEG * theta.cos();

        let altitude = CRUISE_ALTITUDE_M + ALTITUDE_SWING_M * (ALTITUDE_RATE_RAD_S * t).sin();
        // Closed-form derivative of the altitude curve. A finite difference
        // between ticks would amplify sampling noise.
        let vertical_speed =
            ALTITUDE_SWING_M * ALTITUDE_RATE_RAD_S * (ALTITUDE_RATE_RAD_S * t).cos();

        let battery = (100.0 - t / BATTERY_DRAIN_SECS_PER_PCT).max(0.0);
        let heading = Heading::from_radians(theta);
        debug!(
            "t={:.1}s theta={:.3}rad battery={:.1}% alt={:.1}m",
            t, theta, battery, altitude
        );

        TelemetryRecord {
            id: String::new(),
            location: Position { lat, lng, altitude },
            speed: NOMINAL_SPEED_MPS + self.jitter.sample(SPEED_JITTER_MPS),
            vertical_speed,
            battery,
            signal: NOMINAL_SIGNAL + self.jitter.sample(SIGNAL_JITTER),
            heading: heading.degrees(),
            status: DroneStatus::from_battery(battery),
            flight_time: t,
            timestamp: Utc::now().timestamp_millis(),
            gps_satellites: GPS_SATELLITES,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lazy_init_tracing;

    const BASE: Point2d = Point2d(37.7749, -122.4194);

    /// Fixed source so every non-jittered field can be asserted exactly.
    struct NoJitter;

    impl JitterSource for NoJitter {
        fn sample(&mut self, _amplitude: f64) -> f64 {
            0.0
        }
    }

    fn quiet_orbit() -> CircularOrbit<NoJitter> {
        CircularOrbit::with_jitter(BASE, NoJitter)
    }

    fn sample_at(secs: u64) -> TelemetryRecord {
        quiet_orbit().sample(Duration::from_secs(secs))
    }

    #[test]
    fn test_first_sample() {
        lazy_init_tracing();
        let rec = sample_at(0);
        // sin(0) = 0, cos(0) = 1: start is due east of the base point.
        assert_eq!(rec.location.lat, BASE.0);
        assert_eq!(rec.location.lng, BASE.1 + ORBIT_RADIUS_DEG);
        assert_eq!(rec.location.altitude, 50.0);
        assert_eq!(rec.vertical_speed, 2.5);
        assert_eq!(rec.battery, 100.0);
        assert_eq!(rec.heading, 0.0);
        assert_eq!(rec.status, DroneStatus::Flying);
        assert_eq!(rec.flight_time, 0.0);
        assert_eq!(rec.speed, NOMINAL_SPEED_MPS);
        assert_eq!(rec.signal, NOMINAL_SIGNAL);
        assert_eq!(rec.gps_satellites, 12);
        assert!(rec.timestamp > 0);
    }

    #[test]
    fn test_battery_drain() {
        lazy_init_tracing();
        assert_eq!(sample_at(30).battery, 99.0);
        // 1% per 30s puts the 10% threshold at 2700s; the boundary itself
        // already reads as landed.
        let at_threshold = sample_at(2700);
        assert_eq!(at_threshold.battery, 10.0);
        assert_eq!(at_threshold.status, DroneStatus::Landed);
        let just_before = sample_at(2699);
        assert!(just_before.battery > 10.0);
        assert_eq!(just_before.status, DroneStatus::Flying);
        // Clamped at zero after three drain periods, never negative.
        let exhausted = sample_at(8100);
        assert_eq!(exhausted.battery, 0.0);
        assert_eq!(exhausted.status, DroneStatus::Landed);

        let mut prev = f64::INFINITY;
        for t in (0..9000).step_by(60) {
            let battery = sample_at(t as u64).battery;
            assert!(battery <= prev, "battery rose at t={t}");
            assert!(battery >= 0.0);
            prev = battery;
        }
    }

    #[test]
    fn test_altitude_and_vertical_speed() {
        lazy_init_tracing();
        for t in 0..300 {
            let rec = sample_at(t);
            assert!((45.0..=55.0).contains(&rec.location.altitude));
            let expected = 2.5 * (0.5 * t as f64).cos();
            assert!(
                (rec.vertical_speed - expected).abs() < 1e-9,
                "vertical speed off analytic derivative at t={t}"
            );
        }
    }

    #[test]
    fn test_heading_normalized() {
        lazy_init_tracing();
        // One orbit takes 2*pi/0.1 ~ 63s; sweep several orbits.
        for t in 0..300 {
            let heading = sample_at(t).heading;
            assert!((0.0..360.0).contains(&heading), "heading {heading} at t={t}");
        }
    }

    #[test]
    fn test_landed_drone_keeps_orbiting() {
        lazy_init_tracing();
        let a = sample_at(9000);
        let b = sample_at(9010);
        assert_eq!(a.status, DroneStatus::Landed);
        assert_eq!(b.status, DroneStatus::Landed);
        assert!(a.location.lat != b.location.lat || a.location.lng != b.location.lng);
    }

    #[test]
    fn test_five_ticks_trace_circle() {
        lazy_init_tracing();
        let mut orbit = quiet_orbit();
        let mut prev_battery = f64::INFINITY;
        for t in 0..5u64 {
            let rec = orbit.sample(Duration::from_secs(t));
            let dlat = rec.location.lat - BASE.0;
            let dlng = rec.location.lng - BASE.1;
            let dist = (dlat * dlat + dlng * dlng).sqrt();
            assert!(
                (dist - ORBIT_RADIUS_DEG).abs() < 1e-12,
                "off-circle at t={t}: {dist}"
            );
            assert!(rec.battery < prev_battery);
            prev_battery = rec.battery;
        }
    }

    #[test]
    fn test_jitter_bounds() {
        lazy_init_tracing();
        let mut orbit = CircularOrbit::new(BASE);
        for t in 0..100 {
            let rec = orbit.sample(Duration::from_secs(t));
            assert!((14.0..=16.0).contains(&rec.speed));
            assert!((85.0..=95.0).contains(&rec.signal));
        }
    }
}
