//! Coordinate types and utilities.
use crate::{DSResult, Error};

//  _____
// |_   _|   _ _ __   ___  ___
//   | || | | | '_ \ / _ \/ __|
//   | || |_| | |_) |  __/\__ \
//   |_| \__, | .__/ \___||___/
//       |___/|_|

/// Latitude / longitude pair in WGS 84 degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point2d(pub f64, pub f64);

impl Point2d {
    pub fn new(lat: f64, lon: f64) -> DSResult<Self> {
        Self::validate_lat(lat)?;
        Self::validate_lon(lon)?;
        Ok(Self(lat, lon))
    }

    fn validate_lat(lat: f64) -> DSResult<()> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidCoord(format!("latitude {lat}")));
        }
        Ok(())
    }

    fn validate_lon(lon: f64) -> DSResult<()> {
        if !(-180.0..=180.0).contains(&lon) {
            return Err(Error::InvalidCoord(format!("longitude {lon}")));
        }
        Ok(())
    }
}

/// Compass heading in degrees, kept normalized to `[0, 360)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Heading(f64);

impl Heading {
    /// Build from an unnormalized angle in degrees; any number of full turns
    /// in either direction folds back into `[0, 360)`.
    pub fn from_degrees(deg: f64) -> Self {
        Self(deg.rem_euclid(360.0))
    }

    pub fn from_radians(rad: f64) -> Self {
        Self::from_degrees(rad.to_degrees())
    }

    pub fn degrees(&self) -> f64 {
        self.0
    }
}

impl From<Heading> for f64 {
    fn from(h: Heading) -> f64 {
        h.0
    }
}
