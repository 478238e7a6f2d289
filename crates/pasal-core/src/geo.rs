//! # Geo Module
//!
//! Coordinates and great-circle distance.
//!
//! ## Haversine
//! ```text
//! a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)
//! c = 2·atan2(√a, √(1−a))
//! d = R·c            R = 6371 km (mean Earth radius)
//! ```
//!
//! The storefront only ever measures store → customer inside one district,
//! so the spherical-Earth error (≤0.5%) never moves a result across a fee band
//! in practice.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// A latitude/longitude pair in decimal degrees.
///
/// Wire format is `{ "lat": .., "lng": .. }`, the shape the storefront's
/// location tracker posts; `latitude`/`longitude` are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coordinate {
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    #[serde(rename = "lng", alias = "longitude")]
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a validated coordinate.
    ///
    /// ## Example
    /// ```rust
    /// use pasal_core::geo::Coordinate;
    ///
    /// assert!(Coordinate::new(27.8742, 83.4534).is_ok());
    /// assert!(Coordinate::new(91.0, 0.0).is_err());
    /// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> CoreResult<Self> {
        let coordinate = Coordinate {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Checks range and finiteness.
    ///
    /// Deserialized coordinates skip [`Coordinate::new`], so anything read
    /// off the wire must go through this before use.
    pub fn validate(&self) -> CoreResult<()> {
        check_axis("latitude", self.latitude, MAX_LATITUDE)?;
        check_axis("longitude", self.longitude, MAX_LONGITUDE)
    }

    /// Great-circle distance to `other` in kilometers, full precision.
    ///
    /// Callers must have validated both coordinates.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let half_lat = (d_lat / 2.0).sin();
        let half_lon = (d_lon / 2.0).sin();
        let a = half_lat * half_lat + lat1.cos() * lat2.cos() * half_lon * half_lon;
        // a can creep past 1.0 by an ulp for antipodal points
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

fn check_axis(field: &'static str, value: f64, limit: f64) -> CoreResult<()> {
    if !value.is_finite() || value.abs() > limit {
        return Err(CoreError::InvalidCoordinate {
            field,
            value,
            limit,
        });
    }
    Ok(())
}

/// Rounds a distance to 2 decimal places for display.
pub fn round_distance(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================
