//! # Delivery Module
//!
//! Maps a (store, customer) coordinate pair to a delivery fee and a
//! human-readable time estimate.
//!
//! ## Distance Bands
//! ```text
//! ┌──────────────────┬──────────┬──────────────┬──────────────┬─────────┐
//! │ distance (km)    │ fee (Rs.)│ English      │ Nepali       │ window  │
//! ├──────────────────┼──────────┼──────────────┼──────────────┼─────────┤
//! │ ≤ 5              │ 50       │ 1–2 hours    │ १-२ घण्टा     │ 2 h     │
//! │ ≤ 15             │ 100      │ 2–4 hours    │ २-४ घण्टा     │ 4 h     │
//! │ ≤ 30             │ 200      │ 4–6 hours    │ ४-६ घण्टा     │ 6 h     │
//! │ > 30             │ 300      │ 1 day        │ १ दिन         │ 24 h    │
//! └──────────────────┴──────────┴──────────────┴──────────────┴─────────┘
//! ```
//! Upper bounds are inclusive and compared against the full-precision
//! distance; only the reported distance is rounded.
//!
//! ## Manual Addresses
//! When the customer types an address instead of sharing GPS, the caller
//! passes the service-area coordinate. The estimator does not know or care.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::geo::{round_distance, Coordinate};
use crate::money::Money;

// =============================================================================
// Delivery Band
// =============================================================================

/// A distance range with a fixed fee and time estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryBand {
    /// Up to 5 km.
    Nearby,
    /// Up to 15 km.
    Local,
    /// Up to 30 km.
    District,
    /// Beyond 30 km.
    Remote,
}

impl DeliveryBand {
    /// All bands, nearest first.
    pub const ALL: [DeliveryBand; 4] = [
        DeliveryBand::Nearby,
        DeliveryBand::Local,
        DeliveryBand::District,
        DeliveryBand::Remote,
    ];

    /// Picks the band for a full-precision distance.
    ///
    /// ## Example
    /// ```rust
    /// use pasal_core::delivery::DeliveryBand;
    ///
    /// assert_eq!(DeliveryBand::for_distance(5.0), DeliveryBand::Nearby);
    /// assert_eq!(DeliveryBand::for_distance(5.01), DeliveryBand::Local);
    /// ```
    pub fn for_distance(km: f64) -> DeliveryBand {
        Self::ALL
            .into_iter()
            .find(|band| band.max_km().map_or(true, |max| km <= max))
            .unwrap_or(DeliveryBand::Remote)
    }

    /// Inclusive upper bound in km; `None` for the open-ended last band.
    pub const fn max_km(&self) -> Option<f64> {
        match self {
            DeliveryBand::Nearby => Some(5.0),
            DeliveryBand::Local => Some(15.0),
            DeliveryBand::District => Some(30.0),
            DeliveryBand::Remote => None,
        }
    }

    /// Delivery fee for this band.
    pub const fn fee(&self) -> Money {
        match self {
            DeliveryBand::Nearby => Money::from_rupees(50),
            DeliveryBand::Local => Money::from_rupees(100),
            DeliveryBand::District => Money::from_rupees(200),
            DeliveryBand::Remote => Money::from_rupees(300),
        }
    }

    /// Time estimate label in the given locale.
    pub const fn time_label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (DeliveryBand::Nearby, Locale::English) => "1–2 hours",
            (DeliveryBand::Local, Locale::English) => "2–4 hours",
            (DeliveryBand::District, Locale::English) => "4–6 hours",
            (DeliveryBand::Remote, Locale::English) => "1 day",
            (DeliveryBand::Nearby, Locale::Nepali) => "१-२ घण्टा",
            (DeliveryBand::Local, Locale::Nepali) => "२-४ घण्टा",
            (DeliveryBand::District, Locale::Nepali) => "४-६ घण्टा",
            (DeliveryBand::Remote, Locale::Nepali) => "१ दिन",
        }
    }

    /// Latest expected arrival after the order is placed.
    pub fn window(&self) -> Duration {
        match self {
            DeliveryBand::Nearby => Duration::hours(2),
            DeliveryBand::Local => Duration::hours(4),
            DeliveryBand::District => Duration::hours(6),
            DeliveryBand::Remote => Duration::hours(24),
        }
    }
}

/// Language for customer-facing labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Nepali,
}

// =============================================================================
// Delivery Estimate
// =============================================================================

/// Fee and time estimate for one location. Recomputed on every location
/// update, never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryEstimate {
    /// Distance rounded to 2 decimal places.
    pub distance_km: f64,
    pub fee: Money,
    /// English label; see [`DeliveryBand::time_label`] for Nepali.
    pub estimated_time_label: String,
    pub band: DeliveryBand,
}

impl DeliveryEstimate {
    /// Builds the estimate for an already-measured distance.
    pub fn from_distance(km: f64) -> Self {
        let band = DeliveryBand::for_distance(km);
        DeliveryEstimate {
            distance_km: round_distance(km),
            fee: band.fee(),
            estimated_time_label: band.time_label(Locale::English).to_string(),
            band,
        }
    }

    /// Time label in the requested locale.
    pub fn time_label(&self, locale: Locale) -> &'static str {
        self.band.time_label(locale)
    }
}

// =============================================================================
// Estimator
// =============================================================================

/// Stateless delivery estimator.
///
/// ## User Workflow
/// ```text
/// Checkout: "Use my location"   or   "Enter address manually"
///      │                                   │
///      ▼                                   ▼
///  GPS coordinate              service-area coordinate
///      └──────────────┬────────────────────┘
///                     ▼
///          estimate(store, customer) ← THIS
///                     │
///                     ▼
///   "Delivery: Rs. 100 | Time: 2–4 hours"
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DeliveryEstimator;

impl DeliveryEstimator {
    pub const fn new() -> Self {
        DeliveryEstimator
    }

    /// Estimates fee and time from `store` to `customer`.
    ///
    /// Fails with [`crate::CoreError::InvalidCoordinate`] when either
    /// coordinate is out of range or non-finite.
    pub fn estimate(&self, store: Coordinate, customer: Coordinate) -> CoreResult<DeliveryEstimate> {
        store.validate()?;
        customer.validate()?;
        Ok(DeliveryEstimate::from_distance(store.distance_km(&customer)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
