//! # Geocoding and Distance
//!
//! Turns a shipping address into a coordinate and measures how far a
//! warehouse is from it.
//!
//! ## Hash Geocoder
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "500 Market St, San Francisco, CA 94105, USA"                         │
//! │       │  lowercase                                                      │
//! │       ▼                                                                 │
//! │  SHA-256 ──► bytes[0..4] ──► u32 / u32::MAX ──► 25 + f × 24   (lat)    │
//! │          └─► bytes[4..8] ──► u32 / u32::MAX ──► -125 + f × 58 (lng)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rounded to 6 decimals, always inside the continental-US box           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers depend on the contract (same address → same coordinate, always
//! inside the box), not on the mapping. A provider-backed geocoder can
//! replace [`HashGeocoder`] behind the [`Geocoder`] trait.

use sha2::{Digest, Sha256};

use crate::types::Coordinate;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Latitude range covered by [`HashGeocoder`].
pub const MIN_LATITUDE: f64 = 25.0;
pub const MAX_LATITUDE: f64 = 49.0;

/// Longitude range covered by [`HashGeocoder`].
pub const MIN_LONGITUDE: f64 = -125.0;
pub const MAX_LONGITUDE: f64 = -67.0;

// =============================================================================
// Geocoder
// =============================================================================

/// Address → coordinate lookup.
///
/// Implementations must be deterministic for a given address and must not
/// fail; an unresolvable address still maps to some coordinate.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, address: &str) -> Coordinate;
}

/// Deterministic stand-in for a geocoding provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashGeocoder;

impl Geocoder for HashGeocoder {
    fn geocode(&self, address: &str) -> Coordinate {
        let digest = Sha256::digest(address.to_lowercase().as_bytes());

        let lat_hash = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
        let lng_hash = u32::from_be_bytes([digest[4], digest[5], digest[6], digest[7]]);

        let max = u32::MAX as f64;
        let latitude = MIN_LATITUDE + (lat_hash as f64 / max) * (MAX_LATITUDE - MIN_LATITUDE);
        let longitude =
            MIN_LONGITUDE + (lng_hash as f64 / max) * (MAX_LONGITUDE - MIN_LONGITUDE);

        Coordinate {
            latitude: round6(latitude),
            longitude: round6(longitude),
        }
    }
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

// =============================================================================
// Distance
// =============================================================================

/// Great-circle distance in kilometres between two coordinates.
///
/// ## Properties
/// - `haversine_km(x, x) == 0`
/// - symmetric in its arguments
/// - grows with angular separation
///
/// ## Example
/// ```rust
/// use depot_core::geo::haversine_km;
/// use depot_core::Coordinate;
///
/// let sf = Coordinate { latitude: 37.7749, longitude: -122.4194 };
/// let nyc = Coordinate { latitude: 40.7128, longitude: -74.0060 };
/// let km = haversine_km(sf, nyc);
/// assert!((km - 4129.0).abs() < 5.0);
/// ```
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

// =============================================================================
// Unit Tests
// =============================================================================
