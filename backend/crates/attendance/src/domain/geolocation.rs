//! Geolocation Provider
//!
//! Interface to whatever produces the device's current position. The HTTP
//! adapter lives in the presentation layer.

use std::time::Duration;

use crate::domain::value_objects::GeoPoint;

/// Default time the provider gets to produce a fix
pub const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Parameters for a position request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationRequest {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix the provider may return. Zero demands a fresh fix.
    pub maximum_age: Duration,
}

impl LocationRequest {
    /// High accuracy, no cached fixes
    pub fn fresh_fix(timeout: Duration) -> Self {
        Self {
            high_accuracy: true,
            timeout,
            maximum_age: Duration::ZERO,
        }
    }
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self::fresh_fix(DEFAULT_LOCATION_TIMEOUT)
    }
}

/// Why the provider could not produce a fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("timed out waiting for a location fix")]
    Timeout,
}

/// Geolocation provider trait
#[trait_variant::make(LocationProvider: Send)]
pub trait LocalLocationProvider {
    /// Ask for the device's current position
    async fn current_position(&self, request: &LocationRequest) -> Result<GeoPoint, LocationError>;
}
