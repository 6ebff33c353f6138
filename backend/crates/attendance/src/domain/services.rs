//! Domain Services
//!
//! Pure geofence logic. No I/O.

use crate::domain::value_objects::{GeoPoint, Geofence};

/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters (Haversine)
pub fn haversine_distance_m(from: GeoPoint, to: GeoPoint) -> f64 {
    let phi1 = from.latitude().to_radians();
    let phi2 = to.latitude().to_radians();
    let delta_phi = (to.latitude() - from.latitude()).to_radians();
    let delta_lambda = (to.longitude() - from.longitude()).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points
    let a = a.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Outcome of checking a device position against a geofence
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeofenceDecision {
    Inside { distance_m: f64 },
    Outside { distance_m: f64, radius_m: f64 },
}

impl Geofence {
    /// Boundary is inclusive: exactly `radius_m` away is still inside
    pub fn admits(&self, distance_m: f64) -> bool {
        distance_m <= self.radius_m()
    }

    pub fn evaluate(&self, device: GeoPoint) -> GeofenceDecision {
        let distance_m = haversine_distance_m(self.center(), device);
        if self.admits(distance_m) {
            GeofenceDecision::Inside { distance_m }
        } else {
            GeofenceDecision::Outside {
                distance_m,
                radius_m: self.radius_m(),
            }
        }
    }
}
