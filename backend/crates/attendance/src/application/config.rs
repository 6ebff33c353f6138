//! Application Configuration
//!
//! Configuration for the attendance application layer.

use std::time::Duration;

use crate::domain::geolocation::{DEFAULT_LOCATION_TIMEOUT, LocationRequest};

/// Attendance application configuration
#[derive(Debug, Clone)]
pub struct AttendanceConfig {
    /// How long the geolocation provider gets before the scan is rejected
    pub location_timeout: Duration,
    /// Cookie carrying the identity token issued by the auth service
    pub identity_cookie_name: String,
    /// Shared HMAC key used to verify identity tokens (32 bytes)
    pub identity_secret: [u8; 32],
    /// Maximum number of records returned by the history endpoint
    pub history_limit: u32,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            location_timeout: DEFAULT_LOCATION_TIMEOUT,
            identity_cookie_name: "auth_session".to_string(),
            identity_secret: [0u8; 32],
            history_limit: 50,
        }
    }
}

impl AttendanceConfig {
    /// Create config with a random identity secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            identity_secret: platform::crypto::random_secret(),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Create config with a secret shared with the auth service
    pub fn with_secret(identity_secret: [u8; 32]) -> Self {
        Self {
            identity_secret,
            ..Default::default()
        }
    }

    /// Position request sent to the geolocation provider
    pub fn location_request(&self) -> LocationRequest {
        LocationRequest::fresh_fix(self.location_timeout)
    }
}
