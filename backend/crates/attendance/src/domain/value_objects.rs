//! Domain Value Objects
//!
//! Immutable value types for the attendance domain.

use kernel::id::AttendanceSessionId;
use uuid::Uuid;

use crate::error::{AttendanceError, AttendanceResult};

/// Radius applied when a geofenced session does not configure one
pub const DEFAULT_GEOFENCE_RADIUS_M: f64 = 100.0;

/// Scanned QR payload that has passed the format check
///
/// Canonical form only: 36 characters, hex digits grouped 8-4-4-4-12 and
/// separated by hyphens, either case. Braced, URN and unhyphenated forms
/// are rejected even though they denote the same UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    raw: String,
    id: Uuid,
}

impl SessionToken {
    pub const LEN: usize = 36;
    const HYPHENS: [usize; 4] = [8, 13, 18, 23];

    pub fn parse(payload: &str) -> AttendanceResult<Self> {
        if !Self::is_canonical(payload) {
            return Err(AttendanceError::InvalidFormat);
        }
        let id = Uuid::parse_str(payload).map_err(|_| AttendanceError::InvalidFormat)?;
        Ok(Self {
            raw: payload.to_string(),
            id,
        })
    }

    fn is_canonical(payload: &str) -> bool {
        payload.len() == Self::LEN
            && payload.bytes().enumerate().all(|(i, b)| {
                if Self::HYPHENS.contains(&i) {
                    b == b'-'
                } else {
                    b.is_ascii_hexdigit()
                }
            })
    }

    /// The payload exactly as scanned
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn session_id(&self) -> AttendanceSessionId {
        AttendanceSessionId::from_uuid(self.id)
    }
}

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Returns `None` for non-finite or out-of-range coordinates
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Circular region a geofenced scan must originate from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geofence {
    center: GeoPoint,
    radius_m: f64,
}

impl Geofence {
    /// `None` radius falls back to [`DEFAULT_GEOFENCE_RADIUS_M`].
    /// Returns `None` if the radius is negative or not finite.
    pub fn new(center: GeoPoint, radius_m: Option<f64>) -> Option<Self> {
        let radius_m = radius_m.unwrap_or(DEFAULT_GEOFENCE_RADIUS_M);
        (radius_m.is_finite() && radius_m >= 0.0).then_some(Self { center, radius_m })
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }
}

/// Free-form descriptor of the scanning device, kept for audit only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo(String);

impl DeviceInfo {
    pub const UNKNOWN: &'static str = "unknown";
    pub const MAX_CHARS: usize = 512;

    /// Never fails. The descriptor is opaque and kept as sent, with two
    /// exceptions: absent or blank input becomes `"unknown"`, and input
    /// longer than [`Self::MAX_CHARS`] is cut to that many characters to
    /// bound the audit column. Oversized descriptors are therefore stored
    /// lossy.
    pub fn new(raw: Option<&str>) -> Self {
        match raw.filter(|s| !s.trim().is_empty()) {
            Some(s) => Self(s.chars().take(Self::MAX_CHARS).collect()),
            None => Self(Self::UNKNOWN.to_string()),
        }
    }

    /// Wrap a value read back from storage as-is
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_session_token_accepts_canonical() {
        let lower = "3f2b8c1e-5d4a-4b6f-9e8d-7c6b5a4f3e2d";
        let token = SessionToken::parse(lower).unwrap();
        assert_eq!(token.as_str(), lower);
        assert_eq!(token.session_id().to_string(), lower);

        let upper = "3F2B8C1E-5D4A-4B6F-9E8D-7C6B5A4F3E2D";
        let token = SessionToken::parse(upper).unwrap();
        assert_eq!(token.as_str(), upper);
        assert_eq!(token.session_id().to_string(), lower);
    }

    #[test]
    fn test_session_token_rejects_non_canonical() {
        let rejected = [
            "",
            "hello",
            "3f2b8c1e5d4a4b6f9e8d7c6b5a4f3e2d",
            "{3f2b8c1e-5d4a-4b6f-9e8d-7c6b5a4f3e2d}",
            "urn:uuid:3f2b8c1e-5d4a-4b6f-9e8d-7c6b5a4f3e2d",
            "3f2b8c1e-5d4a-4b6f-9e8d-7c6b5a4f3e2",
            "3f2b8c1e-5d4a-4b6f-9e8d-7c6b5a4f3e2d0",
            " 3f2b8c1e-5d4a-4b6f-9e8d-7c6b5a4f3e2d",
            "3f2b8c1e-5d4a-4b6f-9e8d-7c6b5a4f3e2d\n",
            "3f2b8c1e_5d4a_4b6f_9e8d_7c6b5a4f3e2d",
            "3f2b8c1e-5d4a-4b6f-9e8d-7c6b5a4f3e2g",
            "3f2b8c1e5-d4a-4b6f-9e8d-7c6b5a4f3e2d",
            "3f2b8c1é-5d4a-4b6f-9e8d-7c6b5a4f3e2",
        ];
        for payload in rejected {
            assert!(
                matches!(
                    SessionToken::parse(payload),
                    Err(AttendanceError::InvalidFormat)
                ),
                "payload {payload:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_geo_point_range() {
        assert!(GeoPoint::new(0.0, 0.0).is_some());
        assert!(GeoPoint::new(90.0, -180.0).is_some());
        assert!(GeoPoint::new(90.0001, 0.0).is_none());
        assert!(GeoPoint::new(0.0, 180.5).is_none());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_none());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_geofence_default_radius() {
        let center = GeoPoint::new(1.0, 2.0).unwrap();
        let fence = Geofence::new(center, None).unwrap();
        assert_eq!(fence.radius_m(), DEFAULT_GEOFENCE_RADIUS_M);

        let fence = Geofence::new(center, Some(50.0)).unwrap();
        assert_eq!(fence.radius_m(), 50.0);

        assert!(Geofence::new(center, Some(-1.0)).is_none());
        assert!(Geofence::new(center, Some(f64::NAN)).is_none());
    }

    #[test]
    fn test_device_info() {
        assert_eq!(DeviceInfo::new(None).as_str(), "unknown");
        assert_eq!(DeviceInfo::new(Some("  ")).as_str(), "unknown");
        assert_eq!(
            DeviceInfo::new(Some(" Pixel 8; Android 15 ")).as_str(),
            " Pixel 8; Android 15 "
        );

        let exact = "é".repeat(DeviceInfo::MAX_CHARS);
        assert_eq!(DeviceInfo::new(Some(&exact)).as_str(), exact);

        let long = "x".repeat(DeviceInfo::MAX_CHARS + 10);
        assert_eq!(
            DeviceInfo::new(Some(&long)).as_str().len(),
            DeviceInfo::MAX_CHARS
        );
    }

    fn has_canonical_shape(s: &str) -> bool {
        let groups: Vec<&str> = s.split('-').collect();
        groups.iter().map(|g| g.len()).eq([8, 4, 4, 4, 12])
            && groups
                .iter()
                .all(|g| g.chars().all(|c| c.is_ascii_hexdigit()))
    }

    fn payloads() -> impl Strategy<Value = String> {
        prop_oneof![
            any::<String>(),
            "[0-9a-fA-F-]{30,40}",
            "[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
            "[0-9a-zA-Z]{8}.[0-9a-fA-F]{4}.[0-9a-fA-F]{4}.[0-9a-fA-F]{4}.[0-9a-fA-F]{12}",
        ]
    }

    proptest! {
        #[test]
        fn session_token_accepts_exactly_canonical_shape(payload in payloads()) {
            let parsed = SessionToken::parse(&payload);
            prop_assert_eq!(parsed.is_ok(), has_canonical_shape(&payload));
            match parsed {
                Ok(token) => {
                    prop_assert_eq!(token.as_str(), payload.as_str());
                    prop_assert_eq!(
                        token.session_id().to_string(),
                        payload.to_ascii_lowercase()
                    );
                }
                Err(err) => prop_assert!(matches!(err, AttendanceError::InvalidFormat)),
            }
        }
    }
}
