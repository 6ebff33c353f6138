//! Domain Entities
//!
//! Core business entities for the attendance domain.

use chrono::{DateTime, Utc};
use kernel::id::{AttendanceRecordId, AttendanceSessionId, ClassId, EnrollmentId, StudentId};

use crate::domain::value_objects::{DeviceInfo, Geofence};

/// Whether a session restricts where scans may come from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationRequirement {
    NotRequired,
    Required(Geofence),
}

/// Time-boxed, class-scoped attendance window, opened by a lecturer
#[derive(Debug, Clone)]
pub struct AttendanceSession {
    pub id: AttendanceSessionId,
    pub class_id: ClassId,
    pub is_active: bool,
    pub expires_at: DateTime<Utc>,
    pub location: LocationRequirement,
}

impl AttendanceSession {
    /// Open means active and strictly before the expiry instant
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && now < self.expires_at
    }

    pub fn geofence(&self) -> Option<&Geofence> {
        match &self.location {
            LocationRequirement::Required(fence) => Some(fence),
            LocationRequirement::NotRequired => None,
        }
    }
}

/// A student's membership in a class. Presence is all that matters.
#[derive(Debug, Clone)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub class_id: ClassId,
    pub enrolled_at: DateTime<Utc>,
}

/// Fields supplied by the engine when recording a scan; id and timestamp
/// are assigned by storage.
#[derive(Debug, Clone)]
pub struct NewAttendanceRecord {
    pub session_id: AttendanceSessionId,
    pub student_id: StudentId,
    pub location_verified: bool,
    pub device_info: DeviceInfo,
}

/// Persisted, immutable outcome of an accepted scan
#[derive(Debug, Clone)]
pub struct AttendanceRecord {
    pub id: AttendanceRecordId,
    pub session_id: AttendanceSessionId,
    pub student_id: StudentId,
    pub location_verified: bool,
    pub device_info: DeviceInfo,
    pub scanned_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::GeoPoint;
    use chrono::Duration;

    fn session(is_active: bool, expires_at: DateTime<Utc>) -> AttendanceSession {
        AttendanceSession {
            id: AttendanceSessionId::new(),
            class_id: ClassId::new(),
            is_active,
            expires_at,
            location: LocationRequirement::NotRequired,
        }
    }

    #[test]
    fn test_open_before_expiry() {
        let now = Utc::now();
        assert!(session(true, now + Duration::hours(1)).is_open_at(now));
    }

    #[test]
    fn test_expiry_is_exclusive() {
        let expires_at = Utc::now();
        let s = session(true, expires_at);
        assert!(!s.is_open_at(expires_at));
        assert!(s.is_open_at(expires_at - Duration::milliseconds(1)));
        assert!(!s.is_open_at(expires_at + Duration::milliseconds(1)));
    }

    #[test]
    fn test_inactive_is_closed() {
        let now = Utc::now();
        assert!(!session(false, now + Duration::hours(1)).is_open_at(now));
    }

    #[test]
    fn test_geofence_accessor() {
        let now = Utc::now();
        let mut s = session(true, now);
        assert!(s.geofence().is_none());

        let fence = Geofence::new(GeoPoint::new(1.0, 1.0).unwrap(), Some(25.0)).unwrap();
        s.location = LocationRequirement::Required(fence);
        assert_eq!(s.geofence().map(|f| f.radius_m()), Some(25.0));
    }
}
