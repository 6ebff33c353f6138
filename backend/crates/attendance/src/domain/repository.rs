//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{AttendanceSessionId, ClassId, StudentId};

use crate::domain::entities::{AttendanceRecord, AttendanceSession, Enrollment, NewAttendanceRecord};
use crate::error::AttendanceResult;

/// Attendance session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Load a session by id. `Ok(None)` when it does not exist.
    async fn get_session(
        &self,
        session_id: AttendanceSessionId,
    ) -> AttendanceResult<Option<AttendanceSession>>;
}

/// Enrollment repository trait
#[trait_variant::make(EnrollmentRepository: Send)]
pub trait LocalEnrollmentRepository {
    /// Existence check; a missing enrollment is `Ok(None)`, not an error
    async fn find_enrollment(
        &self,
        student_id: StudentId,
        class_id: ClassId,
    ) -> AttendanceResult<Option<Enrollment>>;
}

/// Attendance record repository trait
#[trait_variant::make(AttendanceRecordRepository: Send)]
pub trait LocalAttendanceRecordRepository {
    /// Insert a record, assigning its id and scan timestamp.
    /// Returns `Ok(None)` if the (session, student) pair is already recorded.
    async fn insert_attendance_record(
        &self,
        record: &NewAttendanceRecord,
    ) -> AttendanceResult<Option<AttendanceRecord>>;

    /// A student's records, newest first
    async fn list_for_student(
        &self,
        student_id: StudentId,
        limit: u32,
    ) -> AttendanceResult<Vec<AttendanceRecord>>;
}
