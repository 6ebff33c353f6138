//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{AttendanceSessionId, ClassId, StudentId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{
    AttendanceRecord, AttendanceSession, Enrollment, LocationRequirement, NewAttendanceRecord,
};
use crate::domain::repository::{
    AttendanceRecordRepository, EnrollmentRepository, SessionRepository,
};
use crate::domain::value_objects::{DeviceInfo, GeoPoint, Geofence};
use crate::error::{AttendanceError, AttendanceResult};

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SessionRepository for PgAttendanceRepository {
    async fn get_session(
        &self,
        session_id: AttendanceSessionId,
    ) -> AttendanceResult<Option<AttendanceSession>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                attendance_session_id,
                class_id,
                is_active,
                expires_at,
                location_required,
                location_latitude,
                location_longitude,
                location_radius_m
            FROM attendance_sessions
            WHERE attendance_session_id = $1
            "#,
        )
        .bind(session_id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(SessionRow::into_session).transpose()
    }
}

impl EnrollmentRepository for PgAttendanceRepository {
    async fn find_enrollment(
        &self,
        student_id: StudentId,
        class_id: ClassId,
    ) -> AttendanceResult<Option<Enrollment>> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT enrollment_id, student_id, class_id, enrolled_at
            FROM class_enrollments
            WHERE student_id = $1 AND class_id = $2
            LIMIT 1
            "#,
        )
        .bind(student_id.into_uuid())
        .bind(class_id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(EnrollmentRow::into_enrollment))
    }
}

impl AttendanceRecordRepository for PgAttendanceRepository {
    async fn insert_attendance_record(
        &self,
        record: &NewAttendanceRecord,
    ) -> AttendanceResult<Option<AttendanceRecord>> {
        // The unique (session_id, student_id) constraint makes concurrent
        // double submissions resolve to exactly one inserted row.
        let row = sqlx::query_as::<_, AttendanceRecordRow>(
            r#"
            INSERT INTO attendance_records (
                session_id,
                student_id,
                location_verified,
                device_info
            ) VALUES ($1, $2, $3, $4)
            ON CONFLICT (session_id, student_id) DO NOTHING
            RETURNING
                attendance_record_id,
                session_id,
                student_id,
                location_verified,
                device_info,
                scanned_at
            "#,
        )
        .bind(record.session_id.into_uuid())
        .bind(record.student_id.into_uuid())
        .bind(record.location_verified)
        .bind(record.device_info.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => {
                tracing::debug!(
                    attendance_record_id = %r.attendance_record_id,
                    "Attendance record inserted"
                );
                Ok(Some(r.into_record()))
            }
            None => {
                tracing::info!(
                    session_id = %record.session_id,
                    student_id = %record.student_id,
                    "Duplicate attendance submission"
                );
                Ok(None)
            }
        }
    }

    async fn list_for_student(
        &self,
        student_id: StudentId,
        limit: u32,
    ) -> AttendanceResult<Vec<AttendanceRecord>> {
        let rows = sqlx::query_as::<_, AttendanceRecordRow>(
            r#"
            SELECT
                attendance_record_id,
                session_id,
                student_id,
                location_verified,
                device_info,
                scanned_at
            FROM attendance_records
            WHERE student_id = $1
            ORDER BY scanned_at DESC
            LIMIT $2
            "#,
        )
        .bind(student_id.into_uuid())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AttendanceRecordRow::into_record).collect())
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct SessionRow {
    attendance_session_id: Uuid,
    class_id: Uuid,
    is_active: bool,
    expires_at: DateTime<Utc>,
    location_required: Option<bool>,
    location_latitude: Option<f64>,
    location_longitude: Option<f64>,
    location_radius_m: Option<f64>,
}

impl SessionRow {
    fn into_session(self) -> AttendanceResult<AttendanceSession> {
        let location = self.location_requirement()?;
        Ok(AttendanceSession {
            id: AttendanceSessionId::from_uuid(self.attendance_session_id),
            class_id: ClassId::from_uuid(self.class_id),
            is_active: self.is_active,
            expires_at: self.expires_at,
            location,
        })
    }

    fn location_requirement(&self) -> AttendanceResult<LocationRequirement> {
        if !self.location_required.unwrap_or(false) {
            return Ok(LocationRequirement::NotRequired);
        }

        let invalid = |what: &str| {
            AttendanceError::Persistence(format!(
                "session {} requires location but has {}",
                self.attendance_session_id, what
            ))
        };

        let (Some(lat), Some(lon)) = (self.location_latitude, self.location_longitude) else {
            return Err(invalid("no center coordinates"));
        };
        let center = GeoPoint::new(lat, lon).ok_or_else(|| invalid("invalid center coordinates"))?;
        let fence =
            Geofence::new(center, self.location_radius_m).ok_or_else(|| invalid("an invalid radius"))?;

        Ok(LocationRequirement::Required(fence))
    }
}

#[derive(sqlx::FromRow)]
struct EnrollmentRow {
    enrollment_id: Uuid,
    student_id: Uuid,
    class_id: Uuid,
    enrolled_at: DateTime<Utc>,
}

impl EnrollmentRow {
    fn into_enrollment(self) -> Enrollment {
        Enrollment {
            id: self.enrollment_id.into(),
            student_id: self.student_id.into(),
            class_id: self.class_id.into(),
            enrolled_at: self.enrolled_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AttendanceRecordRow {
    attendance_record_id: Uuid,
    session_id: Uuid,
    student_id: Uuid,
    location_verified: bool,
    device_info: String,
    scanned_at: DateTime<Utc>,
}

impl AttendanceRecordRow {
    fn into_record(self) -> AttendanceRecord {
        AttendanceRecord {
            id: self.attendance_record_id.into(),
            session_id: self.session_id.into(),
            student_id: self.student_id.into(),
            location_verified: self.location_verified,
            device_info: DeviceInfo::from_stored(self.device_info),
            scanned_at: self.scanned_at,
        }
    }
}
