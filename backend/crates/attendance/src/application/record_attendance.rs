//! Record Attendance Use Case
//!
//! Turns a scanned payload, the caller's verified identity and (when the
//! session asks for it) a device position into a persisted attendance
//! record or a typed rejection.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{ClassId, StudentId};

use crate::application::config::AttendanceConfig;
use crate::domain::entities::{AttendanceRecord, AttendanceSession, NewAttendanceRecord};
use crate::domain::geolocation::{LocationError, LocationProvider};
use crate::domain::repository::{
    AttendanceRecordRepository, EnrollmentRepository, SessionRepository,
};
use crate::domain::services::GeofenceDecision;
use crate::domain::value_objects::{DeviceInfo, Geofence, SessionToken};
use crate::error::{AttendanceError, AttendanceResult};

/// Input DTO for a scan
#[derive(Debug, Clone)]
pub struct ScanInput {
    /// Decoded QR text, unvalidated
    pub payload: String,
    /// Identity already verified by the caller
    pub student_id: StudentId,
    pub device_info: DeviceInfo,
}

/// Pipeline stage a scan is in. Stages only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStage {
    Validating,
    ResolvingSession,
    CheckingEnrollment,
    EvaluatingGeofence,
    Recording,
}

impl fmt::Display for ScanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScanStage::Validating => "validating",
            ScanStage::ResolvingSession => "resolving_session",
            ScanStage::CheckingEnrollment => "checking_enrollment",
            ScanStage::EvaluatingGeofence => "evaluating_geofence",
            ScanStage::Recording => "recording",
        })
    }
}

/// Record Attendance Use Case
pub struct RecordAttendanceUseCase<S, E, A>
where
    S: SessionRepository,
    E: EnrollmentRepository,
    A: AttendanceRecordRepository,
{
    session_repo: Arc<S>,
    enrollment_repo: Arc<E>,
    record_repo: Arc<A>,
    config: Arc<AttendanceConfig>,
}

impl<S, E, A> RecordAttendanceUseCase<S, E, A>
where
    S: SessionRepository + Sync,
    E: EnrollmentRepository + Sync,
    A: AttendanceRecordRepository + Sync,
{
    pub fn new(
        session_repo: Arc<S>,
        enrollment_repo: Arc<E>,
        record_repo: Arc<A>,
        config: Arc<AttendanceConfig>,
    ) -> Self {
        Self {
            session_repo,
            enrollment_repo,
            record_repo,
            config,
        }
    }

    /// Run the full pipeline. The location provider is only consulted if
    /// every earlier stage passed and the session is geofenced.
    pub async fn execute<P>(
        &self,
        input: ScanInput,
        location: &P,
    ) -> AttendanceResult<AttendanceRecord>
    where
        P: LocationProvider + Sync,
    {
        let mut stage = ScanStage::Validating;
        let result = self.run(&input, location, &mut stage).await;

        match &result {
            Ok(record) => {
                tracing::info!(
                    record_id = %record.id,
                    session_id = %record.session_id,
                    student_id = %record.student_id,
                    location_verified = record.location_verified,
                    "Attendance recorded"
                );
            }
            Err(e) => {
                tracing::warn!(
                    student_id = %input.student_id,
                    stage = %stage,
                    rejection = ?e.rejection(),
                    error = %e,
                    "Scan rejected"
                );
            }
        }

        result
    }

    async fn run<P>(
        &self,
        input: &ScanInput,
        location: &P,
        stage: &mut ScanStage,
    ) -> AttendanceResult<AttendanceRecord>
    where
        P: LocationProvider + Sync,
    {
        let token = SessionToken::parse(&input.payload)?;

        *stage = ScanStage::ResolvingSession;
        let session = self.resolve_session(&token, Utc::now()).await?;

        *stage = ScanStage::CheckingEnrollment;
        self.check_enrollment(input.student_id, session.class_id)
            .await?;

        let location_verified = match session.geofence() {
            Some(fence) => {
                *stage = ScanStage::EvaluatingGeofence;
                self.evaluate_geofence(fence, location).await?
            }
            None => false,
        };

        *stage = ScanStage::Recording;
        self.record(NewAttendanceRecord {
            session_id: session.id,
            student_id: input.student_id,
            location_verified,
            device_info: input.device_info.clone(),
        })
        .await
    }

    /// Load the session and require it to be open at `now`
    pub async fn resolve_session(
        &self,
        token: &SessionToken,
        now: DateTime<Utc>,
    ) -> AttendanceResult<AttendanceSession> {
        let session = self
            .session_repo
            .get_session(token.session_id())
            .await?
            .ok_or(AttendanceError::SessionNotFound)?;

        if !session.is_open_at(now) {
            tracing::debug!(
                session_id = %session.id,
                is_active = session.is_active,
                expires_at = %session.expires_at,
                "Session closed"
            );
            return Err(AttendanceError::SessionExpired);
        }

        Ok(session)
    }

    pub async fn check_enrollment(
        &self,
        student_id: StudentId,
        class_id: ClassId,
    ) -> AttendanceResult<()> {
        self.enrollment_repo
            .find_enrollment(student_id, class_id)
            .await?
            .map(|_| ())
            .ok_or(AttendanceError::NotEnrolled)
    }

    /// Ask for a fresh fix and compare it against the fence.
    /// Returns the `location_verified` flag (always `true` on success).
    pub async fn evaluate_geofence<P>(&self, fence: &Geofence, location: &P) -> AttendanceResult<bool>
    where
        P: LocationProvider + Sync,
    {
        let request = self.config.location_request();

        let position = tokio::time::timeout(request.timeout, location.current_position(&request))
            .await
            .map_err(|_| LocationError::Timeout)??;

        match fence.evaluate(position) {
            GeofenceDecision::Inside { distance_m } => {
                tracing::debug!(distance_m, radius_m = fence.radius_m(), "Inside geofence");
                Ok(true)
            }
            GeofenceDecision::Outside {
                distance_m,
                radius_m,
            } => Err(AttendanceError::OutsideGeofence {
                distance_m,
                radius_m,
            }),
        }
    }

    pub async fn record(&self, record: NewAttendanceRecord) -> AttendanceResult<AttendanceRecord> {
        self.record_repo
            .insert_attendance_record(&record)
            .await?
            .ok_or(AttendanceError::AlreadyRecorded)
    }
}
