//! HTTP Handlers

use std::sync::Arc;

use axum::extract::{FromRequest, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::{Extension, Json};
use kernel::id::StudentId;
use platform::client::{extract_client_ip, extract_device_info};

use crate::application::attendance_history::AttendanceHistoryUseCase;
use crate::application::config::AttendanceConfig;
use crate::application::record_attendance::{RecordAttendanceUseCase, ScanInput};
use crate::domain::repository::{
    AttendanceRecordRepository, EnrollmentRepository, SessionRepository,
};
use crate::domain::value_objects::DeviceInfo;
use crate::error::{AttendanceError, AttendanceResult};
use crate::presentation::dto::{AttendanceRecordResponse, HistoryResponse, ScanRequest};
use crate::presentation::reported_location::ReportedLocation;

/// Shared state for attendance handlers
#[derive(Clone)]
pub struct AttendanceAppState<R>
where
    R: SessionRepository
        + EnrollmentRepository
        + AttendanceRecordRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AttendanceConfig>,
}

/// JSON body extractor whose failures render as typed rejections
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AttendanceError))]
pub struct ScanJson<T>(pub T);

/// POST /api/attendance/scan
pub async fn scan<R>(
    State(state): State<AttendanceAppState<R>>,
    Extension(student_id): Extension<StudentId>,
    headers: HeaderMap,
    ScanJson(req): ScanJson<ScanRequest>,
) -> Result<(StatusCode, Json<AttendanceRecordResponse>), Response>
where
    R: SessionRepository
        + EnrollmentRepository
        + AttendanceRecordRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    tracing::debug!(
        student_id = %student_id,
        client_ip = ?extract_client_ip(&headers, None),
        accuracy_m = ?req.location.and_then(|l| l.accuracy_m),
        "Scan received"
    );

    let location = ReportedLocation::from_request(&req);
    let device_info = DeviceInfo::new(extract_device_info(&headers).as_deref());

    let use_case = RecordAttendanceUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let record = use_case
        .execute(
            ScanInput {
                payload: req.payload,
                student_id,
                device_info,
            },
            &location,
        )
        .await
        .map_err(|e| e.into_scan_response(&state.config.location_request()))?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// GET /api/attendance/history
pub async fn history<R>(
    State(state): State<AttendanceAppState<R>>,
    Extension(student_id): Extension<StudentId>,
) -> AttendanceResult<Json<HistoryResponse>>
where
    R: SessionRepository
        + EnrollmentRepository
        + AttendanceRecordRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let use_case = AttendanceHistoryUseCase::new(state.repo.clone(), state.config.clone());
    let records = use_case.execute(student_id).await?;

    Ok(Json(HistoryResponse {
        records: records.into_iter().map(Into::into).collect(),
    }))
}
