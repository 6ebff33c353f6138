//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::AttendanceRecord;
use crate::domain::geolocation::LocationError;

/// Request for POST /api/attendance/scan
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    /// Decoded QR text
    pub payload: String,
    /// Fix obtained by the client when the session asked for one
    #[serde(default)]
    pub location: Option<DeviceLocation>,
    /// Why the client could not obtain a fix
    #[serde(default)]
    pub location_error: Option<DeviceLocationError>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Reported accuracy, telemetry only
    #[serde(default)]
    pub accuracy_m: Option<f64>,
}

/// Geolocation failure codes reported by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceLocationError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
}

impl From<DeviceLocationError> for LocationError {
    fn from(e: DeviceLocationError) -> Self {
        match e {
            DeviceLocationError::PermissionDenied => LocationError::PermissionDenied,
            DeviceLocationError::PositionUnavailable => LocationError::PositionUnavailable,
            DeviceLocationError::Timeout => LocationError::Timeout,
        }
    }
}

/// A persisted attendance record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordResponse {
    pub id: Uuid,
    pub session_id: Uuid,
    pub student_id: Uuid,
    pub location_verified: bool,
    pub device_info: String,
    pub scanned_at: DateTime<Utc>,
}

impl From<AttendanceRecord> for AttendanceRecordResponse {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            id: record.id.into_uuid(),
            session_id: record.session_id.into_uuid(),
            student_id: record.student_id.into_uuid(),
            location_verified: record.location_verified,
            device_info: record.device_info.into_inner(),
            scanned_at: record.scanned_at,
        }
    }
}

/// Response for GET /api/attendance/history
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub records: Vec<AttendanceRecordResponse>,
}
