//! Attendance Error Types
//!
//! Every way a scan can fail is a variant here. Callers match on the
//! variant (or on [`RejectionKind`] over the wire) instead of parsing
//! message strings.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use serde::Serialize;
use thiserror::Error;

use crate::domain::geolocation::{LocationError, LocationRequest};

/// Attendance-specific result type alias
pub type AttendanceResult<T> = Result<T, AttendanceError>;

/// Attendance-specific error variants
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// Scanned payload is not a canonical session identifier
    #[error("Scanned code is not a valid attendance code")]
    InvalidFormat,

    #[error("Attendance session not found")]
    SessionNotFound,

    /// Session is inactive, or its expiry instant has been reached
    #[error("Attendance session has expired or is closed")]
    SessionExpired,

    #[error("You are not enrolled in this class")]
    NotEnrolled,

    /// The device could not produce a location fix
    #[error("Location unavailable: {0}")]
    LocationUnavailable(#[from] LocationError),

    #[error(
        "Device is {distance_m:.0} m from the class location (allowed radius {radius_m:.0} m)"
    )]
    OutsideGeofence { distance_m: f64, radius_m: f64 },

    /// A record for this session and student already exists
    #[error("Attendance already recorded for this session")]
    AlreadyRecorded,

    /// Storage returned data that breaks an entity invariant
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Missing or unverifiable caller identity
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Closed set of scan rejection kinds exposed to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionKind {
    InvalidFormat,
    SessionNotFound,
    SessionExpired,
    NotEnrolled,
    LocationUnavailable,
    OutsideGeofence,
    AlreadyRecorded,
    PersistenceError,
}

impl AttendanceError {
    /// Rejection kind for scan failures; `None` for errors that are not a
    /// verdict on the scan itself (missing identity, internal bugs).
    pub fn rejection(&self) -> Option<RejectionKind> {
        match self {
            AttendanceError::InvalidFormat => Some(RejectionKind::InvalidFormat),
            AttendanceError::SessionNotFound => Some(RejectionKind::SessionNotFound),
            AttendanceError::SessionExpired => Some(RejectionKind::SessionExpired),
            AttendanceError::NotEnrolled => Some(RejectionKind::NotEnrolled),
            AttendanceError::LocationUnavailable(_) => Some(RejectionKind::LocationUnavailable),
            AttendanceError::OutsideGeofence { .. } => Some(RejectionKind::OutsideGeofence),
            AttendanceError::AlreadyRecorded => Some(RejectionKind::AlreadyRecorded),
            AttendanceError::Persistence(_) | AttendanceError::Database(_) => {
                Some(RejectionKind::PersistenceError)
            }
            AttendanceError::Unauthenticated | AttendanceError::Internal(_) => None,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AttendanceError::InvalidFormat => ErrorKind::BadRequest,
            AttendanceError::SessionNotFound => ErrorKind::NotFound,
            AttendanceError::SessionExpired => ErrorKind::Gone,
            AttendanceError::NotEnrolled | AttendanceError::OutsideGeofence { .. } => {
                ErrorKind::Forbidden
            }
            AttendanceError::LocationUnavailable(_) => ErrorKind::UnprocessableEntity,
            AttendanceError::AlreadyRecorded => ErrorKind::Conflict,
            AttendanceError::Unauthenticated => ErrorKind::Unauthorized,
            AttendanceError::Persistence(_)
            | AttendanceError::Database(_)
            | AttendanceError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Message safe to show the caller. Storage details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AttendanceError::Persistence(_)
            | AttendanceError::Database(_)
            | AttendanceError::Internal(_) => "Failed to record attendance".to_string(),
            _ => self.to_string(),
        }
    }

    /// What the student can do about it
    pub fn action(&self) -> Option<&'static str> {
        match self {
            AttendanceError::InvalidFormat => Some("Scan the attendance QR code shown in class"),
            AttendanceError::SessionNotFound => Some("Check that you scanned the current code"),
            AttendanceError::SessionExpired => {
                Some("Ask your lecturer to open a new attendance session")
            }
            AttendanceError::NotEnrolled => Some("Contact your lecturer to be enrolled"),
            AttendanceError::LocationUnavailable(LocationError::PermissionDenied) => {
                Some("Allow location access for this app and scan again")
            }
            AttendanceError::LocationUnavailable(_) => {
                Some("Make sure location services are on and scan again")
            }
            AttendanceError::OutsideGeofence { .. } => {
                Some("Move closer to the classroom and scan again")
            }
            AttendanceError::AlreadyRecorded => None,
            AttendanceError::Unauthenticated => Some("Sign in and try again"),
            AttendanceError::Persistence(_)
            | AttendanceError::Database(_)
            | AttendanceError::Internal(_) => Some("Please try again in a moment"),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AttendanceError::Database(e) => {
                tracing::error!(error = %e, "Attendance database error");
            }
            AttendanceError::Persistence(msg) => {
                tracing::error!(message = %msg, "Attendance persistence error");
            }
            AttendanceError::Internal(msg) => {
                tracing::error!(message = %msg, "Attendance internal error");
            }
            AttendanceError::OutsideGeofence {
                distance_m,
                radius_m,
            } => {
                tracing::warn!(distance_m, radius_m, "Scan outside geofence");
            }
            AttendanceError::NotEnrolled => {
                tracing::warn!("Scan by student not enrolled in class");
            }
            _ => {
                tracing::debug!(error = %self, "Attendance error");
            }
        }
    }
}

impl From<AttendanceError> for AppError {
    fn from(err: AttendanceError) -> Self {
        let app = AppError::new(err.kind(), err.public_message());
        match err.action() {
            Some(action) => app.with_action(action),
            None => app,
        }
    }
}

/// Fix parameters the client must use before retrying a location rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequestHint {
    pub high_accuracy: bool,
    pub timeout_ms: u64,
    /// Zero: cached fixes are not acceptable
    pub maximum_age_ms: u64,
}

impl From<&LocationRequest> for LocationRequestHint {
    fn from(request: &LocationRequest) -> Self {
        let ms = |d: std::time::Duration| u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        Self {
            high_accuracy: request.high_accuracy,
            timeout_ms: ms(request.timeout),
            maximum_age_ms: ms(request.maximum_age),
        }
    }
}

/// Rejection body returned for every failed request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionBody {
    pub rejection: Option<RejectionKind>,
    pub message: String,
    pub action: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_request: Option<LocationRequestHint>,
}

impl From<&AttendanceError> for RejectionBody {
    fn from(err: &AttendanceError) -> Self {
        Self {
            rejection: err.rejection(),
            message: err.public_message(),
            action: err.action(),
            location_request: None,
        }
    }
}

/// A body that is not JSON or lacks a string `payload` never reaches the
/// token check, so it is reported as an unreadable code.
impl From<JsonRejection> for AttendanceError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Scan request body rejected");
        AttendanceError::InvalidFormat
    }
}

impl AttendanceError {
    /// Render a scan rejection. Location failures also tell the client which
    /// fix to obtain (`request`) before scanning again.
    pub fn into_scan_response(self, request: &LocationRequest) -> Response {
        let hint = matches!(self, AttendanceError::LocationUnavailable(_))
            .then(|| LocationRequestHint::from(request));
        self.render(hint)
    }

    fn render(self, location_request: Option<LocationRequestHint>) -> Response {
        self.log();
        let status = self.status_code();
        let body = RejectionBody {
            location_request,
            ..RejectionBody::from(&self)
        };
        if matches!(self, AttendanceError::Unauthenticated) {
            return (status, [("X-Auth-Required", "true")], Json(body)).into_response();
        }
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AttendanceError {
    fn into_response(self) -> Response {
        self.render(None)
    }
}
