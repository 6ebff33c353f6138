//! Identity Middleware
//!
//! Resolves the calling student from the signed identity token and hands
//! the id to handlers as a request extension.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::StudentId;
use platform::cookie::extract_token;
use platform::identity::verify_identity;

use crate::application::config::AttendanceConfig;
use crate::error::AttendanceError;

/// Middleware that requires a verified student identity
pub async fn require_student(
    State(config): State<Arc<AttendanceConfig>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AttendanceError> {
    let student_id = resolve_student(req.headers(), &config)?;
    req.extensions_mut().insert(student_id);
    Ok(next.run(req).await)
}

fn resolve_student(
    headers: &axum::http::HeaderMap,
    config: &AttendanceConfig,
) -> Result<StudentId, AttendanceError> {
    let token = extract_token(headers, &config.identity_cookie_name)
        .ok_or(AttendanceError::Unauthenticated)?;

    let subject = verify_identity(&token, &config.identity_secret).map_err(|e| {
        tracing::debug!(error = %e, "Identity token rejected");
        AttendanceError::Unauthenticated
    })?;

    subject
        .parse::<StudentId>()
        .map_err(|_| AttendanceError::Unauthenticated)
}
