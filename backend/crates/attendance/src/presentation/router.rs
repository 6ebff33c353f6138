//! Attendance Router

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::application::config::AttendanceConfig;
use crate::domain::repository::{
    AttendanceRecordRepository, EnrollmentRepository, SessionRepository,
};
use crate::infra::postgres::PgAttendanceRepository;
use crate::presentation::handlers::{self, AttendanceAppState};
use crate::presentation::middleware::require_student;

/// Create the attendance router with PostgreSQL repository
pub fn attendance_router(repo: PgAttendanceRepository, config: AttendanceConfig) -> Router {
    attendance_router_generic(repo, config)
}

/// Create a generic attendance router for any repository implementation
pub fn attendance_router_generic<R>(repo: R, config: AttendanceConfig) -> Router
where
    R: SessionRepository
        + EnrollmentRepository
        + AttendanceRecordRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let config = Arc::new(config);
    let state = AttendanceAppState {
        repo: Arc::new(repo),
        config: config.clone(),
    };

    Router::new()
        .route("/scan", post(handlers::scan::<R>))
        .route("/history", get(handlers::history::<R>))
        .route_layer(middleware::from_fn_with_state(config, require_student))
        .with_state(state)
}
