//! Attendance Backend Module
//!
//! Verifies QR-code attendance scans and records the result.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, geofence math, repository and
//!   geolocation traits
//! - `application/` - Use cases (record attendance, attendance history)
//! - `infra/` - PostgreSQL implementation of the repositories
//! - `presentation/` - HTTP handlers, DTOs, identity middleware, router
//!
//! ## Verification pipeline
//! A scan moves strictly forward through five stages and stops at the first
//! failure:
//! 1. token format check (canonical hyphenated UUID)
//! 2. session lookup (must exist, be active, and not yet expired)
//! 3. enrollment check (caller must be enrolled in the session's class)
//! 4. geofence (only when the session requires location)
//! 5. record insert (one record per session and student)
//!
//! Nothing is written unless all earlier stages pass.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AttendanceConfig;
pub use error::{AttendanceError, AttendanceResult, RejectionKind};
pub use infra::postgres::PgAttendanceRepository;
pub use presentation::router::attendance_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAttendanceRepository as AttendanceStore;
}
