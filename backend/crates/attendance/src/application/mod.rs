//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod attendance_history;
pub mod config;
pub mod record_attendance;

// Re-exports
pub use attendance_history::AttendanceHistoryUseCase;
pub use config::AttendanceConfig;
pub use record_attendance::{RecordAttendanceUseCase, ScanInput, ScanStage};
