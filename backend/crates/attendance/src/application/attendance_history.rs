//! Attendance History Use Case

use std::sync::Arc;

use kernel::id::StudentId;

use crate::application::config::AttendanceConfig;
use crate::domain::entities::AttendanceRecord;
use crate::domain::repository::AttendanceRecordRepository;
use crate::error::AttendanceResult;

/// Lists the caller's own attendance records, newest first
pub struct AttendanceHistoryUseCase<A>
where
    A: AttendanceRecordRepository,
{
    record_repo: Arc<A>,
    config: Arc<AttendanceConfig>,
}

impl<A> AttendanceHistoryUseCase<A>
where
    A: AttendanceRecordRepository + Sync,
{
    pub fn new(record_repo: Arc<A>, config: Arc<AttendanceConfig>) -> Self {
        Self {
            record_repo,
            config,
        }
    }

    pub async fn execute(&self, student_id: StudentId) -> AttendanceResult<Vec<AttendanceRecord>> {
        let records = self
            .record_repo
            .list_for_student(student_id, self.config.history_limit)
            .await?;

        tracing::debug!(
            student_id = %student_id,
            count = records.len(),
            "Loaded attendance history"
        );

        Ok(records)
    }
}
