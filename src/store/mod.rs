use async_trait::async_trait;

use crate::{
    analytics::{scope::Scope, window::DateWindow},
    error::EngineError,
    model::{
        attendance::AttendanceRecord, organization::Organization, schedule::ScheduleRecord,
        user::UserRecord,
    },
};

#[cfg(test)]
pub mod memory;
pub mod mysql;

/// Read-only boundary over the record store.
///
/// Implementations return plain record sequences already narrowed to the
/// window and scope. Joining, tagging and grouping stay in the engine, so a
/// relational, document or in-memory backend can all sit behind this trait
/// without knowing what late or undertime mean.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Attendance records whose `created_at` lies in the closed window and
    /// whose owner matches the scope.
    async fn fetch_attendance(
        &self,
        scope: &Scope,
        window: &DateWindow,
    ) -> Result<Vec<AttendanceRecord>, EngineError>;

    /// Schedule entries in the window for scoped users. All entry types;
    /// the workday filter is the aggregator's job.
    async fn fetch_schedules(
        &self,
        scope: &Scope,
        window: &DateWindow,
    ) -> Result<Vec<ScheduleRecord>, EngineError>;

    /// Users matching the scope, the right side of the join stage.
    async fn fetch_users(&self, scope: &Scope) -> Result<Vec<UserRecord>, EngineError>;

    /// Single-user lookup, used to resolve a viewer into a scope.
    async fn find_user(&self, user_id: u64) -> Result<Option<UserRecord>, EngineError>;

    async fn fetch_organizations(&self) -> Result<Vec<Organization>, EngineError>;

    /// Connectivity probe for the startup health task.
    async fn ping(&self) -> Result<(), EngineError>;
}
