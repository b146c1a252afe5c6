use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    analytics::{scope::Scope, window::DateWindow},
    error::EngineError,
    model::{
        attendance::AttendanceRecord,
        organization::Organization,
        schedule::{ScheduleRecord, WORKDAY},
        user::UserRecord,
    },
};

use super::RecordStore;

/// In-memory store for tests: the same contract as the MySQL adapter over
/// plain vectors. Window and scope narrowing mirror the SQL, including the
/// inner join dropping records whose owner is missing.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub users: Vec<UserRecord>,
    pub organizations: Vec<Organization>,
    pub attendance: Vec<AttendanceRecord>,
    pub schedules: Vec<ScheduleRecord>,
}

impl MemoryStore {
    fn user(&self, user_id: u64) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.id == user_id)
    }

    fn owner_in_scope(&self, user_id: u64, scope: &Scope) -> bool {
        self.user(user_id)
            .map(|user| scope.permits(user))
            .unwrap_or(false)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_attendance(
        &self,
        scope: &Scope,
        window: &DateWindow,
    ) -> Result<Vec<AttendanceRecord>, EngineError> {
        Ok(self
            .attendance
            .iter()
            .filter(|record| window.contains(record.created_at))
            .filter(|record| self.owner_in_scope(record.user_id, scope))
            .cloned()
            .collect())
    }

    async fn fetch_schedules(
        &self,
        scope: &Scope,
        window: &DateWindow,
    ) -> Result<Vec<ScheduleRecord>, EngineError> {
        Ok(self
            .schedules
            .iter()
            .filter(|schedule| window.contains(schedule.date))
            .filter(|schedule| self.owner_in_scope(schedule.user_id, scope))
            .cloned()
            .collect())
    }

    async fn fetch_users(&self, scope: &Scope) -> Result<Vec<UserRecord>, EngineError> {
        Ok(self
            .users
            .iter()
            .filter(|user| scope.permits(user))
            .cloned()
            .collect())
    }

    async fn find_user(&self, user_id: u64) -> Result<Option<UserRecord>, EngineError> {
        Ok(self.user(user_id).cloned())
    }

    async fn fetch_organizations(&self) -> Result<Vec<Organization>, EngineError> {
        Ok(self.organizations.clone())
    }

    async fn ping(&self) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Store whose every call fails, for exercising the unavailable path.
pub struct FailingStore;

fn connection_lost() -> EngineError {
    EngineError::from(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl RecordStore for FailingStore {
    async fn fetch_attendance(
        &self,
        _scope: &Scope,
        _window: &DateWindow,
    ) -> Result<Vec<AttendanceRecord>, EngineError> {
        Err(connection_lost())
    }

    async fn fetch_schedules(
        &self,
        _scope: &Scope,
        _window: &DateWindow,
    ) -> Result<Vec<ScheduleRecord>, EngineError> {
        Err(connection_lost())
    }

    async fn fetch_users(&self, _scope: &Scope) -> Result<Vec<UserRecord>, EngineError> {
        Err(connection_lost())
    }

    async fn find_user(&self, _user_id: u64) -> Result<Option<UserRecord>, EngineError> {
        Err(connection_lost())
    }

    async fn fetch_organizations(&self) -> Result<Vec<Organization>, EngineError> {
        Err(connection_lost())
    }

    async fn ping(&self) -> Result<(), EngineError> {
        Err(connection_lost())
    }
}

// ------------------------- fixtures -------------------------

pub fn ts(value: &str) -> DateTime<Utc> {
    value.parse().expect("fixture timestamp should parse")
}

pub fn user(
    id: u64,
    first_name: &str,
    role: &str,
    organization_id: Option<u64>,
    team_leader_id: Option<u64>,
) -> UserRecord {
    UserRecord {
        id,
        first_name: first_name.to_string(),
        last_name: "Cruz".to_string(),
        email: format!("{}@corp.test", first_name.to_lowercase()),
        role: role.to_string(),
        organization_id,
        team_leader_id,
    }
}

pub fn organization(id: u64, name: &str) -> Organization {
    Organization {
        id,
        name: name.to_string(),
    }
}

/// A fully on-time session on `day` (e.g. "2025-03-03"): 09:00 to 18:00
/// shift, punches exactly on the boundaries, no break. Tests mutate fields
/// from here.
pub fn on_time_record(id: u64, user_id: u64, day: &str) -> AttendanceRecord {
    AttendanceRecord {
        id,
        user_id,
        created_at: ts(&format!("{day}T00:00:00Z")),
        time_in: Some(ts(&format!("{day}T09:00:00Z"))),
        time_out: Some(ts(&format!("{day}T18:00:00Z"))),
        shift_start: ts(&format!("{day}T09:00:00Z")),
        shift_end: ts(&format!("{day}T18:00:00Z")),
        break_start: None,
        break_end: None,
        status: None,
    }
}

pub fn workday(id: u64, user_id: u64, day: &str) -> ScheduleRecord {
    schedule_entry(id, user_id, day, WORKDAY)
}

pub fn schedule_entry(id: u64, user_id: u64, day: &str, entry_type: &str) -> ScheduleRecord {
    ScheduleRecord {
        id,
        user_id,
        date: ts(&format!("{day}T00:00:00Z")),
        entry_type: entry_type.to_string(),
    }
}

/// Shared fixture: two organizations, six users across every tier, seven
/// sessions and nine schedule entries, all inside March 2025. Eight of the
/// entries are workdays, so the unrestricted March summary reads seven of
/// eight attended with one late, one undertime and one over-break session.
pub fn sample_store() -> MemoryStore {
    let mut late_day = on_time_record(1, 1, "2025-03-03");
    late_day.time_in = Some(ts("2025-03-03T09:30:00Z"));
    late_day.break_start = Some(ts("2025-03-03T12:00:00Z"));
    late_day.break_end = Some(ts("2025-03-03T13:40:00Z"));

    let mut short_day = on_time_record(3, 2, "2025-03-03");
    short_day.time_out = Some(ts("2025-03-03T17:00:00Z"));

    let mut no_punch_day = on_time_record(7, 6, "2025-03-07");
    no_punch_day.time_in = None;
    no_punch_day.status = Some("On Lunch".to_string());

    MemoryStore {
        users: vec![
            user(1, "Ana", "agent", Some(1), Some(3)),
            user(2, "Ben", "agent", Some(1), Some(3)),
            user(3, "Carla", "team-leader", Some(1), None),
            user(4, "Dan", "manager", Some(2), None),
            user(5, "Eva", "admin", None, None),
            user(6, "Finn", "agent", Some(2), None),
        ],
        organizations: vec![organization(1, "Day Shift"), organization(2, "Night Shift")],
        attendance: vec![
            late_day,
            on_time_record(2, 1, "2025-03-04"),
            short_day,
            on_time_record(4, 3, "2025-03-05"),
            on_time_record(5, 4, "2025-03-05"),
            on_time_record(6, 5, "2025-03-06"),
            no_punch_day,
        ],
        schedules: vec![
            workday(1, 1, "2025-03-03"),
            workday(2, 1, "2025-03-04"),
            workday(3, 2, "2025-03-03"),
            workday(4, 2, "2025-03-04"),
            workday(5, 3, "2025-03-05"),
            workday(6, 4, "2025-03-05"),
            workday(7, 5, "2025-03-06"),
            workday(8, 6, "2025-03-07"),
            schedule_entry(9, 1, "2025-03-05", "restday"),
        ],
    }
}
