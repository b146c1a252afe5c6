use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::debug;

use crate::{
    analytics::{scope::Scope, window::DateWindow},
    error::EngineError,
    model::{
        attendance::AttendanceRecord, organization::Organization, schedule::ScheduleRecord,
        user::UserRecord,
    },
};

use super::RecordStore;

const USER_COLUMNS: &str =
    "u.id, u.first_name, u.last_name, u.email, u.role, u.organization_id, u.team_leader_id";

/// MySQL-backed record store. Queries are built at runtime from the scope,
/// with every value bound as a parameter.
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

// Typed values collected while a WHERE clause is assembled, bound in the
// same order the placeholders were pushed.
enum BindValue {
    U64(u64),
    Text(String),
}

/// Appends the scope's conditions against the users table (aliased `u`) to a
/// WHERE clause under construction.
fn push_scope_sql(scope: &Scope, where_sql: &mut String, args: &mut Vec<BindValue>) {
    if let Some(organization_id) = scope.organization_id {
        where_sql.push_str(" AND u.organization_id = ?");
        args.push(BindValue::U64(organization_id));
    }
    if let Some(raw_roles) = &scope.raw_roles {
        if raw_roles.is_empty() {
            // A role set with no members matches nothing.
            where_sql.push_str(" AND 1 = 0");
        } else {
            let placeholders = vec!["?"; raw_roles.len()].join(", ");
            where_sql.push_str(&format!(" AND u.role IN ({placeholders})"));
            args.extend(raw_roles.iter().cloned().map(BindValue::Text));
        }
    }
    if let Some(team_leader_id) = scope.team_leader_id {
        where_sql.push_str(" AND u.team_leader_id = ?");
        args.push(BindValue::U64(team_leader_id));
    }
    if let Some(user_id) = scope.user_id {
        where_sql.push_str(" AND u.id = ?");
        args.push(BindValue::U64(user_id));
    }
}

#[async_trait]
impl RecordStore for MySqlStore {
    async fn fetch_attendance(
        &self,
        scope: &Scope,
        window: &DateWindow,
    ) -> Result<Vec<AttendanceRecord>, EngineError> {
        let mut where_sql = String::from(" WHERE a.created_at BETWEEN ? AND ?");
        let mut args: Vec<BindValue> = Vec::new();
        push_scope_sql(scope, &mut where_sql, &mut args);

        let sql = format!(
            "SELECT a.id, a.user_id, a.created_at, a.time_in, a.time_out, \
             a.shift_start, a.shift_end, a.break_start, a.break_end, a.status \
             FROM attendance_records a \
             INNER JOIN users u ON u.id = a.user_id{where_sql}"
        );
        debug!(sql = %sql, "Fetching attendance records");

        let mut query = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(window.start)
            .bind(window.end);
        for arg in &args {
            query = match arg {
                BindValue::U64(value) => query.bind(*value),
                BindValue::Text(value) => query.bind(value.clone()),
            };
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn fetch_schedules(
        &self,
        scope: &Scope,
        window: &DateWindow,
    ) -> Result<Vec<ScheduleRecord>, EngineError> {
        let mut where_sql = String::from(" WHERE s.date BETWEEN ? AND ?");
        let mut args: Vec<BindValue> = Vec::new();
        push_scope_sql(scope, &mut where_sql, &mut args);

        let sql = format!(
            "SELECT s.id, s.user_id, s.date, s.entry_type \
             FROM schedules s \
             INNER JOIN users u ON u.id = s.user_id{where_sql}"
        );
        debug!(sql = %sql, "Fetching schedule entries");

        let mut query = sqlx::query_as::<_, ScheduleRecord>(&sql)
            .bind(window.start)
            .bind(window.end);
        for arg in &args {
            query = match arg {
                BindValue::U64(value) => query.bind(*value),
                BindValue::Text(value) => query.bind(value.clone()),
            };
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn fetch_users(&self, scope: &Scope) -> Result<Vec<UserRecord>, EngineError> {
        let mut where_sql = String::from(" WHERE 1 = 1");
        let mut args: Vec<BindValue> = Vec::new();
        push_scope_sql(scope, &mut where_sql, &mut args);

        let sql = format!("SELECT {USER_COLUMNS} FROM users u{where_sql}");
        debug!(sql = %sql, "Fetching users");

        let mut query = sqlx::query_as::<_, UserRecord>(&sql);
        for arg in &args {
            query = match arg {
                BindValue::U64(value) => query.bind(*value),
                BindValue::Text(value) => query.bind(value.clone()),
            };
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn find_user(&self, user_id: u64) -> Result<Option<UserRecord>, EngineError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = ?");
        Ok(sqlx::query_as::<_, UserRecord>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn fetch_organizations(&self) -> Result<Vec<Organization>, EngineError> {
        Ok(
            sqlx::query_as::<_, Organization>("SELECT id, name FROM organizations ORDER BY id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn ping(&self) -> Result<(), EngineError> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
