use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged work session for one user on one day.
///
/// `time_in`/`time_out` and the break pair are nullable: a session may still
/// be open, or may have been logged without a break. Shift boundaries always
/// come from the roster and are never null. Upstream data quality is not this
/// crate's concern; a `time_out` before `time_in` is stored and reported
/// unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: u64,
    pub user_id: u64,
    /// The day this session belongs to.
    pub created_at: DateTime<Utc>,
    pub time_in: Option<DateTime<Utc>>,
    pub time_out: Option<DateTime<Utc>>,
    pub shift_start: DateTime<Utc>,
    pub shift_end: DateTime<Utc>,
    pub break_start: Option<DateTime<Utc>>,
    pub break_end: Option<DateTime<Utc>>,
    /// Free-text state label, e.g. "On Break", "On Lunch".
    pub status: Option<String>,
}
