use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entry type that counts toward expected attendance. Anything else
/// ("restday", "leave", typos…) is kept but never counted.
pub const WORKDAY: &str = "workday";

/// One expected-roster entry for one user on one day.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ScheduleRecord {
    pub id: u64,
    pub user_id: u64,
    /// The day this entry covers.
    pub date: DateTime<Utc>,
    pub entry_type: String,
}

impl ScheduleRecord {
    pub fn is_workday(&self) -> bool {
        self.entry_type == WORKDAY
    }
}
