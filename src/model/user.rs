use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Raw role identifier, hyphen-delimited lowercase (e.g. "team-leader").
    pub role: String,
    pub organization_id: Option<u64>,
    pub team_leader_id: Option<u64>,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
