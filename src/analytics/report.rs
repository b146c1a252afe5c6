use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{metrics::Metric, roles::RoleGroup};

/// Global metrics for one window and scope: expected attendance plus each
/// count with its share of expected.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    #[schema(example = 40)]
    pub total_expected: i64,
    pub attendance: Metric,
    pub late: Metric,
    pub undertime: Metric,
    pub over_break: Metric,
}

/// One organization-and-tier cell of the grouped report.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrgGroupSummary {
    /// `null` when the cell collects users with no organization.
    #[schema(example = 7)]
    pub organization_id: Option<u64>,
    #[schema(example = "Night Shift BPO")]
    pub organization_name: Option<String>,
    pub role_group: RoleGroup,
    pub total_expected: i64,
    pub total_attendance: i64,
    pub attendance_percentage: f64,
    pub late: i64,
    pub late_percentage: f64,
    pub undertime: i64,
    pub undertime_percentage: f64,
    pub over_breaks: i64,
    pub over_break_percentage: f64,
}

/// Per-user counts for the roster table view.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: u64,
    #[schema(example = "Maria Santos")]
    pub name: String,
    #[schema(example = "maria.santos@corp.test")]
    pub email: String,
    /// Title-cased display role, e.g. "Team Leader".
    #[schema(example = "Team Leader")]
    pub role: String,
    pub total: i64,
    pub timed_in: i64,
    pub timed_out: i64,
    pub late: i64,
    pub undertime: i64,
    pub over_break: i64,
}

/// One raw session for the drill-down view: the record's own fields plus the
/// owner's display fields, nothing derived.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetail {
    pub user_id: u64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub time_in: Option<DateTime<Utc>>,
    pub time_out: Option<DateTime<Utc>>,
    pub shift_start: DateTime<Utc>,
    pub shift_end: DateTime<Utc>,
    pub break_start: Option<DateTime<Utc>>,
    pub break_end: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

/// One scored user in a ranking.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub user_id: u64,
    pub name: String,
    pub email: String,
    pub role: String,
    /// May go negative for a user whose deductions outweigh attendance.
    #[schema(example = 14)]
    pub score: i64,
    pub total: i64,
    pub late: i64,
    pub undertime: i64,
    pub over_break: i64,
}

/// Ranking for one tier. Always emitted for every ranked tier, with `top3`
/// empty when nobody in the tier had a session.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupRanking {
    pub role_group: RoleGroup,
    pub top3: Vec<ScoreEntry>,
}
