use crate::analytics::metrics::Metric;
use crate::analytics::predicates::AttendanceFilter;
use crate::analytics::report::{
    AttendanceSummary, GroupRanking, OrgGroupSummary, ScoreEntry, SessionDetail, UserSummary,
};
use crate::analytics::roles::RoleGroup;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Insights API",
        version = "1.0.0",
        description = r#"
## Attendance Insights

Read-only analytics over attendance, schedule and user records.

### 🔹 Key Features
- **Summary Metrics**
  - Attendance, late, undertime and over-break counts with percentages of expected attendance
- **Organization Breakdown**
  - The same metrics per organization and role group
- **Per-User Reports**
  - Session counts per user, with single-dimension filters
- **Session Drill-Down**
  - Raw session records for auditing a number on any dashboard
- **Top Performers**
  - Composite score ranking, top three per role group

### 📅 Date Windows
Every route takes optional `startDate`/`endDate` (RFC 3339, inclusive).
Metric routes default to month-to-date; the ranking route defaults to the
full current calendar month.

### 📦 Response Format
- JSON-based RESTful responses

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::analytics::attendance_summary,
        crate::api::analytics::attendance_per_organization,
        crate::api::analytics::attendance_users,
        crate::api::analytics::attendance_sessions,
        crate::api::analytics::top_performers
    ),
    components(
        schemas(
            Metric,
            AttendanceFilter,
            RoleGroup,
            AttendanceSummary,
            OrgGroupSummary,
            UserSummary,
            SessionDetail,
            GroupRanking,
            ScoreEntry
        )
    ),
    tags(
        (name = "Attendance Analytics", description = "Attendance metric and ranking APIs"),
    )
)]
pub struct ApiDoc;
