use std::collections::HashMap;
use std::sync::Arc;

use crate::{error::EngineError, store::RecordStore};

pub mod aggregate;
pub mod join;
pub mod metrics;
pub mod predicates;
pub mod rank;
pub mod report;
pub mod roles;
pub mod scope;
pub mod window;

#[cfg(test)]
mod window_tests;

use join::Session;
use predicates::AttendanceFilter;
use report::{AttendanceSummary, GroupRanking, OrgGroupSummary, SessionDetail, UserSummary};
use roles::{ROLE_BACK_OFFICE_HEAD, ROLE_MANAGER, ROLE_TEAM_LEADER, RoleGroup, RoleTable, title_case};
use scope::Scope;
use window::DateWindow;

/// The analytics engine: a record store behind a trait plus a role table.
///
/// Every query runs the same pipeline over plain record sequences: fetch,
/// join records to users, tag each session, optionally pre-filter, then
/// group and normalize. All derivation happens here, nothing in the store.
pub struct Analytics {
    store: Arc<dyn RecordStore>,
    roles: RoleTable,
}

impl Analytics {
    pub fn new(store: Arc<dyn RecordStore>, roles: RoleTable) -> Self {
        Self { store, roles }
    }

    async fn sessions_in(
        &self,
        scope: &Scope,
        window: &DateWindow,
        filter: AttendanceFilter,
    ) -> Result<Vec<Session>, EngineError> {
        let records = self.store.fetch_attendance(scope, window).await?;
        let users = self.store.fetch_users(scope).await?;
        let sessions = join::join_users(records, &users);
        Ok(aggregate::prefilter(sessions, filter))
    }

    /// Scoped counts for the window, each normalized against the scoped
    /// workday total.
    pub async fn attendance_summary(
        &self,
        scope: &Scope,
        window: DateWindow,
    ) -> Result<AttendanceSummary, EngineError> {
        let sessions = self
            .sessions_in(scope, &window, AttendanceFilter::All)
            .await?;
        let schedules = self.store.fetch_schedules(scope, &window).await?;
        let tally = aggregate::tally_all(&sessions);
        let expected = aggregate::expected_total(&schedules);
        Ok(AttendanceSummary {
            total_expected: expected,
            attendance: metrics::metric(tally.total, expected),
            late: metrics::metric(tally.late, expected),
            undertime: metrics::metric(tally.undertime, expected),
            over_break: metrics::metric(tally.over_break, expected),
        })
    }

    /// One row per organization-and-tier cell, tier order first, then
    /// organization id with the no-organization cell leading.
    pub async fn attendance_per_organization(
        &self,
        scope: &Scope,
        window: DateWindow,
    ) -> Result<Vec<OrgGroupSummary>, EngineError> {
        let sessions = self
            .sessions_in(scope, &window, AttendanceFilter::All)
            .await?;
        let schedules = self.store.fetch_schedules(scope, &window).await?;
        let organizations = self.store.fetch_organizations().await?;
        let names: HashMap<u64, String> = organizations
            .into_iter()
            .map(|organization| (organization.id, organization.name))
            .collect();

        let rows = aggregate::tally_by_org_group(&sessions, &self.roles)
            .into_iter()
            .map(|((role_group, organization_id), cell)| {
                let expected = aggregate::expected_for_users(&schedules, &cell.user_ids);
                let tally = cell.tally;
                OrgGroupSummary {
                    organization_id,
                    organization_name: organization_id.and_then(|id| names.get(&id).cloned()),
                    role_group,
                    total_expected: expected,
                    total_attendance: tally.total,
                    attendance_percentage: metrics::percentage(tally.total, expected),
                    late: tally.late,
                    late_percentage: metrics::percentage(tally.late, expected),
                    undertime: tally.undertime,
                    undertime_percentage: metrics::percentage(tally.undertime, expected),
                    over_breaks: tally.over_break,
                    over_break_percentage: metrics::percentage(tally.over_break, expected),
                }
            })
            .collect();
        Ok(rows)
    }

    /// Per-user counts, most sessions first. Equal totals keep ascending
    /// user id from the grouping stage.
    pub async fn attendance_users(
        &self,
        scope: &Scope,
        window: DateWindow,
        filter: AttendanceFilter,
    ) -> Result<Vec<UserSummary>, EngineError> {
        let sessions = self.sessions_in(scope, &window, filter).await?;
        let mut rows: Vec<UserSummary> = aggregate::tally_by_user(&sessions)
            .into_values()
            .map(|cell| UserSummary {
                user_id: cell.user.id,
                name: cell.user.full_name(),
                email: cell.user.email.clone(),
                role: title_case(&cell.user.role),
                total: cell.tally.total,
                timed_in: cell.tally.timed_in,
                timed_out: cell.tally.timed_out,
                late: cell.tally.late,
                undertime: cell.tally.undertime,
                over_break: cell.tally.over_break,
            })
            .collect();
        rows.sort_by(|a, b| b.total.cmp(&a.total));
        Ok(rows)
    }

    /// Raw sessions for the drill-down view, newest first.
    pub async fn attendance_sessions(
        &self,
        scope: &Scope,
        window: DateWindow,
        filter: AttendanceFilter,
    ) -> Result<Vec<SessionDetail>, EngineError> {
        let mut sessions = self.sessions_in(scope, &window, filter).await?;
        sessions.sort_by(|a, b| {
            b.record
                .created_at
                .cmp(&a.record.created_at)
                .then(a.user.id.cmp(&b.user.id))
        });
        Ok(sessions
            .into_iter()
            .map(|session| SessionDetail {
                user_id: session.user.id,
                name: session.user.full_name(),
                email: session.user.email.clone(),
                role: title_case(&session.user.role),
                created_at: session.record.created_at,
                time_in: session.record.time_in,
                time_out: session.record.time_out,
                shift_start: session.record.shift_start,
                shift_end: session.record.shift_end,
                break_start: session.record.break_start,
                break_end: session.record.break_end,
                status: session.record.status,
            })
            .collect())
    }

    /// Top three scored users per ranked tier over the window.
    pub async fn top_performers(
        &self,
        scope: &Scope,
        window: DateWindow,
    ) -> Result<Vec<GroupRanking>, EngineError> {
        let sessions = self
            .sessions_in(scope, &window, AttendanceFilter::All)
            .await?;
        Ok(rank::top_three(&sessions, &self.roles))
    }

    /// Resolves a viewer into the scope they are allowed to see.
    ///
    /// Team leaders and back-office heads see their direct reports. A
    /// manager sees their own organization, which takes a store lookup; a
    /// manager the store does not know collapses to self-only and therefore
    /// empty results rather than everything. Admin-tier roles see all, any
    /// other role sees only itself. Without a viewer id the role cannot
    /// anchor to anyone, so no narrowing applies.
    pub async fn scope_for_viewer(
        &self,
        raw_role: Option<&str>,
        viewer_id: Option<u64>,
    ) -> Result<Scope, EngineError> {
        let Some(viewer_id) = viewer_id else {
            return Ok(Scope::unrestricted());
        };
        let Some(raw_role) = raw_role else {
            return Ok(Scope::unrestricted().user(viewer_id));
        };

        let role = raw_role.trim().to_lowercase();
        match role.as_str() {
            ROLE_TEAM_LEADER | ROLE_BACK_OFFICE_HEAD => {
                Ok(Scope::unrestricted().reports_of(viewer_id))
            }
            ROLE_MANAGER => {
                let organization_id = self
                    .store
                    .find_user(viewer_id)
                    .await?
                    .and_then(|user| user.organization_id);
                match organization_id {
                    Some(organization_id) => {
                        Ok(Scope::unrestricted().organization(organization_id))
                    }
                    None => Ok(Scope::unrestricted().user(viewer_id)),
                }
            }
            _ if self.roles.classify(&role) == RoleGroup::AdminManagement => {
                Ok(Scope::unrestricted())
            }
            _ => Ok(Scope::unrestricted().user(viewer_id)),
        }
    }

    /// Connectivity probe, surfaced at startup and for health checks.
    pub async fn ping(&self) -> Result<(), EngineError> {
        self.store.ping().await
    }
}
