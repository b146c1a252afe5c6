use std::collections::{BTreeMap, BTreeSet};

use crate::model::{schedule::ScheduleRecord, user::UserRecord};

use super::{
    join::Session,
    predicates::{AttendanceFilter, SessionFlags},
    roles::{RoleGroup, RoleTable},
};

/// Raw counts for one aggregation cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: i64,
    pub late: i64,
    pub undertime: i64,
    pub over_break: i64,
    pub timed_in: i64,
    pub timed_out: i64,
}

impl Tally {
    pub fn record(&mut self, session: &Session, flags: SessionFlags) {
        self.total += 1;
        if flags.late {
            self.late += 1;
        }
        if flags.undertime {
            self.undertime += 1;
        }
        if flags.over_break {
            self.over_break += 1;
        }
        if session.record.time_in.is_some() {
            self.timed_in += 1;
        }
        if session.record.time_out.is_some() {
            self.timed_out += 1;
        }
    }
}

/// Narrows the joined sequence to sessions matching `filter`. Runs before
/// grouping, so every downstream count is a count of matching sessions.
pub fn prefilter(sessions: Vec<Session>, filter: AttendanceFilter) -> Vec<Session> {
    if filter == AttendanceFilter::All {
        return sessions;
    }
    sessions
        .into_iter()
        .filter(|session| filter.keeps(session, SessionFlags::evaluate(session)))
        .collect()
}

/// One tally over everything in scope.
pub fn tally_all(sessions: &[Session]) -> Tally {
    let mut tally = Tally::default();
    for session in sessions {
        tally.record(session, SessionFlags::evaluate(session));
    }
    tally
}

/// Cell of the organization-by-tier grouping.
#[derive(Debug, Clone, Default)]
pub struct GroupCell {
    pub tally: Tally,
    /// Distinct users observed in this cell's records. The cell's expected
    /// attendance is counted over exactly this set, so a rostered user with
    /// no sessions at all contributes to no cell denominator.
    pub user_ids: BTreeSet<u64>,
}

/// Groups sessions by `(tier, organization)`. Users without an organization
/// keep a `None` key instead of being dropped, so the cells still sum to the
/// grand total. The key order makes iteration come out tier-first.
pub fn tally_by_org_group(
    sessions: &[Session],
    roles: &RoleTable,
) -> BTreeMap<(RoleGroup, Option<u64>), GroupCell> {
    let mut cells: BTreeMap<(RoleGroup, Option<u64>), GroupCell> = BTreeMap::new();
    for session in sessions {
        let key = (
            roles.classify(&session.user.role),
            session.user.organization_id,
        );
        let cell = cells.entry(key).or_default();
        cell.tally.record(session, SessionFlags::evaluate(session));
        cell.user_ids.insert(session.user.id);
    }
    cells
}

/// Per-user cell: the user's display fields plus their counts.
#[derive(Debug, Clone)]
pub struct UserCell {
    pub user: UserRecord,
    pub tally: Tally,
}

/// Groups sessions by user. Keyed by id in a `BTreeMap` so iteration order
/// is deterministic for equal sort keys further down.
pub fn tally_by_user(sessions: &[Session]) -> BTreeMap<u64, UserCell> {
    let mut cells: BTreeMap<u64, UserCell> = BTreeMap::new();
    for session in sessions {
        let cell = cells.entry(session.user.id).or_insert_with(|| UserCell {
            user: session.user.clone(),
            tally: Tally::default(),
        });
        cell.tally.record(session, SessionFlags::evaluate(session));
    }
    cells
}

/// Expected attendance over a schedule slice: workday entries only. Rest
/// days and leave entries are rostered but carry no attendance obligation.
pub fn expected_total(schedules: &[ScheduleRecord]) -> i64 {
    schedules
        .iter()
        .filter(|schedule| schedule.is_workday())
        .count() as i64
}

/// Workday count restricted to a user set, the per-cell denominator.
pub fn expected_for_users(schedules: &[ScheduleRecord], user_ids: &BTreeSet<u64>) -> i64 {
    schedules
        .iter()
        .filter(|schedule| schedule.is_workday() && user_ids.contains(&schedule.user_id))
        .count() as i64
}
