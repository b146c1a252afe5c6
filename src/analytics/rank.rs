use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use super::{
    aggregate::{self, Tally},
    join::Session,
    report::{GroupRanking, ScoreEntry},
    roles::{RoleGroup, RoleTable, title_case},
};

/// Composite performance score over raw counts, never percentages. A late or
/// undertime session costs double what an over-break does, and the result
/// can go negative.
pub fn score(tally: &Tally) -> i64 {
    tally.total - 2 * tally.late - 2 * tally.undertime - tally.over_break
}

/// Top three scored users per ranked tier.
///
/// Every ranked tier appears in the output in tier order even when empty, so
/// consumers can render a fixed set of panels. `Other` users are counted by
/// the aggregates but never ranked. Ties on score break by raw attendance
/// count; beyond that the ascending-id iteration order of the per-user
/// grouping keeps the result deterministic.
pub fn top_three(sessions: &[Session], roles: &RoleTable) -> Vec<GroupRanking> {
    let mut per_group: BTreeMap<RoleGroup, Vec<ScoreEntry>> = RoleGroup::iter()
        .filter(|group| *group != RoleGroup::Other)
        .map(|group| (group, Vec::new()))
        .collect();

    for cell in aggregate::tally_by_user(sessions).into_values() {
        let group = roles.classify(&cell.user.role);
        let Some(entries) = per_group.get_mut(&group) else {
            continue;
        };
        entries.push(ScoreEntry {
            user_id: cell.user.id,
            name: cell.user.full_name(),
            email: cell.user.email.clone(),
            role: title_case(&cell.user.role),
            score: score(&cell.tally),
            total: cell.tally.total,
            late: cell.tally.late,
            undertime: cell.tally.undertime,
            over_break: cell.tally.over_break,
        });
    }

    per_group
        .into_iter()
        .map(|(role_group, mut entries)| {
            entries.sort_by(|a, b| b.score.cmp(&a.score).then(b.total.cmp(&a.total)));
            entries.truncate(3);
            GroupRanking { role_group, top3: entries }
        })
        .collect()
}
