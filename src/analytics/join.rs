use std::collections::HashMap;

use crate::model::{attendance::AttendanceRecord, user::UserRecord};

/// An attendance record paired with its owner. The join is an engine stage
/// rather than a store concern, so any adapter only ever returns flat record
/// sequences.
#[derive(Debug, Clone)]
pub struct Session {
    pub record: AttendanceRecord,
    pub user: UserRecord,
}

/// Joins records to users by `user_id`. A record pointing at a user absent
/// from `users` is dropped: it cannot be attributed to any scope or tier.
pub fn join_users(records: Vec<AttendanceRecord>, users: &[UserRecord]) -> Vec<Session> {
    let by_id: HashMap<u64, &UserRecord> = users.iter().map(|user| (user.id, user)).collect();
    let mut dangling = 0usize;
    let sessions: Vec<Session> = records
        .into_iter()
        .filter_map(|record| match by_id.get(&record.user_id) {
            Some(user) => Some(Session {
                record,
                user: (*user).clone(),
            }),
            None => {
                dangling += 1;
                None
            }
        })
        .collect();
    if dangling > 0 {
        tracing::debug!(dangling, "Dropped attendance records with no owning user");
    }
    sessions
}
