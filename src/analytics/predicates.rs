use chrono::Duration;
use serde::Deserialize;
use strum_macros::Display;
use utoipa::ToSchema;

use super::join::Session;

/// A break longer than this counts as an over-break.
pub const OVER_BREAK_LIMIT_MINUTES: i64 = 90;

/// Status labels a session can carry while a break is in progress.
pub const STATUS_ON_BREAK: &str = "On Break";
pub const STATUS_ON_LUNCH: &str = "On Lunch";

/// Per-session derived facts. The flags are independent and non-exclusive:
/// one session can be late, undertime and over-break at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionFlags {
    pub late: bool,
    pub undertime: bool,
    pub over_break: bool,
}

impl SessionFlags {
    /// Tags one session.
    ///
    /// A missing punch never sets a flag: absence is its own category, not
    /// lateness. Clocking in exactly at shift start is on time, and a break
    /// with no recorded end is still in progress, so its length is unknown.
    /// Inverted timestamps are not screened out; the comparisons just run.
    pub fn evaluate(session: &Session) -> Self {
        let record = &session.record;
        let late = record
            .time_in
            .map(|at| at > record.shift_start)
            .unwrap_or(false);
        let undertime = record
            .time_out
            .map(|at| at < record.shift_end)
            .unwrap_or(false);
        let over_break = match (record.break_start, record.break_end) {
            (Some(start), Some(end)) => end - start > Duration::minutes(OVER_BREAK_LIMIT_MINUTES),
            _ => false,
        };
        Self {
            late,
            undertime,
            over_break,
        }
    }
}

/// Single-dimension pre-filter applied to the session sequence before any
/// grouping, so every downstream count is a count of matching sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, ToSchema)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum AttendanceFilter {
    #[default]
    All,
    TimeIn,
    TimeOut,
    Late,
    OnBreak,
    OnLunch,
    Undertime,
}

impl AttendanceFilter {
    pub fn keeps(&self, session: &Session, flags: SessionFlags) -> bool {
        let record = &session.record;
        match self {
            Self::All => true,
            Self::TimeIn => record.time_in.is_some(),
            Self::TimeOut => record.time_out.is_some(),
            Self::Late => flags.late,
            Self::OnBreak => record.status.as_deref() == Some(STATUS_ON_BREAK),
            Self::OnLunch => record.status.as_deref() == Some(STATUS_ON_LUNCH),
            Self::Undertime => flags.undertime,
        }
    }
}
