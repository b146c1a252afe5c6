use serde::Serialize;
use utoipa::ToSchema;

/// A raw count and its share of expected attendance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct Metric {
    #[schema(example = 12)]
    pub count: i64,
    #[schema(example = 85.71)]
    pub percentage: f64,
}

/// `count` as a percentage of `expected`, rounded to two decimals and capped
/// at 100. Zero expected attendance is a legitimate state (nobody rostered
/// in the window) and yields exactly 0, never a NaN or an infinity.
pub fn percentage(count: i64, expected: i64) -> f64 {
    if expected <= 0 {
        return 0.0;
    }
    let raw = count as f64 * 100.0 / expected as f64;
    (raw.min(100.0) * 100.0).round() / 100.0
}

pub fn metric(count: i64, expected: i64) -> Metric {
    Metric {
        count,
        percentage: percentage(count, expected),
    }
}
