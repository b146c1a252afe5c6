// src/analytics/window_tests.rs

#[cfg(test)]
mod tests {
    use crate::analytics::window::DateWindow;
    use crate::store::memory::ts;

    #[test]
    fn test_month_to_date_runs_from_first_of_month_to_now() {
        let now = ts("2025-03-15T10:30:00Z");
        let window = DateWindow::or_month_to_date(None, None, now);
        assert_eq!(window.start, ts("2025-03-01T00:00:00Z"));
        assert_eq!(window.end, now);
    }

    #[test]
    fn test_calendar_month_ends_on_last_second() {
        let window = DateWindow::or_calendar_month(None, None, ts("2025-03-15T10:30:00Z"));
        assert_eq!(window.start, ts("2025-03-01T00:00:00Z"));
        assert_eq!(window.end, ts("2025-03-31T23:59:59Z"));
    }

    #[test]
    fn test_calendar_month_handles_december_rollover() {
        let window = DateWindow::or_calendar_month(None, None, ts("2025-12-10T08:00:00Z"));
        assert_eq!(window.end, ts("2025-12-31T23:59:59Z"));
    }

    #[test]
    fn test_calendar_month_handles_february() {
        let window = DateWindow::or_calendar_month(None, None, ts("2024-02-10T08:00:00Z"));
        assert_eq!(
            window.end,
            ts("2024-02-29T23:59:59Z"),
            "2024 is a leap year"
        );
    }

    #[test]
    fn test_explicit_bounds_are_kept() {
        let start = ts("2025-01-05T00:00:00Z");
        let end = ts("2025-01-10T23:59:59Z");
        let window = DateWindow::or_month_to_date(Some(start), Some(end), ts("2025-03-15T00:00:00Z"));
        assert_eq!(window, DateWindow::new(start, end));
    }

    #[test]
    fn test_missing_bounds_default_independently() {
        let now = ts("2025-03-15T10:30:00Z");
        let end = ts("2025-03-10T00:00:00Z");
        let window = DateWindow::or_month_to_date(None, Some(end), now);
        assert_eq!(window.start, ts("2025-03-01T00:00:00Z"));
        assert_eq!(window.end, end);

        let start = ts("2025-03-02T00:00:00Z");
        let window = DateWindow::or_month_to_date(Some(start), None, now);
        assert_eq!(window.start, start);
        assert_eq!(window.end, now, "a missing end defaults to now, not month end");
    }

    #[test]
    fn test_contains_is_inclusive_on_both_ends() {
        let window = DateWindow::new(ts("2025-03-01T00:00:00Z"), ts("2025-03-31T23:59:59Z"));
        assert!(window.contains(ts("2025-03-01T00:00:00Z")));
        assert!(window.contains(ts("2025-03-31T23:59:59Z")));
        assert!(window.contains(ts("2025-03-15T12:00:00Z")));
        assert!(!window.contains(ts("2025-02-28T23:59:59Z")));
        assert!(!window.contains(ts("2025-04-01T00:00:00Z")));
    }
}
