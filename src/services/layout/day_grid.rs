//! Month day-grid derivation.
//!
//! The calendar shows one month at a time, padded out to whole weeks so
//! the grid is always a multiple of seven consecutive days. Weeks start
//! on Monday. The grid is derived from the navigation cursor on every
//! render and owns no state.

use chrono::{Datelike, Duration, NaiveDate};

/// Number of columns in every week row.
pub const DAYS_PER_WEEK: usize = 7;

/// First day of the month containing `cursor`.
pub fn month_start(cursor: NaiveDate) -> NaiveDate {
    cursor.with_day(1).unwrap()
}

/// Last day of the month containing `cursor`.
pub fn month_end(cursor: NaiveDate) -> NaiveDate {
    let first = month_start(cursor);
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1).unwrap()
    };
    next_month - Duration::days(1)
}

/// Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(offset)
}

/// The ordered list of consecutive days shown for the month containing
/// `cursor`: from the Monday on or before the 1st through the Sunday on
/// or after the last day. Always a multiple of [`DAYS_PER_WEEK`] long.
pub fn month_grid(cursor: NaiveDate) -> Vec<NaiveDate> {
    let first = week_start(month_start(cursor));
    let month_last = month_end(cursor);
    let last = week_start(month_last) + Duration::days(DAYS_PER_WEEK as i64 - 1);

    let mut days = Vec::new();
    let mut day = first;
    while day <= last {
        days.push(day);
        day += Duration::days(1);
    }
    days
}

/// Iterate the grid as week rows of [`DAYS_PER_WEEK`] days.
pub fn week_rows(grid: &[NaiveDate]) -> impl Iterator<Item = &[NaiveDate]> {
    grid.chunks(DAYS_PER_WEEK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use test_case::test_case;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_case(ymd(2025, 10, 15), ymd(2025, 10, 1), ymd(2025, 10, 31); "mid october")]
    #[test_case(ymd(2025, 12, 31), ymd(2025, 12, 1), ymd(2025, 12, 31); "december wraps year")]
    #[test_case(ymd(2024, 2, 10), ymd(2024, 2, 1), ymd(2024, 2, 29); "leap february")]
    fn test_month_bounds(cursor: NaiveDate, first: NaiveDate, last: NaiveDate) {
        assert_eq!(month_start(cursor), first);
        assert_eq!(month_end(cursor), last);
    }

    #[test]
    fn test_week_start_is_monday() {
        // Wednesday Oct 15, 2025 -> Monday Oct 13
        assert_eq!(week_start(ymd(2025, 10, 15)), ymd(2025, 10, 13));
        // Monday maps to itself
        assert_eq!(week_start(ymd(2025, 10, 13)), ymd(2025, 10, 13));
        // Sunday maps back six days
        assert_eq!(week_start(ymd(2025, 10, 19)), ymd(2025, 10, 13));
    }

    #[test]
    fn test_month_grid_october_2025() {
        // October 2025: Wed Oct 1 .. Fri Oct 31, padded Mon Sep 29 .. Sun Nov 2
        let grid = month_grid(ymd(2025, 10, 15));

        assert_eq!(grid.first().copied(), Some(ymd(2025, 9, 29)));
        assert_eq!(grid.last().copied(), Some(ymd(2025, 11, 2)));
        assert_eq!(grid.len(), 35);
        assert_eq!(grid.len() % DAYS_PER_WEEK, 0);
        assert_eq!(grid[0].weekday(), Weekday::Mon);
    }

    #[test]
    fn test_month_grid_days_are_consecutive() {
        let grid = month_grid(ymd(2025, 2, 1));
        for pair in grid.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn test_week_rows_chunking() {
        let grid = month_grid(ymd(2025, 10, 15));
        let weeks: Vec<&[NaiveDate]> = week_rows(&grid).collect();

        assert_eq!(weeks.len(), 5);
        for week in &weeks {
            assert_eq!(week.len(), DAYS_PER_WEEK);
            assert_eq!(week[0].weekday(), Weekday::Mon);
            assert_eq!(week[6].weekday(), Weekday::Sun);
        }
    }

    #[test]
    fn test_month_fitting_exactly_in_weeks() {
        // February 2027 runs Mon Feb 1 .. Sun Feb 28, exactly 4 weeks
        // with no padding at either end.
        let grid = month_grid(ymd(2027, 2, 14));
        assert_eq!(grid.first().copied(), Some(ymd(2027, 2, 1)));
        assert_eq!(grid.last().copied(), Some(ymd(2027, 2, 28)));
        assert_eq!(grid.len(), 28);
    }
}
