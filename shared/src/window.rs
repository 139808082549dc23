//! Time window resolution
//!
//! Windows are inclusive on both ends and expressed in UTC. A day runs from
//! `00:00:00` to `23:59:59.999999999`, so consecutive day windows neither
//! overlap nor leave gaps.
//!
//! Week windows are Monday through Sunday and always split into seven daily
//! sub-windows. Month windows are split into calendar weeks clipped to the
//! month: only the first and the last sub-window can be shorter than seven
//! days.

use crate::errors::{StatsError, StatsResult};
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Earliest calendar year accepted in any window
pub const MIN_YEAR: i32 = 1900;
/// Latest calendar year accepted in any window
pub const MAX_YEAR: i32 = 9999;

/// Size of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Week,
    Month,
    /// Caller-supplied or trailing range, never decomposed
    Range,
}

/// Look-back period of the trailing workout statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingRange {
    Week,
    #[default]
    Month,
    Year,
}

impl TrailingRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrailingRange::Week => "week",
            TrailingRange::Month => "month",
            TrailingRange::Year => "year",
        }
    }
}

impl fmt::Display for TrailingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TrailingRange {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(TrailingRange::Week),
            "month" => Ok(TrailingRange::Month),
            "year" => Ok(TrailingRange::Year),
            _ => Err(StatsError::invalid_range(format!(
                "range must be one of week, month, year, got '{}'",
                s
            ))),
        }
    }
}

/// An inclusive time range with an ordered, disjoint decomposition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub granularity: Granularity,
    pub sub_windows: Vec<TimeWindow>,
}

impl TimeWindow {
    /// Window spanning whole calendar days `[start_of(first), end_of(last)]`
    fn spanning(first: NaiveDate, last: NaiveDate, granularity: Granularity) -> Self {
        Self {
            start: start_of_day(first),
            end: end_of_day(last),
            granularity,
            sub_windows: Vec::new(),
        }
    }

    /// Whether `instant` falls inside the window, boundaries included
    #[inline]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Calendar date of the first instant
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Calendar date of the last instant
    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Weekday of the first instant
    pub fn weekday(&self) -> Weekday {
        self.start.weekday()
    }
}

/// First instant of a calendar day
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

/// Last representable instant of a calendar day
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1) - Duration::nanoseconds(1)
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Resolve a single calendar day
pub fn resolve_day(date: NaiveDate) -> TimeWindow {
    TimeWindow::spanning(date, date, Granularity::Day)
}

/// Resolve the Monday-Sunday week containing `reference`
pub fn resolve_week(reference: NaiveDate) -> TimeWindow {
    let monday = week_start(reference);
    let sunday = monday + Duration::days(6);

    let mut window = TimeWindow::spanning(monday, sunday, Granularity::Week);
    window.sub_windows = (0..7)
        .map(|offset| resolve_day(monday + Duration::days(offset)))
        .collect();
    window
}

/// Resolve a calendar month, split into clipped calendar weeks
pub fn resolve_month(month: u32, year: i32) -> StatsResult<TimeWindow> {
    if !(1..=12).contains(&month) {
        return Err(StatsError::invalid_range(format!(
            "month must be between 1 and 12, got {}",
            month
        )));
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(StatsError::invalid_range(format!(
            "year must be between {} and {}, got {}",
            MIN_YEAR, MAX_YEAR, year
        )));
    }

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| StatsError::invalid_range(format!("invalid month {}-{}", year, month)))?;
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1).ok_or_else(|| {
        StatsError::invalid_range(format!("invalid month {}-{}", next_year, next_month))
    })?;
    let last = next_first - Duration::days(1);

    let mut window = TimeWindow::spanning(first, last, Granularity::Month);
    let mut cursor = first;
    while cursor <= last {
        let sunday = cursor + Duration::days(6 - cursor.weekday().num_days_from_monday() as i64);
        let week_end = sunday.min(last);
        window
            .sub_windows
            .push(TimeWindow::spanning(cursor, week_end, Granularity::Week));
        cursor = week_end + Duration::days(1);
    }

    Ok(window)
}

/// Resolve a caller-supplied date range. Only totals are defined for such
/// windows, so no sub-windows are produced.
pub fn resolve_range(start: NaiveDate, end: NaiveDate) -> StatsResult<TimeWindow> {
    if start > end {
        return Err(StatsError::invalid_range(format!(
            "startDate {} is after endDate {}",
            start, end
        )));
    }
    Ok(TimeWindow::spanning(start, end, Granularity::Range))
}

/// Resolve the period ending at `now` and reaching back one week, one
/// calendar month or one calendar year. Month arithmetic clamps to the last
/// day of a shorter month (March 31 reaches back to February 29 or 28).
pub fn resolve_trailing(range: TrailingRange, now: DateTime<Utc>) -> StatsResult<TimeWindow> {
    let since = match range {
        TrailingRange::Week => now.checked_sub_signed(Duration::days(7)),
        TrailingRange::Month => now.checked_sub_months(Months::new(1)),
        TrailingRange::Year => now.checked_sub_months(Months::new(12)),
    }
    .ok_or_else(|| StatsError::invalid_range(format!("cannot reach back one {} from {}", range, now)))?;

    Ok(TimeWindow {
        start: since,
        end: now,
        granularity: Granularity::Range,
        sub_windows: Vec::new(),
    })
}

/// Reject windows whose last day lies past `MAX_YEAR`, which a week
/// starting in the final days of December 9999 would
pub fn ensure_supported(window: TimeWindow) -> StatsResult<TimeWindow> {
    let last = window.end_date();
    if last.year() > MAX_YEAR {
        return Err(StatsError::invalid_range(format!(
            "window {}..{} extends past year {}",
            window.start_date(),
            last,
            MAX_YEAR
        )));
    }
    Ok(window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_starts_on_monday() {
        // Wednesday 2024-03-06
        let window = resolve_week(date(2024, 3, 6));
        assert_eq!(window.start_date(), date(2024, 3, 4));
        assert_eq!(window.end_date(), date(2024, 3, 10));
        assert_eq!(window.weekday(), Weekday::Mon);
        assert_eq!(window.granularity, Granularity::Week);
    }

    #[test]
    fn test_week_has_seven_days() {
        let window = resolve_week(date(2025, 1, 5));
        assert_eq!(window.sub_windows.len(), 7);
        let weekdays: Vec<Weekday> = window.sub_windows.iter().map(|d| d.weekday()).collect();
        assert_eq!(
            weekdays,
            vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun
            ]
        );
        assert!(window.sub_windows.iter().all(|d| d.granularity == Granularity::Day));
    }

    #[test]
    fn test_end_of_day_is_inclusive() {
        let day = date(2024, 2, 29);
        let end = end_of_day(day);
        assert_eq!(end.date_naive(), day);
        assert_eq!(end + Duration::nanoseconds(1), start_of_day(date(2024, 3, 1)));
    }

    #[test]
    fn test_month_starting_mid_week_is_clipped() {
        // May 2024 starts on a Wednesday and ends on a Friday
        let window = resolve_month(5, 2024).unwrap();
        assert_eq!(window.start_date(), date(2024, 5, 1));
        assert_eq!(window.end_date(), date(2024, 5, 31));

        let spans: Vec<(NaiveDate, NaiveDate)> = window
            .sub_windows
            .iter()
            .map(|w| (w.start_date(), w.end_date()))
            .collect();
        assert_eq!(
            spans,
            vec![
                (date(2024, 5, 1), date(2024, 5, 5)),
                (date(2024, 5, 6), date(2024, 5, 12)),
                (date(2024, 5, 13), date(2024, 5, 19)),
                (date(2024, 5, 20), date(2024, 5, 26)),
                (date(2024, 5, 27), date(2024, 5, 31)),
            ]
        );
        assert_eq!(window.sub_windows[0].start, window.start);
    }

    #[test]
    fn test_month_aligned_to_weeks() {
        // February 2021 starts on a Monday and ends on a Sunday
        let window = resolve_month(2, 2021).unwrap();
        assert_eq!(window.sub_windows.len(), 4);
        assert!(window
            .sub_windows
            .iter()
            .all(|w| (w.end_date() - w.start_date()).num_days() == 6));
    }

    #[test]
    fn test_month_single_day_tail() {
        // September 2024 ends on a Monday
        let window = resolve_month(9, 2024).unwrap();
        let last = window.sub_windows.last().unwrap();
        assert_eq!(last.start_date(), date(2024, 9, 30));
        assert_eq!(last.end_date(), date(2024, 9, 30));
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let window = resolve_month(12, 2024).unwrap();
        assert_eq!(window.end_date(), date(2024, 12, 31));
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(matches!(resolve_month(0, 2024), Err(StatsError::InvalidRange(_))));
        assert!(matches!(resolve_month(13, 2024), Err(StatsError::InvalidRange(_))));
        assert!(matches!(resolve_month(6, 1800), Err(StatsError::InvalidRange(_))));
    }

    #[test]
    fn test_range_has_no_sub_windows() {
        let window = resolve_range(date(2024, 1, 10), date(2024, 1, 20)).unwrap();
        assert_eq!(window.granularity, Granularity::Range);
        assert!(window.sub_windows.is_empty());
        assert_eq!(window.start, start_of_day(date(2024, 1, 10)));
        assert_eq!(window.end, end_of_day(date(2024, 1, 20)));
    }

    #[test]
    fn test_single_day_range() {
        let day = date(2024, 1, 10);
        let window = resolve_range(day, day).unwrap();
        assert_eq!(window.start_date(), day);
        assert_eq!(window.end_date(), day);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = resolve_range(date(2024, 1, 20), date(2024, 1, 10));
        assert!(matches!(result, Err(StatsError::InvalidRange(_))));
    }

    #[test]
    fn test_day_window_spans_whole_day() {
        let day = date(2024, 3, 6);
        let window = resolve_day(day);
        assert_eq!(window.granularity, Granularity::Day);
        assert_eq!(window.start, start_of_day(day));
        assert_eq!(window.end, end_of_day(day));
        assert!(window.sub_windows.is_empty());
    }

    #[test]
    fn test_trailing_ranges_end_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();

        let week = resolve_trailing(TrailingRange::Week, now).unwrap();
        assert_eq!(week.start, Utc.with_ymd_and_hms(2024, 3, 24, 12, 0, 0).unwrap());
        assert_eq!(week.end, now);
        assert_eq!(week.granularity, Granularity::Range);

        // Clamped to the end of February in a leap year
        let month = resolve_trailing(TrailingRange::Month, now).unwrap();
        assert_eq!(month.start, Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap());

        let year = resolve_trailing(TrailingRange::Year, now).unwrap();
        assert_eq!(year.start, Utc.with_ymd_and_hms(2023, 3, 31, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_trailing_range_parse() {
        assert_eq!("week".parse::<TrailingRange>(), Ok(TrailingRange::Week));
        assert_eq!(TrailingRange::default(), TrailingRange::Month);
        assert!(matches!(
            "fortnight".parse::<TrailingRange>(),
            Err(StatsError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_week_crossing_max_year_rejected() {
        // Monday 9999-12-27, its Sunday falls in year 10000
        let last_week = resolve_week(date(9999, 12, 31));
        assert!(matches!(ensure_supported(last_week), Err(StatsError::InvalidRange(_))));

        let in_bounds = resolve_week(date(9999, 12, 26));
        assert_eq!(ensure_supported(in_bounds).unwrap().end_date(), date(9999, 12, 26));
        assert!(ensure_supported(resolve_month(12, 9999).unwrap()).is_ok());
    }

    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (1970i32..2100, 1u32..=366).prop_filter_map("valid ordinal", |(y, o)| {
            NaiveDate::from_yo_opt(y, o)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Daily sub-windows are disjoint, contiguous, and cover the week
        #[test]
        fn prop_week_days_partition_week(reference in arb_date()) {
            let window = resolve_week(reference);
            let days = &window.sub_windows;

            prop_assert_eq!(days.len(), 7);
            prop_assert_eq!(days[0].start, window.start);
            prop_assert_eq!(days[6].end, window.end);
            for pair in days.windows(2) {
                prop_assert!(pair[0].end < pair[1].start);
                prop_assert_eq!(pair[0].end + Duration::nanoseconds(1), pair[1].start);
            }
            prop_assert!(window.contains(start_of_day(reference)));
        }

        /// Month sub-windows tile the month and never cross a Monday
        #[test]
        fn prop_month_weeks_partition_month(month in 1u32..=12, year in 1970i32..2100) {
            let window = resolve_month(month, year).unwrap();
            let weeks = &window.sub_windows;

            prop_assert!(weeks.len() >= 4 && weeks.len() <= 6);
            prop_assert_eq!(weeks[0].start, window.start);
            prop_assert_eq!(weeks[weeks.len() - 1].end, window.end);
            for pair in weeks.windows(2) {
                prop_assert_eq!(pair[0].end + Duration::nanoseconds(1), pair[1].start);
                prop_assert_eq!(pair[1].weekday(), Weekday::Mon);
            }
            for week in weeks {
                prop_assert_eq!(week_start(week.start_date()), week_start(week.end_date()));
            }
            for week in &weeks[1..weeks.len() - 1] {
                prop_assert_eq!((week.end_date() - week.start_date()).num_days(), 6);
            }
        }
    }
}
