//! Activity aggregation
//!
//! Reduces activity records into per-window totals. The reduction only uses
//! integer and exact decimal addition, so the result does not depend on the
//! order in which records arrive.

use crate::models::{ActivityKind, ActivityRecord};
use crate::progress::round_div;
use crate::window::TimeWindow;
use rust_decimal::Decimal;
use std::iter::Sum;
use std::ops::Add;

/// Summed metrics over a window or sub-window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Sum of workout durations in minutes
    pub total_duration: i64,
    pub total_calories_burned: i64,
    pub total_calories_consumed: Decimal,
    /// Number of workout records
    pub session_count: u32,
    /// Number of nutrition records
    pub entry_count: u32,
}

impl Totals {
    /// Fold one record into the running sums. Missing metrics count as zero.
    pub fn record(&mut self, record: &ActivityRecord) {
        match record.kind {
            ActivityKind::Workout {
                duration_minutes,
                calories_burned,
            } => {
                self.session_count += 1;
                self.total_duration += i64::from(duration_minutes.unwrap_or(0));
                self.total_calories_burned += i64::from(calories_burned.unwrap_or(0));
            }
            ActivityKind::Nutrition { calories_consumed } => {
                self.entry_count += 1;
                self.total_calories_consumed += calories_consumed.unwrap_or(Decimal::ZERO);
            }
        }
    }

    /// Mean workout duration rounded to whole minutes, 0 without sessions
    pub fn average_duration(&self) -> i64 {
        if self.session_count == 0 {
            return 0;
        }
        round_div(self.total_duration, i64::from(self.session_count))
    }

    pub fn is_empty(&self) -> bool {
        self.session_count == 0 && self.entry_count == 0
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, other: Totals) -> Totals {
        Totals {
            total_duration: self.total_duration + other.total_duration,
            total_calories_burned: self.total_calories_burned + other.total_calories_burned,
            total_calories_consumed: self.total_calories_consumed + other.total_calories_consumed,
            session_count: self.session_count + other.session_count,
            entry_count: self.entry_count + other.entry_count,
        }
    }
}

impl Sum for Totals {
    fn sum<I: Iterator<Item = Totals>>(iter: I) -> Self {
        iter.fold(Totals::default(), Add::add)
    }
}

/// Totals for a window and each of its sub-windows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub total: Totals,
    /// `buckets[i]` holds the totals of `window.sub_windows[i]`
    pub buckets: Vec<Totals>,
}

/// Aggregate records falling inside `window`.
///
/// A record belongs to a sub-window when `start <= occurred_at <= end`;
/// records outside the window are ignored.
pub fn aggregate(records: &[ActivityRecord], window: &TimeWindow) -> Aggregation {
    let mut total = Totals::default();
    let mut buckets = vec![Totals::default(); window.sub_windows.len()];

    for record in records.iter().filter(|r| window.contains(r.occurred_at)) {
        total.record(record);

        // Sub-windows are ordered and disjoint
        let idx = window
            .sub_windows
            .partition_point(|w| w.end < record.occurred_at);
        if let Some(sub) = window.sub_windows.get(idx) {
            if sub.contains(record.occurred_at) {
                buckets[idx].record(record);
            }
        }
    }

    Aggregation { total, buckets }
}
