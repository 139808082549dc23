//! Goal progress calculation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Days counted in a weekly calorie-burn target
pub const DAYS_PER_WEEK: i64 = 7;
/// Weeks counted in a monthly workout target
pub const WEEKS_PER_MONTH: i64 = 4;

/// Progress of one tracked metric against its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressMetric {
    pub target: i64,
    pub achieved: i64,
    pub percentage: i64,
}

impl ProgressMetric {
    /// Build a metric, computing its percentage.
    ///
    /// A target of zero means "no goal set" and always yields 0%.
    pub fn new(target: i64, achieved: i64) -> Self {
        Self {
            target,
            achieved,
            percentage: percentage(target, achieved),
        }
    }

    /// Build a metric from an optional goal field scaled by `multiplier`
    pub fn from_goal(goal_value: Option<i32>, multiplier: i64, achieved: i64) -> Self {
        let target = i64::from(goal_value.unwrap_or(0)) * multiplier;
        Self::new(target, achieved)
    }
}

/// `round(achieved / target * 100)`, or 0 when `target <= 0`
pub fn percentage(target: i64, achieved: i64) -> i64 {
    if target <= 0 {
        return 0;
    }
    round_div(achieved.saturating_mul(100), target)
}

/// Integer division rounded half towards positive infinity.
/// `denominator` must be positive.
pub fn round_div(numerator: i64, denominator: i64) -> i64 {
    debug_assert!(denominator > 0);
    (numerator.saturating_mul(2).saturating_add(denominator)).div_euclid(denominator * 2)
}

/// Round to `dp` decimal places, ties towards positive infinity
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let scale = Decimal::from(10u64.pow(dp));
    ((value * scale) + Decimal::new(5, 1)).floor() / scale
}
