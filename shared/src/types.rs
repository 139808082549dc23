//! API request and response types

use crate::aggregation::{Aggregation, Totals};
use crate::breakdown::{CompletedWorkouts, MealBreakdown, NutrientTotals};
use crate::models::{Goal, NewGoal, WorkoutCategory};
use crate::progress::{round_half_up, ProgressMetric};
use crate::window::{Granularity, TimeWindow, TrailingRange};
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name of a weekday
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// English name of a month numbered 1-12
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize))
        .copied()
        .unwrap_or("")
}

/// Consumed calories as reported: two decimal places
fn report_calories(value: Decimal) -> Decimal {
    value.round_dp(2)
}

// ============================================================================
// Queries
// ============================================================================

/// Query parameters of the weekly report.
///
/// Kept as raw strings so malformed values surface as `InvalidRange`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStatsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Any date inside the wanted week
    pub week_of: Option<String>,
}

/// Query parameters of the monthly report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatsQuery {
    pub month: Option<String>,
    pub year: Option<String>,
}

/// Query parameters of the trailing workout statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStatsQuery {
    /// `week`, `month` or `year`; defaults to `month`
    pub range: Option<String>,
}

/// Query parameters of the daily nutrition summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSummaryQuery {
    /// Defaults to today
    pub date: Option<String>,
}

/// Request to replace the user's active goal
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActivateGoalRequest {
    #[validate(range(min = 800, max = 5000, message = "Daily calorie goal must be between 800 and 5000"))]
    pub daily_calorie_goal: Option<i32>,

    #[validate(range(min = 5600, max = 35000, message = "Weekly calorie goal must be between 5600 and 35000"))]
    pub weekly_calorie_goal: Option<i32>,

    /// Litres per day
    #[validate(range(min = 0.5, max = 10.0, message = "Daily water goal must be between 0.5 and 10 litres"))]
    pub daily_water_goal: Option<f64>,

    #[validate(range(min = 1, max = 7, message = "Weekly workout goal must be between 1 and 7"))]
    pub weekly_workout_goal: Option<i32>,

    #[validate(range(min = 100, max = 2000, message = "Daily calorie burn goal must be between 100 and 2000"))]
    pub daily_calorie_burn_goal: Option<i32>,

    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,
}

impl From<ActivateGoalRequest> for NewGoal {
    fn from(req: ActivateGoalRequest) -> Self {
        NewGoal {
            daily_calorie_goal: req.daily_calorie_goal,
            weekly_calorie_goal: req.weekly_calorie_goal,
            daily_water_goal: req
                .daily_water_goal
                .and_then(Decimal::from_f64)
                .map(|litres| litres.round_dp(2)),
            weekly_workout_goal: req.weekly_workout_goal,
            daily_calorie_burn_goal: req.daily_calorie_burn_goal,
            notes: req.notes,
        }
    }
}

// ============================================================================
// Buckets
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    pub total_duration: i64,
    pub total_calories_burned: i64,
    pub session_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_calories: Decimal,
    pub entry_count: u32,
}

impl From<&Totals> for WorkoutSummary {
    fn from(totals: &Totals) -> Self {
        Self {
            total_duration: totals.total_duration,
            total_calories_burned: totals.total_calories_burned,
            session_count: totals.session_count,
        }
    }
}

impl From<&Totals> for NutritionSummary {
    fn from(totals: &Totals) -> Self {
        Self {
            total_calories: report_calories(totals.total_calories_consumed),
            entry_count: totals.entry_count,
        }
    }
}

/// One day of a weekly report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub day_name: String,
    pub workout: WorkoutSummary,
    pub nutrition: NutritionSummary,
}

/// One (possibly clipped) calendar week of a monthly report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBucket {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub workout: WorkoutSummary,
    pub nutrition: NutritionSummary,
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_workouts: u32,
    /// Minutes
    pub total_workout_duration: i64,
    pub average_workout_duration: i64,
    pub total_calories_burned: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_calories_consumed: Decimal,
    pub total_food_entries: u32,
    /// Empty for explicit date ranges
    pub daily_data: Vec<DailyBucket>,
}

impl WeeklyReport {
    /// Assemble a report from a week or range window and its aggregation
    pub fn assemble(window: &TimeWindow, aggregation: &Aggregation) -> Self {
        let total = &aggregation.total;
        let daily_data = match window.granularity {
            // Explicit ranges report totals only
            Granularity::Range => Vec::new(),
            Granularity::Day | Granularity::Week | Granularity::Month => window
                .sub_windows
                .iter()
                .zip(&aggregation.buckets)
                .map(|(day, totals)| DailyBucket {
                    date: day.start_date(),
                    day_name: day_name(day.weekday()).to_string(),
                    workout: totals.into(),
                    nutrition: totals.into(),
                })
                .collect(),
        };

        Self {
            start_date: window.start_date(),
            end_date: window.end_date(),
            total_workouts: total.session_count,
            total_workout_duration: total.total_duration,
            average_workout_duration: total.average_duration(),
            total_calories_burned: total.total_calories_burned,
            total_calories_consumed: report_calories(total.total_calories_consumed),
            total_food_entries: total.entry_count,
            daily_data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month: u32,
    pub year: i32,
    pub month_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_workouts: u32,
    pub total_workout_duration: i64,
    pub average_workout_duration: i64,
    pub total_calories_burned: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_calories_consumed: Decimal,
    pub total_food_entries: u32,
    pub weekly_data: Vec<WeeklyBucket>,
}

impl MonthlyReport {
    /// Assemble a report from a month window and its aggregation
    pub fn assemble(window: &TimeWindow, aggregation: &Aggregation) -> Self {
        let total = &aggregation.total;
        let first = window.start_date();
        let weekly_data = window
            .sub_windows
            .iter()
            .zip(&aggregation.buckets)
            .map(|(week, totals)| WeeklyBucket {
                week_start: week.start_date(),
                week_end: week.end_date(),
                workout: totals.into(),
                nutrition: totals.into(),
            })
            .collect();

        Self {
            month: first.month(),
            year: first.year(),
            month_name: month_name(first.month()).to_string(),
            start_date: first,
            end_date: window.end_date(),
            total_workouts: total.session_count,
            total_workout_duration: total.total_duration,
            average_workout_duration: total.average_duration(),
            total_calories_burned: total.total_calories_burned,
            total_calories_consumed: report_calories(total.total_calories_consumed),
            total_food_entries: total.entry_count,
            weekly_data,
        }
    }
}

/// Completed-workout statistics over a trailing period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStatsReport {
    pub time_range: TrailingRange,
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub total_workouts: u32,
    /// Minutes
    pub total_duration: i64,
    pub total_calories: i64,
    pub average_duration: i64,
    pub workouts_by_category: BTreeMap<WorkoutCategory, u32>,
}

impl WorkoutStatsReport {
    pub fn assemble(range: TrailingRange, window: &TimeWindow, tally: CompletedWorkouts) -> Self {
        let totals = tally.totals;
        Self {
            time_range: range,
            since: window.start,
            until: window.end,
            total_workouts: totals.session_count,
            total_duration: totals.total_duration,
            total_calories: totals.total_calories_burned,
            average_duration: totals.average_duration(),
            workouts_by_category: tally.by_category,
        }
    }
}

/// Nutrition of one meal slot: calories to whole numbers, macros to one
/// decimal place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealNutrition {
    #[serde(with = "rust_decimal::serde::float")]
    pub calories: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub protein: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub carbs: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fat: Decimal,
    pub entry_count: u32,
}

impl From<&NutrientTotals> for MealNutrition {
    fn from(totals: &NutrientTotals) -> Self {
        Self {
            calories: round_half_up(totals.calories, 0),
            protein: round_half_up(totals.protein, 1),
            carbs: round_half_up(totals.carbs, 1),
            fat: round_half_up(totals.fat, 1),
            entry_count: totals.entry_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSummary {
    pub breakfast: MealNutrition,
    pub lunch: MealNutrition,
    pub dinner: MealNutrition,
    pub snack: MealNutrition,
    pub total: MealNutrition,
}

/// Food entries of one day bucketed by meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyNutritionSummary {
    pub date: NaiveDate,
    pub summary: MealSummary,
    pub total_entries: u32,
}

impl DailyNutritionSummary {
    pub fn assemble(window: &TimeWindow, breakdown: &MealBreakdown) -> Self {
        Self {
            date: window.start_date(),
            summary: MealSummary {
                breakfast: (&breakdown.breakfast).into(),
                lunch: (&breakdown.lunch).into(),
                dinner: (&breakdown.dinner).into(),
                snack: (&breakdown.snack).into(),
                total: (&breakdown.total).into(),
            },
            total_entries: breakdown.total.entry_count,
        }
    }
}

// ============================================================================
// Goal progress
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProgress {
    pub workouts: ProgressMetric,
    pub calories_burned: ProgressMetric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProgress {
    pub workouts: ProgressMetric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGoalStatus {
    pub current: WeeklyReport,
    pub progress: WeeklyProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyGoalStatus {
    pub current: MonthlyReport,
    pub progress: MonthlyProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressDetails {
    pub goal: Goal,
    pub weekly: WeeklyGoalStatus,
    pub monthly: MonthlyGoalStatus,
}

/// Progress against the active goal.
///
/// Serializes as `{"hasActiveGoal": false}` when the user has no active goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub has_active_goal: bool,
    #[serde(flatten)]
    pub details: Option<GoalProgressDetails>,
}

impl GoalProgress {
    pub fn no_active_goal() -> Self {
        Self {
            has_active_goal: false,
            details: None,
        }
    }

    pub fn evaluate(goal: Goal, week: WeeklyReport, month: MonthlyReport) -> Self {
        use crate::progress::{DAYS_PER_WEEK, WEEKS_PER_MONTH};

        let weekly = WeeklyProgress {
            workouts: ProgressMetric::from_goal(
                goal.weekly_workout_goal,
                1,
                i64::from(week.total_workouts),
            ),
            calories_burned: ProgressMetric::from_goal(
                goal.daily_calorie_burn_goal,
                DAYS_PER_WEEK,
                week.total_calories_burned,
            ),
        };
        let monthly = MonthlyProgress {
            workouts: ProgressMetric::from_goal(
                goal.weekly_workout_goal,
                WEEKS_PER_MONTH,
                i64::from(month.total_workouts),
            ),
        };

        Self {
            has_active_goal: true,
            details: Some(GoalProgressDetails {
                goal,
                weekly: WeeklyGoalStatus {
                    current: week,
                    progress: weekly,
                },
                monthly: MonthlyGoalStatus {
                    current: month,
                    progress: monthly,
                },
            }),
        }
    }
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub weekly_workouts: u32,
    pub weekly_calories_burned: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub weekly_calories_consumed: Decimal,
    pub monthly_workouts: u32,
    pub monthly_calories_burned: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_calories_consumed: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub this_week: WeeklyReport,
    pub this_month: MonthlyReport,
    pub goal_progress: GoalProgress,
    pub summary: DashboardSummary,
}

impl DashboardReport {
    pub fn compose(week: WeeklyReport, month: MonthlyReport, goal_progress: GoalProgress) -> Self {
        let summary = DashboardSummary {
            weekly_workouts: week.total_workouts,
            weekly_calories_burned: week.total_calories_burned,
            weekly_calories_consumed: week.total_calories_consumed,
            monthly_workouts: month.total_workouts,
            monthly_calories_burned: month.total_calories_burned,
            monthly_calories_consumed: month.total_calories_consumed,
        };
        Self {
            this_week: week,
            this_month: month,
            goal_progress,
            summary,
        }
    }
}
