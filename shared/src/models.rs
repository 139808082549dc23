//! Data models for the statistics engine
//!
//! Store records (`WorkoutSession`, `FoodEntry`, `Goal`) are owned by the
//! record store; the aggregation core only reads them through
//! [`ActivityRecord`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Workout Sessions
// ============================================================================

/// Lifecycle state of a workout session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    InProgress,
    Completed,
    Cancelled,
}

impl WorkoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutStatus::InProgress => "in_progress",
            WorkoutStatus::Completed => "completed",
            WorkoutStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for WorkoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WorkoutStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_progress" => Ok(WorkoutStatus::InProgress),
            "completed" => Ok(WorkoutStatus::Completed),
            "cancelled" => Ok(WorkoutStatus::Cancelled),
            _ => Err(format!("Unknown workout status: {}", s)),
        }
    }
}

/// Category of the workout template a session was started from.
///
/// Custom sessions have no template and are tallied as `Other`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutCategory {
    Strength,
    Cardio,
    Yoga,
    Pilates,
    Hiit,
    Flexibility,
    Sports,
    Other,
}

impl WorkoutCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutCategory::Strength => "strength",
            WorkoutCategory::Cardio => "cardio",
            WorkoutCategory::Yoga => "yoga",
            WorkoutCategory::Pilates => "pilates",
            WorkoutCategory::Hiit => "hiit",
            WorkoutCategory::Flexibility => "flexibility",
            WorkoutCategory::Sports => "sports",
            WorkoutCategory::Other => "other",
        }
    }
}

impl fmt::Display for WorkoutCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WorkoutCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strength" => Ok(WorkoutCategory::Strength),
            "cardio" => Ok(WorkoutCategory::Cardio),
            "yoga" => Ok(WorkoutCategory::Yoga),
            "pilates" => Ok(WorkoutCategory::Pilates),
            "hiit" => Ok(WorkoutCategory::Hiit),
            "flexibility" => Ok(WorkoutCategory::Flexibility),
            "sports" => Ok(WorkoutCategory::Sports),
            "other" => Ok(WorkoutCategory::Other),
            _ => Err(format!("Unknown workout category: {}", s)),
        }
    }
}

/// A logged workout session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    /// Template category, `None` for custom sessions
    pub category: Option<WorkoutCategory>,
    /// Actual duration in minutes
    pub duration_minutes: Option<i32>,
    pub calories_burned: Option<i32>,
    pub status: WorkoutStatus,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Food Entries
// ============================================================================

/// Meal slot of a food entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl Meal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meal::Breakfast => "breakfast",
            Meal::Lunch => "lunch",
            Meal::Dinner => "dinner",
            Meal::Snack => "snack",
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Meal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(Meal::Breakfast),
            "lunch" => Ok(Meal::Lunch),
            "dinner" => Ok(Meal::Dinner),
            "snack" => Ok(Meal::Snack),
            _ => Err(format!("Unknown meal: {}", s)),
        }
    }
}

/// A logged food entry with its pre-calculated nutrition values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meal: Meal,
    pub quantity: f64,
    pub total_calories: Option<Decimal>,
    /// Grams
    pub total_protein: Option<Decimal>,
    pub total_carbs: Option<Decimal>,
    pub total_fat: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Goals
// ============================================================================

/// A user's declared targets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub daily_calorie_goal: Option<i32>,
    pub weekly_calorie_goal: Option<i32>,
    /// Litres per day
    pub daily_water_goal: Option<Decimal>,
    pub weekly_workout_goal: Option<i32>,
    pub daily_calorie_burn_goal: Option<i32>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Targets for a goal about to be activated
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewGoal {
    pub daily_calorie_goal: Option<i32>,
    pub weekly_calorie_goal: Option<i32>,
    pub daily_water_goal: Option<Decimal>,
    pub weekly_workout_goal: Option<i32>,
    pub daily_calorie_burn_goal: Option<i32>,
    pub notes: Option<String>,
}

// ============================================================================
// Activity Records
// ============================================================================

/// Metrics carried by an activity record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Workout {
        duration_minutes: Option<i32>,
        calories_burned: Option<i32>,
    },
    Nutrition {
        calories_consumed: Option<Decimal>,
    },
}

/// A time-stamped record as seen by the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityRecord {
    pub occurred_at: DateTime<Utc>,
    pub kind: ActivityKind,
}

impl ActivityRecord {
    pub fn workout(
        occurred_at: DateTime<Utc>,
        duration_minutes: Option<i32>,
        calories_burned: Option<i32>,
    ) -> Self {
        Self {
            occurred_at,
            kind: ActivityKind::Workout {
                duration_minutes,
                calories_burned,
            },
        }
    }

    pub fn nutrition(occurred_at: DateTime<Utc>, calories_consumed: Option<Decimal>) -> Self {
        Self {
            occurred_at,
            kind: ActivityKind::Nutrition { calories_consumed },
        }
    }
}

impl From<&WorkoutSession> for ActivityRecord {
    fn from(session: &WorkoutSession) -> Self {
        ActivityRecord::workout(
            session.created_at,
            session.duration_minutes,
            session.calories_burned,
        )
    }
}

impl From<&FoodEntry> for ActivityRecord {
    fn from(entry: &FoodEntry) -> Self {
        ActivityRecord::nutrition(entry.created_at, entry.total_calories)
    }
}
