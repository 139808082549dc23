//! Fitness Stats Shared Library
//!
//! Pure statistics core: time window resolution, activity aggregation, goal
//! progress math and the report types built from them. Nothing in this crate
//! performs I/O.

pub mod aggregation;
pub mod breakdown;
pub mod errors;
pub mod models;
pub mod progress;
pub mod types;
pub mod validation;
pub mod window;

// Re-export commonly used items
pub use aggregation::{aggregate, Aggregation, Totals};
pub use breakdown::{breakdown_by_meal, tally_completed, CompletedWorkouts, MealBreakdown, NutrientTotals};
pub use errors::*;
pub use models::{
    ActivityKind, ActivityRecord, FoodEntry, Goal, Meal, NewGoal, WorkoutCategory, WorkoutSession,
    WorkoutStatus,
};
pub use progress::ProgressMetric;
pub use types::*;
pub use window::{Granularity, TimeWindow, TrailingRange};
