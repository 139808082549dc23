//! Record store seams used by the statistics services

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fitness_stats_shared::{FoodEntry, Goal, NewGoal, StatsResult, TimeWindow, WorkoutSession};
use uuid::Uuid;

/// Inclusive instant range of a store query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    #[inline]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

impl From<&TimeWindow> for TimeRange {
    fn from(window: &TimeWindow) -> Self {
        Self {
            start: window.start,
            end: window.end,
        }
    }
}

/// Read access to activity records and goals.
///
/// Range queries return records ordered by creation time. Any failure is
/// reported as `StatsError::StoreUnavailable`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_workout_sessions(
        &self,
        user_id: Uuid,
        range: TimeRange,
    ) -> StatsResult<Vec<WorkoutSession>>;

    async fn find_food_entries(&self, user_id: Uuid, range: TimeRange) -> StatsResult<Vec<FoodEntry>>;

    /// The most recently created active goal, if any
    async fn find_active_goal(&self, user_id: Uuid) -> StatsResult<Option<Goal>>;

    async fn health_check(&self) -> StatsResult<()>;
}

/// Writer side of goals
#[async_trait]
pub trait GoalStore: Send + Sync {
    /// Deactivate every active goal of the user and insert `goal` as the
    /// new active one, atomically.
    async fn activate_goal(&self, user_id: Uuid, goal: NewGoal) -> StatsResult<Goal>;
}
