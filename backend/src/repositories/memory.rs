//! In-memory record store
//!
//! Used by tests and local runs without a database. Each instance is
//! isolated, so parallel tests never share records.

use super::store::{GoalStore, RecordStore, TimeRange};
use async_trait::async_trait;
use chrono::Utc;
use fitness_stats_shared::{FoodEntry, Goal, NewGoal, StatsError, StatsResult, WorkoutSession};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryRecordStore {
    sessions: RwLock<Vec<WorkoutSession>>,
    entries: RwLock<Vec<FoodEntry>>,
    goals: RwLock<Vec<Goal>>,
    unavailable: AtomicBool,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_workout_session(&self, session: WorkoutSession) {
        self.sessions.write().await.push(session);
    }

    pub async fn insert_food_entry(&self, entry: FoodEntry) {
        self.entries.write().await.push(entry);
    }

    /// Insert a goal as-is, without touching other goals
    pub async fn insert_goal(&self, goal: Goal) {
        self.goals.write().await.push(goal);
    }

    pub async fn goals_for(&self, user_id: Uuid) -> Vec<Goal> {
        self.goals
            .read()
            .await
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Make every subsequent query fail with `StoreUnavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> StatsResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StatsError::store_unavailable("in-memory store marked unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn find_workout_sessions(
        &self,
        user_id: Uuid,
        range: TimeRange,
    ) -> StatsResult<Vec<WorkoutSession>> {
        self.ensure_available()?;
        let mut found: Vec<WorkoutSession> = self
            .sessions
            .read()
            .await
            .iter()
            .filter(|s| s.user_id == user_id && range.contains(s.created_at))
            .cloned()
            .collect();
        found.sort_by_key(|s| s.created_at);
        Ok(found)
    }

    async fn find_food_entries(&self, user_id: Uuid, range: TimeRange) -> StatsResult<Vec<FoodEntry>> {
        self.ensure_available()?;
        let mut found: Vec<FoodEntry> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.user_id == user_id && range.contains(e.created_at))
            .cloned()
            .collect();
        found.sort_by_key(|e| e.created_at);
        Ok(found)
    }

    async fn find_active_goal(&self, user_id: Uuid) -> StatsResult<Option<Goal>> {
        self.ensure_available()?;
        Ok(self
            .goals
            .read()
            .await
            .iter()
            .filter(|g| g.user_id == user_id && g.is_active)
            .max_by_key(|g| g.created_at)
            .cloned())
    }

    async fn health_check(&self) -> StatsResult<()> {
        self.ensure_available()
    }
}

#[async_trait]
impl GoalStore for InMemoryRecordStore {
    async fn activate_goal(&self, user_id: Uuid, goal: NewGoal) -> StatsResult<Goal> {
        self.ensure_available()?;
        // One write guard covers both steps
        let mut goals = self.goals.write().await;
        for existing in goals.iter_mut().filter(|g| g.user_id == user_id) {
            existing.is_active = false;
        }

        let created = Goal {
            id: Uuid::new_v4(),
            user_id,
            daily_calorie_goal: goal.daily_calorie_goal,
            weekly_calorie_goal: goal.weekly_calorie_goal,
            daily_water_goal: goal.daily_water_goal,
            weekly_workout_goal: goal.weekly_workout_goal,
            daily_calorie_burn_goal: goal.daily_calorie_burn_goal,
            notes: goal.notes,
            is_active: true,
            created_at: Utc::now(),
        };
        goals.push(created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use fake::{faker::lorem::en::Word, Fake};
    use fitness_stats_shared::WorkoutStatus;

    fn session(user_id: Uuid, created_at: chrono::DateTime<Utc>) -> WorkoutSession {
        WorkoutSession {
            id: Uuid::new_v4(),
            user_id,
            name: Word().fake(),
            category: None,
            duration_minutes: Some(30),
            calories_burned: Some(200),
            status: WorkoutStatus::Completed,
            created_at,
        }
    }

    #[tokio::test]
    async fn test_range_query_is_inclusive_and_ordered() {
        let store = InMemoryRecordStore::new();
        let user = Uuid::new_v4();
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let end = start + Duration::days(7) - Duration::nanoseconds(1);

        store.insert_workout_session(session(user, end)).await;
        store.insert_workout_session(session(user, start)).await;
        store.insert_workout_session(session(user, end + Duration::nanoseconds(1))).await;
        store.insert_workout_session(session(Uuid::new_v4(), start)).await;

        let found = store
            .find_workout_sessions(user, TimeRange { start, end })
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].created_at, start);
        assert_eq!(found[1].created_at, end);
    }

    #[tokio::test]
    async fn test_activate_goal_leaves_one_active() {
        let store = InMemoryRecordStore::new();
        let user = Uuid::new_v4();

        for workouts in 1..=3 {
            store
                .activate_goal(
                    user,
                    NewGoal {
                        weekly_workout_goal: Some(workouts),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
        }

        let goals = store.goals_for(user).await;
        assert_eq!(goals.len(), 3);
        assert_eq!(goals.iter().filter(|g| g.is_active).count(), 1);

        let active = store.find_active_goal(user).await.unwrap().unwrap();
        assert_eq!(active.weekly_workout_goal, Some(3));
    }

    #[tokio::test]
    async fn test_activate_goal_does_not_touch_other_users() {
        let store = InMemoryRecordStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.activate_goal(alice, NewGoal::default()).await.unwrap();
        store.activate_goal(bob, NewGoal::default()).await.unwrap();

        assert!(store.find_active_goal(alice).await.unwrap().is_some());
        assert!(store.find_active_goal(bob).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_queries() {
        let store = InMemoryRecordStore::new();
        store.set_unavailable(true);

        let result = store.find_active_goal(Uuid::new_v4()).await;
        assert!(matches!(result, Err(StatsError::StoreUnavailable(_))));
        assert!(store.health_check().await.is_err());

        store.set_unavailable(false);
        assert!(store.health_check().await.is_ok());
    }
}
