//! PostgreSQL record store

use super::store::{GoalStore, RecordStore, TimeRange};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fitness_stats_shared::{
    FoodEntry, Goal, Meal, NewGoal, StatsError, StatsResult, WorkoutCategory, WorkoutSession,
    WorkoutStatus,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

/// Workout session record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkoutSessionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub duration_minutes: Option<i32>,
    pub calories_burned: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Food entry record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FoodEntryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meal: String,
    pub quantity: f64,
    pub total_calories: Option<Decimal>,
    pub total_protein: Option<Decimal>,
    pub total_carbs: Option<Decimal>,
    pub total_fat: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Goal record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GoalRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub daily_calorie_goal: Option<i32>,
    pub weekly_calorie_goal: Option<i32>,
    pub daily_water_goal: Option<Decimal>,
    pub weekly_workout_goal: Option<i32>,
    pub daily_calorie_burn_goal: Option<i32>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<WorkoutSessionRecord> for WorkoutSession {
    type Error = StatsError;

    fn try_from(record: WorkoutSessionRecord) -> StatsResult<Self> {
        let status = record
            .status
            .parse::<WorkoutStatus>()
            .map_err(StatsError::store_unavailable)?;
        let category = record
            .category
            .as_deref()
            .map(str::parse::<WorkoutCategory>)
            .transpose()
            .map_err(StatsError::store_unavailable)?;
        Ok(WorkoutSession {
            id: record.id,
            user_id: record.user_id,
            name: record.name,
            category,
            duration_minutes: record.duration_minutes,
            calories_burned: record.calories_burned,
            status,
            created_at: record.created_at,
        })
    }
}

impl TryFrom<FoodEntryRecord> for FoodEntry {
    type Error = StatsError;

    fn try_from(record: FoodEntryRecord) -> StatsResult<Self> {
        let meal = record
            .meal
            .parse::<Meal>()
            .map_err(StatsError::store_unavailable)?;
        Ok(FoodEntry {
            id: record.id,
            user_id: record.user_id,
            meal,
            quantity: record.quantity,
            total_calories: record.total_calories,
            total_protein: record.total_protein,
            total_carbs: record.total_carbs,
            total_fat: record.total_fat,
            created_at: record.created_at,
        })
    }
}

impl From<GoalRecord> for Goal {
    fn from(record: GoalRecord) -> Self {
        Goal {
            id: record.id,
            user_id: record.user_id,
            daily_calorie_goal: record.daily_calorie_goal,
            weekly_calorie_goal: record.weekly_calorie_goal,
            daily_water_goal: record.daily_water_goal,
            weekly_workout_goal: record.weekly_workout_goal,
            daily_calorie_burn_goal: record.daily_calorie_burn_goal,
            notes: record.notes,
            is_active: record.is_active,
            created_at: record.created_at,
        }
    }
}

fn store_error(context: &str, err: sqlx::Error) -> StatsError {
    warn!(error = %err, "{} failed", context);
    StatsError::store_unavailable(format!("{}: {}", context, err))
}

const GOAL_COLUMNS: &str = "id, user_id, daily_calorie_goal, weekly_calorie_goal, daily_water_goal, \
     weekly_workout_goal, daily_calorie_burn_goal, notes, is_active, created_at";

/// Record store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn find_workout_sessions(
        &self,
        user_id: Uuid,
        range: TimeRange,
    ) -> StatsResult<Vec<WorkoutSession>> {
        let records = sqlx::query_as::<_, WorkoutSessionRecord>(
            r#"
            SELECT id, user_id, name, category, duration_minutes, calories_burned, status,
                   created_at
            FROM workout_sessions
            WHERE user_id = $1 AND created_at >= $2 AND created_at <= $3
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("workout session query", e))?;

        debug!(%user_id, count = records.len(), "Fetched workout sessions");
        records.into_iter().map(WorkoutSession::try_from).collect()
    }

    async fn find_food_entries(&self, user_id: Uuid, range: TimeRange) -> StatsResult<Vec<FoodEntry>> {
        let records = sqlx::query_as::<_, FoodEntryRecord>(
            r#"
            SELECT id, user_id, meal, quantity, total_calories, total_protein, total_carbs,
                   total_fat, created_at
            FROM food_entries
            WHERE user_id = $1 AND created_at >= $2 AND created_at <= $3
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("food entry query", e))?;

        debug!(%user_id, count = records.len(), "Fetched food entries");
        records.into_iter().map(FoodEntry::try_from).collect()
    }

    async fn find_active_goal(&self, user_id: Uuid) -> StatsResult<Option<Goal>> {
        let record = sqlx::query_as::<_, GoalRecord>(&format!(
            r#"
            SELECT {}
            FROM goals
            WHERE user_id = $1 AND is_active = TRUE
            ORDER BY created_at DESC
            LIMIT 1
            "#,
            GOAL_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("active goal query", e))?;

        Ok(record.map(Goal::from))
    }

    async fn health_check(&self) -> StatsResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| store_error("health check", e))
    }
}

#[async_trait]
impl GoalStore for PgRecordStore {
    async fn activate_goal(&self, user_id: Uuid, goal: NewGoal) -> StatsResult<Goal> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("begin transaction", e))?;

        let deactivated = sqlx::query(
            "UPDATE goals SET is_active = FALSE WHERE user_id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| store_error("goal deactivation", e))?
        .rows_affected();

        let record = sqlx::query_as::<_, GoalRecord>(&format!(
            r#"
            INSERT INTO goals (user_id, daily_calorie_goal, weekly_calorie_goal, daily_water_goal,
                               weekly_workout_goal, daily_calorie_burn_goal, notes, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE)
            RETURNING {}
            "#,
            GOAL_COLUMNS
        ))
        .bind(user_id)
        .bind(goal.daily_calorie_goal)
        .bind(goal.weekly_calorie_goal)
        .bind(goal.daily_water_goal)
        .bind(goal.weekly_workout_goal)
        .bind(goal.daily_calorie_burn_goal)
        .bind(&goal.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| store_error("goal insert", e))?;

        tx.commit()
            .await
            .map_err(|e| store_error("commit goal activation", e))?;

        debug!(%user_id, deactivated, "Activated goal");
        Ok(record.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_record(status: &str) -> WorkoutSessionRecord {
        WorkoutSessionRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Leg day".to_string(),
            category: Some("strength".to_string()),
            duration_minutes: Some(50),
            calories_burned: Some(420),
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_session_record_conversion() {
        let session = WorkoutSession::try_from(session_record("completed")).unwrap();
        assert_eq!(session.status, WorkoutStatus::Completed);
        assert_eq!(session.category, Some(WorkoutCategory::Strength));
        assert_eq!(session.duration_minutes, Some(50));
    }

    #[test]
    fn test_custom_session_has_no_category() {
        let mut record = session_record("completed");
        record.category = None;
        assert_eq!(WorkoutSession::try_from(record).unwrap().category, None);

        let mut record = session_record("completed");
        record.category = Some("crossfit".to_string());
        assert!(matches!(
            WorkoutSession::try_from(record),
            Err(StatsError::StoreUnavailable(_))
        ));
    }

    #[test]
    fn test_unknown_status_is_store_error() {
        let result = WorkoutSession::try_from(session_record("paused"));
        assert!(matches!(result, Err(StatsError::StoreUnavailable(_))));
    }

    #[test]
    fn test_food_record_conversion() {
        let record = FoodEntryRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            meal: "snack".to_string(),
            quantity: 2.0,
            total_calories: Some(Decimal::new(31050, 2)),
            total_protein: Some(Decimal::new(84, 1)),
            total_carbs: Some(Decimal::new(402, 1)),
            total_fat: None,
            created_at: Utc::now(),
        };
        let entry = FoodEntry::try_from(record).unwrap();
        assert_eq!(entry.meal, Meal::Snack);
        assert_eq!(entry.total_calories, Some(Decimal::new(31050, 2)));
        assert_eq!(entry.total_carbs, Some(Decimal::new(402, 1)));
        assert_eq!(entry.total_fat, None);
    }
}
