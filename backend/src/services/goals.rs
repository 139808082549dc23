//! Goal activation service

use crate::error::ApiError;
use crate::repositories::GoalStore;
use fitness_stats_shared::{ActivateGoalRequest, Goal, NewGoal};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct GoalService {
    store: Arc<dyn GoalStore>,
}

impl GoalService {
    pub fn new(store: Arc<dyn GoalStore>) -> Self {
        Self { store }
    }

    /// Validate the request and make it the user's only active goal
    pub async fn activate(&self, user_id: Uuid, req: ActivateGoalRequest) -> Result<Goal, ApiError> {
        req.validate()?;

        let goal = self.store.activate_goal(user_id, NewGoal::from(req)).await?;
        info!(%user_id, goal_id = %goal.id, "Goal activated");
        Ok(goal)
    }
}
