//! Goal API routes

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use fitness_stats_shared::{ActivateGoalRequest, Goal};
use uuid::Uuid;

/// Create goal routes, nested under `/users/:user_id/goals`
pub fn goal_routes() -> Router<AppState> {
    Router::new().route("/", post(activate_goal))
}

/// POST /api/v1/users/:user_id/goals - Replace the active goal
async fn activate_goal(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<ActivateGoalRequest>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let goal = state.goals().activate(user_id, req).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}
