//! Statistics API routes

use crate::error::ApiResult;
use crate::extract::{ApiPath, ApiQuery};
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use fitness_stats_shared::{
    DailyNutritionSummary, DashboardReport, GoalProgress, MonthlyReport, MonthlyStatsQuery,
    NutritionSummaryQuery, WeeklyReport, WeeklyStatsQuery, WorkoutStatsQuery, WorkoutStatsReport,
};
use uuid::Uuid;

/// Create statistics routes, nested under `/users/:user_id/statistics`
pub fn statistics_routes() -> Router<AppState> {
    Router::new()
        .route("/weekly", get(weekly_stats))
        .route("/monthly", get(monthly_stats))
        .route("/progress", get(goal_progress))
        .route("/dashboard", get(dashboard))
        .route("/workouts", get(workout_stats))
        .route("/nutrition", get(nutrition_summary))
}

/// GET /api/v1/users/:user_id/statistics/weekly
///
/// Query: `startDate` + `endDate` for an explicit range, or `weekOf` for the
/// week containing a date. Defaults to the current week.
async fn weekly_stats(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<WeeklyStatsQuery>,
) -> ApiResult<Json<WeeklyReport>> {
    let report = state.stats().weekly_stats(user_id, &query).await?;
    Ok(Json(report))
}

/// GET /api/v1/users/:user_id/statistics/monthly?month=&year=
async fn monthly_stats(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<MonthlyStatsQuery>,
) -> ApiResult<Json<MonthlyReport>> {
    let report = state.stats().monthly_stats(user_id, &query).await?;
    Ok(Json(report))
}

/// GET /api/v1/users/:user_id/statistics/progress
async fn goal_progress(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> ApiResult<Json<GoalProgress>> {
    let progress = state.stats().goal_progress(user_id).await?;
    Ok(Json(progress))
}

/// GET /api/v1/users/:user_id/statistics/dashboard
async fn dashboard(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> ApiResult<Json<DashboardReport>> {
    let report = state.stats().dashboard(user_id).await?;
    Ok(Json(report))
}

/// GET /api/v1/users/:user_id/statistics/workouts?range=week|month|year
async fn workout_stats(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<WorkoutStatsQuery>,
) -> ApiResult<Json<WorkoutStatsReport>> {
    let report = state.stats().workout_stats(user_id, &query).await?;
    Ok(Json(report))
}

/// GET /api/v1/users/:user_id/statistics/nutrition?date=YYYY-MM-DD
async fn nutrition_summary(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<NutritionSummaryQuery>,
) -> ApiResult<Json<DailyNutritionSummary>> {
    let summary = state.stats().daily_nutrition_summary(user_id, &query).await?;
    Ok(Json(summary))
}
