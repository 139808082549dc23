//! Statistics service
//!
//! Resolves report windows, pulls the matching records from the record store
//! and reduces them into weekly, monthly, goal-progress and dashboard reports,
//! plus the trailing workout statistics and the per-meal nutrition summary.
//! All input validation happens before the first store query. Independent
//! reads within a report run concurrently; the first failure aborts the
//! whole report.

use crate::observability::{record_report, ReportKind};
use crate::repositories::{RecordStore, TimeRange};
use crate::services::clock::Clock;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use fitness_stats_shared::validation::{parse_month, parse_optional_date, parse_year};
use fitness_stats_shared::window::{
    ensure_supported, resolve_day, resolve_month, resolve_range, resolve_trailing, resolve_week,
};
use fitness_stats_shared::{
    aggregate, breakdown_by_meal, tally_completed, ActivityRecord, Aggregation,
    DailyNutritionSummary, DashboardReport, GoalProgress, MonthlyReport, MonthlyStatsQuery,
    NutritionSummaryQuery, StatsError, StatsResult, TimeWindow, TrailingRange, WeeklyReport,
    WeeklyStatsQuery, WorkoutStatsQuery, WorkoutStatsReport,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Window of a weekly report request
pub fn weekly_window(query: &WeeklyStatsQuery, today: NaiveDate) -> StatsResult<TimeWindow> {
    let start = parse_optional_date("startDate", query.start_date.as_deref())?;
    let end = parse_optional_date("endDate", query.end_date.as_deref())?;
    let week_of = parse_optional_date("weekOf", query.week_of.as_deref())?;

    match (start, end, week_of) {
        (Some(start), Some(end), None) => resolve_range(start, end),
        (Some(_), Some(_), Some(_)) => Err(StatsError::invalid_range(
            "weekOf cannot be combined with startDate and endDate",
        )),
        (Some(_), None, _) | (None, Some(_), _) => Err(StatsError::invalid_range(
            "startDate and endDate must be supplied together",
        )),
        (None, None, reference) => ensure_supported(resolve_week(reference.unwrap_or(today))),
    }
}

/// Window of a monthly report request; missing parts default to `today`
pub fn monthly_window(query: &MonthlyStatsQuery, today: NaiveDate) -> StatsResult<TimeWindow> {
    let month = query
        .month
        .as_deref()
        .map(parse_month)
        .transpose()?
        .unwrap_or_else(|| today.month());
    let year = query
        .year
        .as_deref()
        .map(parse_year)
        .transpose()?
        .unwrap_or_else(|| today.year());
    resolve_month(month, year)
}

/// Look-back period of a workout statistics request, `month` when absent
pub fn trailing_range(query: &WorkoutStatsQuery) -> StatsResult<TrailingRange> {
    Ok(query
        .range
        .as_deref()
        .map(str::parse::<TrailingRange>)
        .transpose()?
        .unwrap_or_default())
}

/// Day window of a nutrition summary request; defaults to `today`
pub fn nutrition_day(query: &NutritionSummaryQuery, today: NaiveDate) -> StatsResult<TimeWindow> {
    let date = parse_optional_date("date", query.date.as_deref())?.unwrap_or(today);
    Ok(resolve_day(date))
}

/// Report computation over a record store
#[derive(Clone)]
pub struct StatisticsService {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl StatisticsService {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Weekly report for the current week, the week containing `weekOf`, or
    /// an explicit `startDate..=endDate` range
    pub async fn weekly_stats(
        &self,
        user_id: Uuid,
        query: &WeeklyStatsQuery,
    ) -> StatsResult<WeeklyReport> {
        let today = self.clock.today();
        instrumented(
            ReportKind::Weekly,
            user_id,
            self.weekly_for_query(user_id, query, today),
        )
        .await
    }

    /// Monthly report split into clipped calendar weeks
    pub async fn monthly_stats(
        &self,
        user_id: Uuid,
        query: &MonthlyStatsQuery,
    ) -> StatsResult<MonthlyReport> {
        let today = self.clock.today();
        instrumented(
            ReportKind::Monthly,
            user_id,
            self.monthly_for_query(user_id, query, today),
        )
        .await
    }

    /// Progress of the current week and month against the active goal
    pub async fn goal_progress(&self, user_id: Uuid) -> StatsResult<GoalProgress> {
        let today = self.clock.today();
        instrumented(
            ReportKind::Progress,
            user_id,
            self.goal_progress_on(user_id, today),
        )
        .await
    }

    /// Weekly, monthly and goal-progress reports computed against a single
    /// reading of the clock
    pub async fn dashboard(&self, user_id: Uuid) -> StatsResult<DashboardReport> {
        let today = self.clock.today();
        instrumented(
            ReportKind::Dashboard,
            user_id,
            self.dashboard_on(user_id, today),
        )
        .await
    }

    /// Completed sessions of the last week, month or year, counted per
    /// category
    pub async fn workout_stats(
        &self,
        user_id: Uuid,
        query: &WorkoutStatsQuery,
    ) -> StatsResult<WorkoutStatsReport> {
        let now = self.clock.now();
        instrumented(
            ReportKind::Workouts,
            user_id,
            self.workouts_for_query(user_id, query, now),
        )
        .await
    }

    /// One day's food entries bucketed by meal
    pub async fn daily_nutrition_summary(
        &self,
        user_id: Uuid,
        query: &NutritionSummaryQuery,
    ) -> StatsResult<DailyNutritionSummary> {
        let today = self.clock.today();
        instrumented(
            ReportKind::Nutrition,
            user_id,
            self.nutrition_for_query(user_id, query, today),
        )
        .await
    }

    async fn weekly_for_query(
        &self,
        user_id: Uuid,
        query: &WeeklyStatsQuery,
        today: NaiveDate,
    ) -> StatsResult<WeeklyReport> {
        let window = weekly_window(query, today)?;
        self.weekly_report(user_id, &window).await
    }

    async fn monthly_for_query(
        &self,
        user_id: Uuid,
        query: &MonthlyStatsQuery,
        today: NaiveDate,
    ) -> StatsResult<MonthlyReport> {
        let window = monthly_window(query, today)?;
        self.monthly_report(user_id, &window).await
    }

    async fn workouts_for_query(
        &self,
        user_id: Uuid,
        query: &WorkoutStatsQuery,
        now: DateTime<Utc>,
    ) -> StatsResult<WorkoutStatsReport> {
        let range = trailing_range(query)?;
        let window = resolve_trailing(range, now)?;
        let sessions = self
            .store
            .find_workout_sessions(user_id, TimeRange::from(&window))
            .await?;

        debug!(%user_id, %range, sessions = sessions.len(), "Tallying completed workouts");
        Ok(WorkoutStatsReport::assemble(
            range,
            &window,
            tally_completed(&sessions, &window),
        ))
    }

    async fn nutrition_for_query(
        &self,
        user_id: Uuid,
        query: &NutritionSummaryQuery,
        today: NaiveDate,
    ) -> StatsResult<DailyNutritionSummary> {
        let window = nutrition_day(query, today)?;
        let entries = self
            .store
            .find_food_entries(user_id, TimeRange::from(&window))
            .await?;

        Ok(DailyNutritionSummary::assemble(
            &window,
            &breakdown_by_meal(&entries, &window),
        ))
    }

    async fn dashboard_on(&self, user_id: Uuid, today: NaiveDate) -> StatsResult<DashboardReport> {
        let week_window = resolve_week(today);
        let month_window = resolve_month(today.month(), today.year())?;

        let (week, month, progress) = tokio::try_join!(
            self.weekly_report(user_id, &week_window),
            self.monthly_report(user_id, &month_window),
            self.goal_progress_on(user_id, today),
        )?;

        Ok(DashboardReport::compose(week, month, progress))
    }

    async fn goal_progress_on(&self, user_id: Uuid, today: NaiveDate) -> StatsResult<GoalProgress> {
        let week_window = resolve_week(today);
        let month_window = resolve_month(today.month(), today.year())?;

        let Some(goal) = self.store.find_active_goal(user_id).await? else {
            debug!(%user_id, "No active goal");
            return Ok(GoalProgress::no_active_goal());
        };

        let (week, month) = tokio::try_join!(
            self.weekly_report(user_id, &week_window),
            self.monthly_report(user_id, &month_window),
        )?;

        Ok(GoalProgress::evaluate(goal, week, month))
    }

    async fn weekly_report(&self, user_id: Uuid, window: &TimeWindow) -> StatsResult<WeeklyReport> {
        let aggregation = self.aggregate_window(user_id, window).await?;
        Ok(WeeklyReport::assemble(window, &aggregation))
    }

    async fn monthly_report(&self, user_id: Uuid, window: &TimeWindow) -> StatsResult<MonthlyReport> {
        let aggregation = self.aggregate_window(user_id, window).await?;
        Ok(MonthlyReport::assemble(window, &aggregation))
    }

    async fn aggregate_window(&self, user_id: Uuid, window: &TimeWindow) -> StatsResult<Aggregation> {
        let range = TimeRange::from(window);
        let (sessions, entries) = tokio::try_join!(
            self.store.find_workout_sessions(user_id, range),
            self.store.find_food_entries(user_id, range),
        )?;

        debug!(
            %user_id,
            start = %window.start,
            end = %window.end,
            sessions = sessions.len(),
            entries = entries.len(),
            "Aggregating window"
        );

        let records: Vec<ActivityRecord> = sessions
            .iter()
            .map(ActivityRecord::from)
            .chain(entries.iter().map(ActivityRecord::from))
            .collect();
        Ok(aggregate(&records, window))
    }
}

async fn instrumented<T, F>(kind: ReportKind, user_id: Uuid, report: F) -> StatsResult<T>
where
    F: Future<Output = StatsResult<T>>,
{
    let started = Instant::now();
    let result = report.await;
    let elapsed = started.elapsed();
    record_report(kind, elapsed, result.is_ok());

    match &result {
        Ok(_) => info!(%user_id, %kind, elapsed_ms = elapsed.as_millis() as u64, "Report computed"),
        Err(e) => warn!(%user_id, %kind, error = %e, "Report failed"),
    }
    result
}
