//! Per-meal and per-category tallies
//!
//! Companions to [`crate::aggregation`] for the daily nutrition summary and
//! the trailing workout statistics. Both reduce with an exhaustive match on
//! the record's typed tag.

use crate::aggregation::Totals;
use crate::models::{ActivityRecord, FoodEntry, Meal, WorkoutCategory, WorkoutSession, WorkoutStatus};
use crate::window::TimeWindow;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::ops::Add;

/// Summed nutrition values of food entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NutrientTotals {
    pub calories: Decimal,
    /// Grams
    pub protein: Decimal,
    pub carbs: Decimal,
    pub fat: Decimal,
    pub entry_count: u32,
}

impl NutrientTotals {
    /// Missing values count as zero
    pub fn record(&mut self, entry: &FoodEntry) {
        self.calories += entry.total_calories.unwrap_or(Decimal::ZERO);
        self.protein += entry.total_protein.unwrap_or(Decimal::ZERO);
        self.carbs += entry.total_carbs.unwrap_or(Decimal::ZERO);
        self.fat += entry.total_fat.unwrap_or(Decimal::ZERO);
        self.entry_count += 1;
    }
}

impl Add for NutrientTotals {
    type Output = NutrientTotals;

    fn add(self, other: NutrientTotals) -> NutrientTotals {
        NutrientTotals {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
            entry_count: self.entry_count + other.entry_count,
        }
    }
}

/// Nutrition totals per meal slot plus the day total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MealBreakdown {
    pub breakfast: NutrientTotals,
    pub lunch: NutrientTotals,
    pub dinner: NutrientTotals,
    pub snack: NutrientTotals,
    pub total: NutrientTotals,
}

impl MealBreakdown {
    pub fn record(&mut self, entry: &FoodEntry) {
        let slot = match entry.meal {
            Meal::Breakfast => &mut self.breakfast,
            Meal::Lunch => &mut self.lunch,
            Meal::Dinner => &mut self.dinner,
            Meal::Snack => &mut self.snack,
        };
        slot.record(entry);
        self.total.record(entry);
    }

    pub fn meal(&self, meal: Meal) -> &NutrientTotals {
        match meal {
            Meal::Breakfast => &self.breakfast,
            Meal::Lunch => &self.lunch,
            Meal::Dinner => &self.dinner,
            Meal::Snack => &self.snack,
        }
    }
}

/// Bucket the entries created inside `window` by meal
pub fn breakdown_by_meal(entries: &[FoodEntry], window: &TimeWindow) -> MealBreakdown {
    let mut breakdown = MealBreakdown::default();
    for entry in entries.iter().filter(|e| window.contains(e.created_at)) {
        breakdown.record(entry);
    }
    breakdown
}

/// Totals of completed sessions with a count per category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedWorkouts {
    pub totals: Totals,
    pub by_category: BTreeMap<WorkoutCategory, u32>,
}

/// Tally the completed sessions created inside `window`. In-progress and
/// cancelled sessions are skipped; sessions without a category count as
/// [`WorkoutCategory::Other`].
pub fn tally_completed(sessions: &[WorkoutSession], window: &TimeWindow) -> CompletedWorkouts {
    let mut tally = CompletedWorkouts::default();

    for session in sessions.iter().filter(|s| window.contains(s.created_at)) {
        match session.status {
            WorkoutStatus::Completed => {}
            WorkoutStatus::InProgress | WorkoutStatus::Cancelled => continue,
        }
        tally.totals.record(&ActivityRecord::from(session));
        *tally
            .by_category
            .entry(session.category.unwrap_or(WorkoutCategory::Other))
            .or_insert(0) += 1;
    }

    tally
}
