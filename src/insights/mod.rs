//! Derived analytics over logged data: pure computation, no state.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::nutrition::NutritionInfo;
use crate::progress::ProgressEntry;
use crate::tracking::{DailyLog, FoodLog};

/// How far through the day's calorie and water targets the user is,
/// as percentages. Values can exceed 100 when a target is passed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyProgress {
    pub calorie_percent: f64,
    pub water_percent: f64,
}

pub fn daily_progress(log: &DailyLog) -> DailyProgress {
    DailyProgress {
        calorie_percent: percent(log.total_nutrition.calories, f64::from(log.target_calories)),
        water_percent: percent(f64::from(log.water_intake), f64::from(log.target_water)),
    }
}

fn percent(value: f64, target: f64) -> f64 {
    if target <= 0.0 {
        0.0
    } else {
        value / target * 100.0
    }
}

/// Nutrition totals per logged day, oldest first.
pub fn daily_totals(logs: &[FoodLog]) -> BTreeMap<NaiveDate, NutritionInfo> {
    let mut totals: BTreeMap<NaiveDate, NutritionInfo> = BTreeMap::new();
    for log in logs {
        totals.entry(log.date).or_default().accumulate(&log.nutrition);
    }
    totals
}

/// Mean calories over the days that have at least one log.
pub fn average_daily_calories(logs: &[FoodLog]) -> Option<f64> {
    let totals = daily_totals(logs);
    if totals.is_empty() {
        return None;
    }
    let sum: f64 = totals.values().map(|total| total.calories).sum();
    Some(sum / totals.len() as f64)
}

/// Mean calories over the three most recent logged days minus the
/// mean over the three days before those. Needs six logged days.
pub fn calorie_trend(logs: &[FoodLog]) -> Option<f64> {
    let totals = daily_totals(logs);
    if totals.len() < 6 {
        return None;
    }
    let calories: Vec<f64> = totals.values().map(|total| total.calories).collect();
    let recent: f64 = calories[calories.len() - 3..].iter().sum::<f64>() / 3.0;
    let previous: f64 =
        calories[calories.len() - 6..calories.len() - 3].iter().sum::<f64>() / 3.0;
    Some(recent - previous)
}

/// Weight change between the latest weigh-in and the most recent one
/// at least a week older, in kilograms.
///
/// Entries are expected date-descending, the order the user store
/// maintains.
pub fn weight_trend(entries: &[ProgressEntry]) -> Option<f64> {
    let latest = entries
        .iter()
        .find(|entry| entry.weight.is_some())?;
    let latest_weight = latest.weight?;
    let cutoff = latest.date.checked_sub_days(Days::new(7))?;
    let baseline = entries
        .iter()
        .find(|entry| entry.date <= cutoff && entry.weight.is_some())?;
    Some(latest_weight - baseline.weight?)
}

/// Number of consecutive days with at least one food log, counting
/// back from `today` (or from yesterday when today has none yet).
pub fn logging_streak(logs: &[FoodLog], today: NaiveDate) -> u32 {
    let logged: std::collections::BTreeSet<NaiveDate> = logs.iter().map(|log| log.date).collect();
    let mut cursor = if logged.contains(&today) {
        today
    } else {
        match today.checked_sub_days(Days::new(1)) {
            Some(yesterday) if logged.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };
    let mut streak = 0;
    while logged.contains(&cursor) {
        streak += 1;
        match cursor.checked_sub_days(Days::new(1)) {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}
