//! Food-log entries and the mutable daily log they roll up into.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::meals::MealType;
use crate::nutrition::{Food, NutritionInfo};

/// One logged consumption: a food, a quantity, and the scaled
/// nutrition it contributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub food: Food,
    /// Servings consumed.
    pub quantity: f64,
    /// Per-serving nutrition scaled by `quantity`.
    pub nutrition: NutritionInfo,
    pub logged_at: DateTime<Utc>,
}

impl FoodLog {
    pub fn new(
        user_id: Uuid,
        date: NaiveDate,
        meal_type: MealType,
        food: Food,
        quantity: f64,
    ) -> Self {
        let nutrition = food.nutrition.scaled(quantity);
        Self {
            id: Uuid::new_v4(),
            user_id,
            date,
            meal_type,
            food,
            quantity,
            nutrition,
            logged_at: Utc::now(),
        }
    }
}

/// Snapshot of one calendar day's nutrition. The user store holds a
/// single mutable "today" instance; it is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub date: NaiveDate,
    pub logs: Vec<FoodLog>,
    pub total_nutrition: NutritionInfo,
    /// Milliliters.
    pub water_intake: u32,
    pub target_calories: u32,
    /// Milliliters.
    pub target_water: u32,
}

impl DailyLog {
    pub fn new(date: NaiveDate, target_calories: u32, target_water: u32) -> Self {
        Self {
            date,
            logs: Vec::new(),
            total_nutrition: NutritionInfo::default(),
            water_intake: 0,
            target_calories,
            target_water,
        }
    }

    /// Appends an entry and folds its scaled nutrition into the total.
    pub fn add_entry(&mut self, entry: FoodLog) {
        self.total_nutrition.accumulate(&entry.nutrition);
        self.logs.push(entry);
    }

    pub fn add_water(&mut self, ml: u32) {
        self.water_intake += ml;
    }
}
