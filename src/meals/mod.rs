use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::nutrition::{Food, NutritionInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// A food plus how many servings of it a meal uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealFood {
    pub food: Food,
    pub quantity: f64,
}

/// A single planned meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub foods: Vec<MealFood>,
    pub total_nutrition: NutritionInfo,
    #[serde(default)]
    pub preparation_time: Option<u32>,
    #[serde(default)]
    pub instructions: Option<Vec<String>>,
}

/// One plan day: the three main meals plus any snacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMeals {
    pub date: NaiveDate,
    #[serde(default)]
    pub breakfast: Option<Meal>,
    #[serde(default)]
    pub lunch: Option<Meal>,
    #[serde(default)]
    pub dinner: Option<Meal>,
    #[serde(default)]
    pub snacks: Vec<Meal>,
}

impl DailyMeals {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            breakfast: None,
            lunch: None,
            dinner: None,
            snacks: Vec::new(),
        }
    }
}

/// A multi-day meal plan. The meal store holds exactly one current
/// plan; setting a new one replaces it without keeping history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub meals: Vec<DailyMeals>,
    pub target_nutrition: NutritionInfo,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<String>,
    /// Minutes.
    pub preparation_time: u32,
    /// Minutes.
    pub cooking_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Per serving.
    pub nutrition: NutritionInfo,
    #[serde(default)]
    pub tags: Vec<String>,
}
