//! Nutrition value objects and daily-target math.
//!
//! `NutritionInfo` figures are always derived by scaling a per-serving
//! value by a quantity; nothing here enforces non-negativity, matching
//! the upstream data contract.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::{HealthGoal, UserProfile};

/// Calories per gram of protein and carbohydrate.
const KCAL_PER_GRAM_PROTEIN_CARB: f64 = 4.0;
/// Calories per gram of fat.
const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Calorie/macro/sodium bundle describing a food, meal, or target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionInfo {
    pub calories: f64,
    /// Grams.
    pub protein: f64,
    /// Grams.
    pub carbs: f64,
    /// Grams.
    pub fat: f64,
    /// Grams.
    pub fiber: f64,
    /// Grams.
    pub sugar: f64,
    /// Milligrams.
    pub sodium: f64,
}

impl NutritionInfo {
    /// Per-serving figures multiplied by a serving quantity.
    pub fn scaled(&self, quantity: f64) -> Self {
        Self {
            calories: self.calories * quantity,
            protein: self.protein * quantity,
            carbs: self.carbs * quantity,
            fat: self.fat * quantity,
            fiber: self.fiber * quantity,
            sugar: self.sugar * quantity,
            sodium: self.sodium * quantity,
        }
    }

    /// Folds another bundle into this one.
    pub fn accumulate(&mut self, other: &NutritionInfo) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fat += other.fat;
        self.fiber += other.fiber;
        self.sugar += other.sugar;
        self.sodium += other.sodium;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    Fruits,
    Vegetables,
    Grains,
    Protein,
    Dairy,
    Fats,
    Beverages,
    Snacks,
    Other,
}

/// A food item with per-serving nutrition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub nutrition: NutritionInfo,
    /// Human-readable serving description, e.g. "1 cup".
    pub serving_size: String,
    /// Weight of one serving in grams.
    pub serving_weight: f64,
    pub category: FoodCategory,
}

impl Food {
    pub fn new(
        name: impl Into<String>,
        nutrition: NutritionInfo,
        serving_size: impl Into<String>,
        serving_weight: f64,
        category: FoodCategory,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            brand: None,
            nutrition,
            serving_size: serving_size.into(),
            serving_weight,
            category,
        }
    }
}

/// Daily gram targets for the three macronutrients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroTargets {
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

/// Daily calorie target from the Mifflin-St Jeor basal rate scaled by
/// the profile's activity multiplier.
pub fn daily_calorie_target(profile: &UserProfile) -> u32 {
    let bmr = 10.0 * profile.weight + 6.25 * profile.height - 5.0 * f64::from(profile.age) + 5.0;
    (bmr * profile.activity_level.multiplier()).round() as u32
}

/// Splits a calorie target into macro gram targets, shifting the
/// ratios for muscle-gain and weight-loss goals.
pub fn macro_targets(calories: u32, goals: &[HealthGoal]) -> MacroTargets {
    let (protein_ratio, carb_ratio, fat_ratio) = if goals.contains(&HealthGoal::MuscleGain) {
        (0.30, 0.40, 0.30)
    } else if goals.contains(&HealthGoal::WeightLoss) {
        (0.30, 0.35, 0.35)
    } else {
        (0.25, 0.45, 0.30)
    };
    let calories = f64::from(calories);
    MacroTargets {
        protein: (calories * protein_ratio / KCAL_PER_GRAM_PROTEIN_CARB).round() as u32,
        carbs: (calories * carb_ratio / KCAL_PER_GRAM_PROTEIN_CARB).round() as u32,
        fat: (calories * fat_ratio / KCAL_PER_GRAM_FAT).round() as u32,
    }
}
