//! Request and response shapes for the four proxy endpoints. Field
//! names serialize in the proxy's camelCase convention.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::nutrition::{Food, FoodCategory, NutritionInfo};
use crate::profile::{DietaryPreference, UserProfile};

/// Input to `analyze-food`: free text or an image description.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeFoodRequest {
    pub text: String,
    pub is_image_description: bool,
}

/// Macro estimate returned by food analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedNutrition {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

/// What the proxy estimated for one food input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodAnalysis {
    pub food_name: String,
    pub estimated_calories: f64,
    pub nutrition: AnalyzedNutrition,
    pub serving_size: String,
}

impl FoodAnalysis {
    /// Converts the estimate into a loggable food. Sugar and sodium
    /// are not part of the analysis and default to zero; the serving
    /// weight defaults to 100 g and the category to `Other`.
    pub fn into_food(self) -> Food {
        Food {
            id: Uuid::new_v4(),
            name: self.food_name,
            brand: None,
            nutrition: NutritionInfo {
                calories: self.estimated_calories,
                protein: self.nutrition.protein,
                carbs: self.nutrition.carbs,
                fat: self.nutrition.fat,
                fiber: self.nutrition.fiber,
                sugar: 0.0,
                sodium: 0.0,
            },
            serving_size: self.serving_size,
            serving_weight: 100.0,
            category: FoodCategory::Other,
        }
    }
}

/// Input to `chat`: the user's message plus optional personalization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<UserProfile>,
    /// Recent conversation content, oldest first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<String>>,
}

/// Input to `meal-plan`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    pub user_profile: UserProfile,
    pub days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Vec<String>>,
}

/// Input to `recipe`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    pub ingredients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_preferences: Option<Vec<DietaryPreference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
}
