//! Typed boundary to the AI proxy: four POST JSON endpoints, a small
//! error taxonomy, and a static fallback plan. The stores never see
//! this layer; failures are handled by the session facade above them.

mod client;
mod error;
mod types;

pub use client::{fallback_meal_plan, CoachClient};
pub use error::AiError;
pub use types::{
    AnalyzeFoodRequest, AnalyzedNutrition, ChatRequest, FoodAnalysis, MealPlanRequest,
    RecipeRequest,
};
