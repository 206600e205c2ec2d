use uuid::Uuid;

use crate::meals::{MealPlan, Recipe};
use crate::tracking::FoodLog;

/// Session-only holder of meal-planning state. Nothing here is
/// persisted across restarts; a reload starts from an empty store.
#[derive(Default)]
pub struct MealStore {
    current_meal_plan: Option<MealPlan>,
    saved_recipes: Vec<Recipe>,
    food_logs: Vec<FoodLog>,
    search_results: Vec<Recipe>,
    is_searching: bool,
    generated_recipes: Vec<Recipe>,
    is_generating: bool,
}

impl MealStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- accessors ----

    pub fn current_meal_plan(&self) -> Option<&MealPlan> {
        self.current_meal_plan.as_ref()
    }

    pub fn saved_recipes(&self) -> &[Recipe] {
        &self.saved_recipes
    }

    pub fn food_logs(&self) -> &[FoodLog] {
        &self.food_logs
    }

    pub fn search_results(&self) -> &[Recipe] {
        &self.search_results
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    pub fn generated_recipes(&self) -> &[Recipe] {
        &self.generated_recipes
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    // ---- mutations ----

    /// Replaces the current plan outright; no merge, no history.
    pub fn set_current_meal_plan(&mut self, plan: MealPlan) {
        self.current_meal_plan = Some(plan);
    }

    /// Saves a recipe. Set semantics by id: saving an already-saved
    /// recipe is a no-op.
    pub fn add_saved_recipe(&mut self, recipe: Recipe) {
        if self.saved_recipes.iter().any(|saved| saved.id == recipe.id) {
            return;
        }
        self.saved_recipes.push(recipe);
    }

    pub fn remove_saved_recipe(&mut self, recipe_id: Uuid) {
        self.saved_recipes.retain(|recipe| recipe.id != recipe_id);
    }

    /// Appends to the food-log list, preserving call order.
    pub fn add_food_log(&mut self, log: FoodLog) {
        self.food_logs.push(log);
    }

    pub fn remove_food_log(&mut self, log_id: Uuid) {
        self.food_logs.retain(|log| log.id != log_id);
    }

    pub fn set_search_results(&mut self, results: Vec<Recipe>) {
        self.search_results = results;
    }

    pub fn clear_search_results(&mut self) {
        self.search_results.clear();
    }

    pub fn set_is_searching(&mut self, searching: bool) {
        self.is_searching = searching;
    }

    /// Prepends to the generation history. Unconditional: the history
    /// keeps duplicates and is never pruned.
    pub fn add_generated_recipe(&mut self, recipe: Recipe) {
        self.generated_recipes.insert(0, recipe);
    }

    pub fn set_is_generating(&mut self, generating: bool) {
        self.is_generating = generating;
    }
}
