//! Application facade wiring config, stores, persistence, and the AI
//! client together.
//!
//! Store mutations stay synchronous and infallible; every fallible
//! flow (network, disk, missing profile) lives here, so the UI shell
//! has exactly one error boundary.

use anyhow::{Context, Result};
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use uuid::Uuid;

use crate::ai::{
    fallback_meal_plan, AiError, AnalyzeFoodRequest, ChatRequest, CoachClient, MealPlanRequest,
    RecipeRequest,
};
use crate::badges::{self, UserBadge};
use crate::chat::{ChatMessage, ChatSession};
use crate::config::{ensure_workspace_structure, AppConfig};
use crate::insights;
use crate::meals::{MealPlan, MealType, Recipe};
use crate::nutrition::{daily_calorie_target, macro_targets, MacroTargets};
use crate::profile::UserProfile;
use crate::storage::{SlotPersistence, UserStateSlot};
use crate::store::{MealStore, UserStore};
use crate::tracking::{DailyLog, FoodLog};

/// Targets derived from the profile at onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTargets {
    pub calories: u32,
    pub macros: MacroTargets,
    pub water_ml: u32,
}

/// One running application session: the stores plus everything that
/// can fail around them.
pub struct AppSession {
    config: AppConfig,
    ai: CoachClient,
    user: UserStore,
    meals: MealStore,
}

impl AppSession {
    /// Opens a session: rehydrates the persisted user state from the
    /// durable slot, subscribes slot persistence to the user store,
    /// and builds the AI client from config.
    pub fn open(config: AppConfig) -> Result<Self> {
        let paths = ensure_workspace_structure()?;
        let slot = UserStateSlot::for_workspace(&paths);
        let mut user = match slot.load()? {
            Some(snapshot) => UserStore::with_snapshot(snapshot),
            None => UserStore::new(),
        };
        user.subscribe(Box::new(SlotPersistence::new(slot)));
        let ai = CoachClient::new(&config.ai)?;
        Ok(Self {
            config,
            ai,
            user,
            meals: MealStore::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn user(&self) -> &UserStore {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut UserStore {
        &mut self.user
    }

    pub fn meals(&self) -> &MealStore {
        &self.meals
    }

    pub fn meals_mut(&mut self) -> &mut MealStore {
        &mut self.meals
    }

    fn require_profile(&self) -> Result<UserProfile> {
        self.user
            .profile()
            .cloned()
            .context("No profile. Complete onboarding first.")
    }

    /// Today's log, or a fresh one seeded with the profile-derived
    /// calorie target (config defaults before onboarding).
    fn today_log_or_default(&self) -> DailyLog {
        if let Some(log) = self.user.today_log() {
            return log.clone();
        }
        let target_calories = self
            .user
            .profile()
            .map(daily_calorie_target)
            .unwrap_or(self.config.tracking.default_target_calories);
        DailyLog::new(
            Utc::now().date_naive(),
            target_calories,
            self.config.tracking.default_target_water_ml,
        )
    }

    /// Stores the onboarding profile and seeds today's log with the
    /// targets derived from it.
    pub fn complete_onboarding(&mut self, profile: UserProfile) -> DailyTargets {
        let calories = daily_calorie_target(&profile);
        let macros = macro_targets(calories, &profile.health_goals);
        let water_ml = self.config.tracking.default_target_water_ml;
        self.user.set_profile(profile);
        self.user
            .set_today_log(DailyLog::new(Utc::now().date_naive(), calories, water_ml));
        DailyTargets {
            calories,
            macros,
            water_ml,
        }
    }

    /// Adds water to today's log, seeding the log if necessary.
    pub fn log_water(&mut self, ml: u32) {
        let mut log = self.today_log_or_default();
        log.add_water(ml);
        self.user.set_today_log(log);
    }

    /// Analyzes a food input through the proxy, then records the
    /// scaled result in the meal store and today's log.
    pub async fn analyze_and_log_food(
        &mut self,
        input: &str,
        is_image_description: bool,
        meal_type: MealType,
        quantity: f64,
        cancel: &CancellationToken,
    ) -> Result<FoodLog> {
        let profile = self.require_profile()?;
        let request = AnalyzeFoodRequest {
            text: input.to_string(),
            is_image_description,
        };
        let analysis = self.ai.analyze_food(&request, cancel).await?;
        let log = FoodLog::new(
            profile.id,
            Utc::now().date_naive(),
            meal_type,
            analysis.into_food(),
            quantity,
        );
        self.meals.add_food_log(log.clone());
        let mut today = self.today_log_or_default();
        today.add_entry(log.clone());
        self.user.set_today_log(today);
        Ok(log)
    }

    /// Starts a new coach conversation and makes it active.
    pub fn start_chat_session(&mut self) -> Result<Uuid> {
        let profile = self.require_profile()?;
        let session = ChatSession::new(profile.id);
        let session_id = session.id;
        self.user.add_chat_session(session);
        self.user.set_active_chat_session(Some(session_id));
        Ok(session_id)
    }

    /// One coach exchange: appends the user message, asks the proxy,
    /// appends the reply. Proxy failures still append a coach-facing
    /// explanation before the error is returned; a cancelled call
    /// leaves the conversation with only the user message.
    pub async fn coach_turn(
        &mut self,
        session_id: Uuid,
        message: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let profile = self.require_profile()?;
        let context = self
            .user
            .chat_session(session_id)
            .map(|session| session.recent_context(self.config.tracking.chat_context_messages))
            .context("Unknown chat session")?;
        self.user
            .append_chat_message(session_id, ChatMessage::user(message));
        let request = ChatRequest {
            message: message.to_string(),
            user_profile: Some(profile),
            context: if context.is_empty() {
                None
            } else {
                Some(context)
            },
        };
        match self.ai.chat(&request, cancel).await {
            Ok(reply) => {
                self.user
                    .append_chat_message(session_id, ChatMessage::assistant(reply.clone()));
                Ok(reply)
            }
            Err(AiError::Cancelled) => Err(AiError::Cancelled.into()),
            Err(error) => {
                self.user
                    .append_chat_message(session_id, ChatMessage::assistant(error.coach_reply()));
                Err(error.into())
            }
        }
    }

    /// Generates a meal plan and stores it as the current plan. A
    /// generic generation failure substitutes the static fallback
    /// plan; configuration and rate-limit failures propagate.
    pub async fn generate_meal_plan(
        &mut self,
        preferences: Option<Vec<String>>,
        cancel: &CancellationToken,
    ) -> Result<MealPlan> {
        let profile = self.require_profile()?;
        let days = self.config.ai.plan_days;
        self.meals.set_is_generating(true);
        let request = MealPlanRequest {
            user_profile: profile.clone(),
            days,
            preferences,
        };
        let result = self.ai.meal_plan(&request, cancel).await;
        self.meals.set_is_generating(false);
        let plan = match result {
            Ok(plan) => plan,
            Err(AiError::Failed(error)) => {
                warn!(%error, "meal plan generation failed; substituting fallback plan");
                fallback_meal_plan(&profile, days)
            }
            Err(error) => return Err(error.into()),
        };
        self.meals.set_current_meal_plan(plan.clone());
        Ok(plan)
    }

    /// Generates a recipe from ingredients. The result lands in the
    /// search results and the generation history; failures clear the
    /// search results and propagate.
    pub async fn generate_recipe(
        &mut self,
        ingredients: Vec<String>,
        servings: Option<u32>,
        cancel: &CancellationToken,
    ) -> Result<Recipe> {
        let profile = self.require_profile()?;
        self.meals.set_is_searching(true);
        let request = RecipeRequest {
            ingredients,
            dietary_preferences: Some(profile.dietary_preferences.clone()),
            servings,
        };
        let result = self.ai.recipe(&request, cancel).await;
        self.meals.set_is_searching(false);
        match result {
            Ok(recipe) => {
                self.meals.set_search_results(vec![recipe.clone()]);
                self.meals.add_generated_recipe(recipe.clone());
                Ok(recipe)
            }
            Err(AiError::Cancelled) => Err(AiError::Cancelled.into()),
            Err(error) => {
                self.meals.clear_search_results();
                Err(error.into())
            }
        }
    }

    /// Recomputes the logging streak from the food logs.
    pub fn refresh_streak(&mut self) -> u32 {
        let streak = insights::logging_streak(self.meals.food_logs(), Utc::now().date_naive());
        self.user.set_current_streak(streak);
        streak
    }

    /// Awards any catalog badge whose criteria progress has reached
    /// 100%. Returns the newly earned badges; already-earned badges
    /// are untouched.
    pub fn refresh_badges(&mut self) -> Vec<UserBadge> {
        let streak = self.user.current_streak();
        let log_count = self.meals.food_logs().len();
        let mut newly_earned = Vec::new();
        for badge in badges::catalog() {
            let already = self
                .user
                .badges()
                .iter()
                .any(|earned| earned.badge.id == badge.id);
            if already {
                continue;
            }
            if badges::progress_toward(&badge, streak, log_count) >= 100.0 {
                let earned = UserBadge::earned_now(badge);
                self.user.add_badge(earned.clone());
                newly_earned.push(earned);
            }
        }
        newly_earned
    }
}
