use httpmock::prelude::*;
use serial_test::serial;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use chrono::{Days, Utc};
use nutribase::chat::MessageRole;
use nutribase::config::{AiSettings, AppConfig};
use nutribase::meals::MealType;
use nutribase::session::AppSession;

use crate::support::{food_log_on, sample_profile, sample_recipe};
use crate::IntegrationHarness;

fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        ai: AiSettings {
            base_url: server.url("/api/ai"),
            request_timeout_secs: 5,
            plan_days: 7,
        },
        tracking: Default::default(),
    }
}

fn offline_session() -> AppSession {
    AppSession::open(AppConfig::default()).expect("session should open")
}

#[test]
#[serial]
fn onboarding_derives_targets_and_seeds_today() {
    let _harness = IntegrationHarness::new();
    let mut session = offline_session();

    let targets = session.complete_onboarding(sample_profile());
    // BMR 1648.75 * 1.55 for moderate activity.
    assert_eq!(targets.calories, 2556);
    assert_eq!(targets.water_ml, 2500);
    // Weight-loss split: 30/35/35.
    assert_eq!(targets.macros.protein, 192);
    assert_eq!(targets.macros.carbs, 224);
    assert_eq!(targets.macros.fat, 99);

    assert!(session.user().is_authenticated());
    let log = session.user().today_log().expect("today log seeded");
    assert_eq!(log.target_calories, 2556);
    assert_eq!(log.target_water, 2500);
    assert!(log.logs.is_empty());
}

#[test]
#[serial]
fn log_water_seeds_a_default_log_and_accumulates() {
    let _harness = IntegrationHarness::new();
    let mut session = offline_session();

    session.log_water(500);
    let log = session.user().today_log().unwrap();
    // No profile yet: config fallbacks apply.
    assert_eq!(log.target_calories, 2000);
    assert_eq!(log.target_water, 2500);
    assert_eq!(log.water_intake, 500);

    session.log_water(300);
    assert_eq!(session.user().today_log().unwrap().water_intake, 800);
}

#[tokio::test]
#[serial]
async fn analyze_and_log_food_folds_scaled_nutrition_into_today() {
    let _harness = IntegrationHarness::new();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/ai/analyze-food");
        then.status(200).json_body(serde_json::json!({
            "foodName": "Oatmeal",
            "estimatedCalories": 150.0,
            "nutrition": { "protein": 5.0, "carbs": 27.0, "fat": 3.0, "fiber": 4.0 },
            "servingSize": "1 cup"
        }));
    });
    let mut session = AppSession::open(config_for(&server)).unwrap();
    session.complete_onboarding(sample_profile());

    let log = session
        .analyze_and_log_food(
            "bowl of oatmeal",
            false,
            MealType::Breakfast,
            2.0,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    // Scaled figures on the log, per-serving figures on the food.
    assert_eq!(log.nutrition.calories, 300.0);
    assert_eq!(log.nutrition.protein, 10.0);
    assert_eq!(log.food.nutrition.calories, 150.0);
    assert_eq!(log.food.name, "Oatmeal");

    assert_eq!(session.meals().food_logs().len(), 1);
    let today = session.user().today_log().unwrap();
    assert_eq!(today.logs.len(), 1);
    assert_eq!(today.total_nutrition.calories, 300.0);
    assert_eq!(today.total_nutrition.carbs, 54.0);
}

#[tokio::test]
#[serial]
async fn coach_turn_appends_both_sides_of_the_exchange() {
    let _harness = IntegrationHarness::new();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/ai/chat");
        then.status(200)
            .json_body(serde_json::json!({ "response": "Plenty of lentils will help." }));
    });
    let mut session = AppSession::open(config_for(&server)).unwrap();
    session.complete_onboarding(sample_profile());

    let session_id = session.start_chat_session().unwrap();
    assert_eq!(session.user().active_chat_session(), Some(session_id));

    let reply = session
        .coach_turn(session_id, "Best vegan protein?", &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(reply, "Plenty of lentils will help.");

    let chat = session.user().chat_session(session_id).unwrap();
    assert_eq!(chat.messages.len(), 2);
    assert_eq!(chat.messages[0].role, MessageRole::User);
    assert_eq!(chat.messages[1].role, MessageRole::Assistant);
}

#[tokio::test]
#[serial]
async fn coach_turn_failure_appends_a_coach_facing_reply() {
    let _harness = IntegrationHarness::new();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/ai/chat");
        then.status(429).json_body(serde_json::json!({
            "error": "AI service is currently rate limited. Please try again later."
        }));
    });
    let mut session = AppSession::open(config_for(&server)).unwrap();
    session.complete_onboarding(sample_profile());
    let session_id = session.start_chat_session().unwrap();

    let result = session
        .coach_turn(session_id, "hello?", &CancellationToken::new())
        .await;
    assert!(result.is_err());

    let chat = session.user().chat_session(session_id).unwrap();
    assert_eq!(chat.messages.len(), 2);
    assert_eq!(
        chat.messages[1].content,
        "I'm receiving too many requests right now. Please try again in a moment."
    );
}

#[tokio::test]
#[serial]
async fn meal_plan_generic_failure_substitutes_the_fallback() {
    let _harness = IntegrationHarness::new();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/ai/meal-plan");
        then.status(500).json_body(serde_json::json!({
            "error": "Failed to generate meal plan. Please try again."
        }));
    });
    let mut session = AppSession::open(config_for(&server)).unwrap();
    session.complete_onboarding(sample_profile());

    let plan = session
        .generate_meal_plan(None, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(plan.name, "Basic Healthy Plan");
    assert_eq!(plan.target_nutrition.calories, 2000.0);
    assert_eq!(plan.end_date, plan.start_date + Days::new(6));

    assert!(!session.meals().is_generating());
    assert_eq!(
        session.meals().current_meal_plan().unwrap().id,
        plan.id
    );
}

#[tokio::test]
#[serial]
async fn meal_plan_configuration_failure_propagates() {
    let _harness = IntegrationHarness::new();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/ai/meal-plan");
        then.status(500).json_body(serde_json::json!({
            "error": "AI service is not configured. Please check your OpenAI API key."
        }));
    });
    let mut session = AppSession::open(config_for(&server)).unwrap();
    session.complete_onboarding(sample_profile());

    let result = session
        .generate_meal_plan(None, &CancellationToken::new())
        .await;
    assert!(result.is_err());
    assert!(session.meals().current_meal_plan().is_none());
    assert!(!session.meals().is_generating());
}

#[tokio::test]
#[serial]
async fn generate_recipe_fills_search_results_and_history() {
    let _harness = IntegrationHarness::new();
    let server = MockServer::start();
    let recipe = sample_recipe("Chickpea Curry");
    server.mock(|when, then| {
        when.method(POST).path("/api/ai/recipe");
        then.status(200)
            .json_body(serde_json::json!({ "recipe": &recipe }));
    });
    let mut session = AppSession::open(config_for(&server)).unwrap();
    session.complete_onboarding(sample_profile());

    let generated = session
        .generate_recipe(
            vec!["chickpeas".to_string()],
            Some(2),
            &CancellationToken::new(),
        )
        .await
        .unwrap();
    assert_eq!(generated.id, recipe.id);
    assert_eq!(session.meals().search_results().len(), 1);
    assert_eq!(session.meals().generated_recipes().len(), 1);
    assert!(!session.meals().is_searching());
}

#[test]
#[serial]
fn streak_and_badges_follow_the_logs() {
    let _harness = IntegrationHarness::new();
    let mut session = offline_session();
    let user_id = Uuid::new_v4();
    let today = Utc::now().date_naive();

    for back in 0..5u64 {
        let date = today - Days::new(back);
        session.meals_mut().add_food_log(food_log_on(user_id, date, 400.0));
    }

    assert_eq!(session.refresh_streak(), 5);
    assert_eq!(session.user().current_streak(), 5);

    let earned = session.refresh_badges();
    // A 5-day streak earns Meal Planner but not the 7-day badges.
    assert_eq!(earned.len(), 1);
    assert_eq!(earned[0].badge.id, "meal_planner");
    assert_eq!(session.user().badges().len(), 1);

    // Awards are idempotent across refreshes.
    assert!(session.refresh_badges().is_empty());
    assert_eq!(session.user().badges().len(), 1);
}
