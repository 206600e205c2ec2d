use httpmock::prelude::*;
use tokio_util::sync::CancellationToken;

use nutribase::ai::{
    AiError, AnalyzeFoodRequest, ChatRequest, CoachClient, MealPlanRequest, RecipeRequest,
};
use nutribase::config::AiSettings;

use crate::support::{sample_meal_plan, sample_profile, sample_recipe};

fn settings_for(server: &MockServer) -> AiSettings {
    AiSettings {
        base_url: server.url("/api/ai"),
        request_timeout_secs: 5,
        plan_days: 7,
    }
}

fn client_for(server: &MockServer) -> CoachClient {
    CoachClient::new(&settings_for(server)).expect("client should build")
}

#[tokio::test]
async fn analyze_food_decodes_the_estimate() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/ai/analyze-food");
        then.status(200).json_body(serde_json::json!({
            "foodName": "Grilled chicken breast",
            "estimatedCalories": 165.0,
            "nutrition": { "protein": 31.0, "carbs": 0.0, "fat": 3.6, "fiber": 0.0 },
            "servingSize": "100g"
        }));
    });

    let client = client_for(&server);
    let request = AnalyzeFoodRequest {
        text: "grilled chicken breast".to_string(),
        is_image_description: false,
    };
    let analysis = client
        .analyze_food(&request, &CancellationToken::new())
        .await
        .unwrap();

    mock.assert();
    assert_eq!(analysis.food_name, "Grilled chicken breast");
    assert_eq!(analysis.estimated_calories, 165.0);
    assert_eq!(analysis.nutrition.protein, 31.0);
    assert_eq!(analysis.serving_size, "100g");
}

#[tokio::test]
async fn chat_unwraps_the_response_field() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/ai/chat");
        then.status(200)
            .json_body(serde_json::json!({ "response": "Aim for 1.6g/kg of protein." }));
    });

    let client = client_for(&server);
    let request = ChatRequest {
        message: "How much protein?".to_string(),
        user_profile: Some(sample_profile()),
        context: None,
    };
    let reply = client.chat(&request, &CancellationToken::new()).await.unwrap();
    assert_eq!(reply, "Aim for 1.6g/kg of protein.");
}

#[tokio::test]
async fn meal_plan_decodes_the_wrapped_plan() {
    let server = MockServer::start();
    let profile = sample_profile();
    let plan = sample_meal_plan(profile.id, "AI Generated Weekly Plan");
    server.mock(|when, then| {
        when.method(POST).path("/api/ai/meal-plan");
        then.status(200)
            .json_body(serde_json::json!({ "mealPlan": &plan }));
    });

    let client = client_for(&server);
    let request = MealPlanRequest {
        user_profile: profile,
        days: 7,
        preferences: None,
    };
    let decoded = client
        .meal_plan(&request, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(decoded.id, plan.id);
    assert_eq!(decoded.name, "AI Generated Weekly Plan");
    assert_eq!(decoded.start_date, plan.start_date);
}

#[tokio::test]
async fn recipe_decodes_the_wrapped_recipe() {
    let server = MockServer::start();
    let recipe = sample_recipe("Chickpea Curry");
    server.mock(|when, then| {
        when.method(POST).path("/api/ai/recipe");
        then.status(200)
            .json_body(serde_json::json!({ "recipe": &recipe }));
    });

    let client = client_for(&server);
    let request = RecipeRequest {
        ingredients: vec!["chickpeas".to_string(), "coconut milk".to_string()],
        dietary_preferences: None,
        servings: Some(2),
    };
    let decoded = client
        .recipe(&request, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(decoded.id, recipe.id);
}

#[tokio::test]
async fn proxy_statuses_map_onto_the_error_taxonomy() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/ai/chat");
        then.status(400)
            .json_body(serde_json::json!({ "error": "Message is required" }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/ai/recipe");
        then.status(429).json_body(serde_json::json!({
            "error": "AI service is currently rate limited. Please try again later."
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/ai/meal-plan");
        then.status(500).json_body(serde_json::json!({
            "error": "AI service is not configured. Please check your OpenAI API key."
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/ai/analyze-food");
        then.status(500).json_body(serde_json::json!({
            "error": "Failed to analyze food. Please try again."
        }));
    });

    let client = client_for(&server);
    let cancel = CancellationToken::new();

    let chat = client
        .chat(
            &ChatRequest {
                message: String::new(),
                user_profile: None,
                context: None,
            },
            &cancel,
        )
        .await;
    assert!(matches!(chat, Err(AiError::InvalidInput(_))));

    let recipe = client
        .recipe(
            &RecipeRequest {
                ingredients: vec!["rice".to_string()],
                dietary_preferences: None,
                servings: None,
            },
            &cancel,
        )
        .await;
    assert!(matches!(recipe, Err(AiError::RateLimited(_))));

    let plan = client
        .meal_plan(
            &MealPlanRequest {
                user_profile: sample_profile(),
                days: 7,
                preferences: None,
            },
            &cancel,
        )
        .await;
    assert!(matches!(plan, Err(AiError::NotConfigured(_))));

    let analysis = client
        .analyze_food(
            &AnalyzeFoodRequest {
                text: "mystery".to_string(),
                is_image_description: false,
            },
            &cancel,
        )
        .await;
    assert!(matches!(analysis, Err(AiError::Failed(_))));
}

#[tokio::test]
async fn cancelled_token_short_circuits_before_any_request() {
    // Unroutable endpoint: the call must not even attempt to connect.
    let settings = AiSettings {
        base_url: "http://127.0.0.1:9/api/ai".to_string(),
        request_timeout_secs: 5,
        plan_days: 7,
    };
    let client = CoachClient::new(&settings).unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = client
        .analyze_food(
            &AnalyzeFoodRequest {
                text: "anything".to_string(),
                is_image_description: false,
            },
            &cancel,
        )
        .await;
    assert!(matches!(result, Err(AiError::Cancelled)));
}
