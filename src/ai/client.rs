use std::time::Duration;

use chrono::{Days, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::AiError;
use super::types::{AnalyzeFoodRequest, ChatRequest, FoodAnalysis, MealPlanRequest, RecipeRequest};
use crate::config::AiSettings;
use crate::meals::{MealPlan, Recipe};
use crate::nutrition::NutritionInfo;
use crate::profile::UserProfile;

/// Connection timeout; request timeout comes from configuration.
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Deserialize)]
struct ChatResponseBody {
    response: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MealPlanResponseBody {
    meal_plan: MealPlan,
}

#[derive(Deserialize)]
struct RecipeResponseBody {
    recipe: Recipe,
}

/// Typed client for the AI proxy boundary.
///
/// One attempt per call: no retries, no backoff. Every call takes a
/// [`CancellationToken`]; once the token is cancelled the call
/// resolves to [`AiError::Cancelled`] without delivering a result, so
/// a torn-down caller can never apply a stale response.
pub struct CoachClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoachClient {
    /// Builds the client from the configured endpoint settings.
    pub fn new(settings: &AiSettings) -> Result<Self, AiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| AiError::Failed(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key(),
        })
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    async fn post<Req, Resp>(
        &self,
        endpoint: &str,
        request: &Req,
        cancel: &CancellationToken,
    ) -> Result<Resp, AiError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint);
        debug!(%url, "posting AI proxy request");
        let mut builder = self.client.post(&url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(AiError::Cancelled),
            result = builder.send() => {
                result.map_err(|e| AiError::Failed(format!("request to {url} failed: {e}")))?
            }
        };
        let status = response.status();
        let body = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(AiError::Cancelled),
            result = response.text() => {
                result.map_err(|e| AiError::Failed(format!("failed to read response from {url}: {e}")))?
            }
        };
        if !status.is_success() {
            warn!(%url, %status, "AI proxy returned an error");
            return Err(AiError::from_response(status, &body));
        }
        serde_json::from_str(&body)
            .map_err(|e| AiError::Failed(format!("failed to parse response from {url}: {e}")))
    }

    /// Estimates nutrition for a food described by text or an image
    /// description.
    pub async fn analyze_food(
        &self,
        request: &AnalyzeFoodRequest,
        cancel: &CancellationToken,
    ) -> Result<FoodAnalysis, AiError> {
        self.post("analyze-food", request, cancel).await
    }

    /// One coach turn; returns the assistant's reply text.
    pub async fn chat(
        &self,
        request: &ChatRequest,
        cancel: &CancellationToken,
    ) -> Result<String, AiError> {
        let body: ChatResponseBody = self.post("chat", request, cancel).await?;
        Ok(body.response)
    }

    /// Generates a personalized meal plan.
    pub async fn meal_plan(
        &self,
        request: &MealPlanRequest,
        cancel: &CancellationToken,
    ) -> Result<MealPlan, AiError> {
        let body: MealPlanResponseBody = self.post("meal-plan", request, cancel).await?;
        Ok(body.meal_plan)
    }

    /// Generates a recipe from available ingredients.
    pub async fn recipe(
        &self,
        request: &RecipeRequest,
        cancel: &CancellationToken,
    ) -> Result<Recipe, AiError> {
        let body: RecipeResponseBody = self.post("recipe", request, cancel).await?;
        Ok(body.recipe)
    }
}

/// The static plan substituted when generation fails outright: a
/// week-shaped shell with the stock 2000-calorie target.
pub fn fallback_meal_plan(profile: &UserProfile, days: u32) -> MealPlan {
    let start_date = Utc::now().date_naive();
    let end_date = start_date + Days::new(u64::from(days.saturating_sub(1)));
    MealPlan {
        id: Uuid::new_v4(),
        user_id: profile.id,
        name: "Basic Healthy Plan".to_string(),
        start_date,
        end_date,
        meals: Vec::new(),
        target_nutrition: NutritionInfo {
            calories: 2000.0,
            protein: 125.0,
            carbs: 225.0,
            fat: 67.0,
            fiber: 25.0,
            sugar: 50.0,
            sodium: 2300.0,
        },
        created_at: Utc::now(),
    }
}
