//! User identity and physiology records captured during onboarding.
//!
//! Profiles are plain data: validation belongs to the onboarding form
//! in the UI shell, not to this layer. The only invariant maintained
//! here is that `updated_at` never precedes `created_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How physically active the user is on a typical week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Multiplier applied to the basal metabolic rate for this level.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryPreference {
    Vegetarian,
    Vegan,
    Keto,
    Paleo,
    Mediterranean,
    Halal,
    Kosher,
    GlutenFree,
    DairyFree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthGoal {
    WeightLoss,
    WeightGain,
    MuscleGain,
    MaintainWeight,
    ImproveHealth,
    IncreaseEnergy,
}

/// Identity and physiology record for the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: u32,
    /// Body weight in kilograms.
    pub weight: f64,
    /// Height in centimeters.
    pub height: f64,
    pub activity_level: ActivityLevel,
    pub dietary_preferences: Vec<DietaryPreference>,
    pub health_goals: Vec<HealthGoal>,
    pub allergies: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        age: u32,
        weight: f64,
        height: f64,
        activity_level: ActivityLevel,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            age,
            weight,
            height,
            activity_level,
            dietary_preferences: Vec::new(),
            health_goals: Vec::new(),
            allergies: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_dietary_preferences(mut self, preferences: Vec<DietaryPreference>) -> Self {
        self.dietary_preferences = preferences;
        dedup_in_place(&mut self.dietary_preferences);
        self
    }

    pub fn with_health_goals(mut self, goals: Vec<HealthGoal>) -> Self {
        self.health_goals = goals;
        dedup_in_place(&mut self.health_goals);
        self
    }

    pub fn with_allergies(mut self, allergies: Vec<String>) -> Self {
        self.allergies = allergies;
        self
    }

    /// Applies a partial update with last-write-wins semantics and
    /// stamps `updated_at`. `id` and `created_at` are never touched.
    pub fn apply_update(&mut self, update: &ProfileUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(weight) = update.weight {
            self.weight = weight;
        }
        if let Some(height) = update.height {
            self.height = height;
        }
        if let Some(level) = update.activity_level {
            self.activity_level = level;
        }
        if let Some(preferences) = &update.dietary_preferences {
            self.dietary_preferences = preferences.clone();
            dedup_in_place(&mut self.dietary_preferences);
        }
        if let Some(goals) = &update.health_goals {
            self.health_goals = goals.clone();
            dedup_in_place(&mut self.health_goals);
        }
        if let Some(allergies) = &update.allergies {
            self.allergies = allergies.clone();
        }
        self.updated_at = Utc::now();
    }
}

/// Partial profile update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub dietary_preferences: Option<Vec<DietaryPreference>>,
    pub health_goals: Option<Vec<HealthGoal>>,
    pub allergies: Option<Vec<String>>,
}

impl ProfileUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn health_goals(mut self, goals: Vec<HealthGoal>) -> Self {
        self.health_goals = Some(goals);
        self
    }
}

/// Removes duplicate tags while preserving first-seen order.
fn dedup_in_place<T: PartialEq + Copy>(values: &mut Vec<T>) {
    let mut seen: Vec<T> = Vec::with_capacity(values.len());
    values.retain(|value| {
        if seen.contains(value) {
            false
        } else {
            seen.push(*value);
            true
        }
    });
}
