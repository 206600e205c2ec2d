//! Achievement catalog and earned-badge records.
//!
//! `Badge` definitions are static system data; `UserBadge` is the
//! user's earned instance. The user store guarantees at most one
//! earned instance per badge id, first earned wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    Nutrition,
    Hydration,
    Consistency,
    Goals,
    Social,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaKind {
    Streak,
    Total,
    Daily,
    Achievement,
}

/// What the user must do to earn a badge, e.g. a 7-day streak of the
/// `water_goal` metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeCriteria {
    #[serde(rename = "type")]
    pub kind: CriteriaKind,
    pub value: u32,
    pub metric: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: BadgeCategory,
    pub criteria: BadgeCriteria,
}

impl Badge {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        icon: &str,
        category: BadgeCategory,
        kind: CriteriaKind,
        value: u32,
        metric: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            category,
            criteria: BadgeCriteria {
                kind,
                value,
                metric: metric.to_string(),
            },
        }
    }
}

/// An earned badge with the timestamp of the first award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBadge {
    pub badge: Badge,
    pub earned_at: DateTime<Utc>,
    /// Percent toward the criteria at award time.
    #[serde(default)]
    pub progress: Option<f64>,
}

impl UserBadge {
    pub fn earned_now(badge: Badge) -> Self {
        Self {
            badge,
            earned_at: Utc::now(),
            progress: Some(100.0),
        }
    }
}

/// The predefined achievement catalog.
pub fn catalog() -> Vec<Badge> {
    vec![
        Badge::new(
            "hydration_hero",
            "Hydration Hero",
            "Drink your daily water goal for 7 days straight",
            "💧",
            BadgeCategory::Hydration,
            CriteriaKind::Streak,
            7,
            "water_goal",
        ),
        Badge::new(
            "meal_planner",
            "Meal Planner",
            "Log all meals for 5 consecutive days",
            "📋",
            BadgeCategory::Consistency,
            CriteriaKind::Streak,
            5,
            "complete_logging",
        ),
        Badge::new(
            "protein_power",
            "Protein Power",
            "Meet your protein goals for 10 days",
            "💪",
            BadgeCategory::Nutrition,
            CriteriaKind::Total,
            10,
            "protein_goal",
        ),
        Badge::new(
            "calorie_conscious",
            "Calorie Conscious",
            "Stay within 100 calories of your target for 7 days",
            "🎯",
            BadgeCategory::Nutrition,
            CriteriaKind::Streak,
            7,
            "calorie_accuracy",
        ),
        Badge::new(
            "veggie_lover",
            "Veggie Lover",
            "Log vegetables in 15 different meals",
            "🥗",
            BadgeCategory::Nutrition,
            CriteriaKind::Total,
            15,
            "vegetable_meals",
        ),
        Badge::new(
            "streak_master",
            "Streak Master",
            "Log meals for 30 consecutive days",
            "🔥",
            BadgeCategory::Consistency,
            CriteriaKind::Streak,
            30,
            "daily_logging",
        ),
        Badge::new(
            "early_bird",
            "Early Bird",
            "Log breakfast before 9 AM for 7 days",
            "🌅",
            BadgeCategory::Consistency,
            CriteriaKind::Streak,
            7,
            "early_breakfast",
        ),
        Badge::new(
            "balanced_diet",
            "Balanced Diet",
            "Hit all macro targets in a single day",
            "⚖️",
            BadgeCategory::Nutrition,
            CriteriaKind::Achievement,
            1,
            "macro_balance",
        ),
        Badge::new(
            "recipe_explorer",
            "Recipe Explorer",
            "Try 10 different AI-generated recipes",
            "👨‍🍳",
            BadgeCategory::Goals,
            CriteriaKind::Total,
            10,
            "recipes_tried",
        ),
        Badge::new(
            "goal_crusher",
            "Goal Crusher",
            "Achieve your weekly nutrition goal",
            "🏆",
            BadgeCategory::Goals,
            CriteriaKind::Achievement,
            1,
            "weekly_goal",
        ),
    ]
}

/// Percent progress toward an unearned badge, derived from the
/// current logging streak and total food-log count. Daily and
/// achievement criteria have no running counter and report zero.
pub fn progress_toward(badge: &Badge, streak_days: u32, food_log_count: usize) -> f64 {
    let units = match badge.criteria.kind {
        CriteriaKind::Streak => f64::from(streak_days),
        CriteriaKind::Total => food_log_count as f64,
        CriteriaKind::Daily | CriteriaKind::Achievement => 0.0,
    };
    (units * 100.0 / f64::from(badge.criteria.value)).min(100.0)
}
