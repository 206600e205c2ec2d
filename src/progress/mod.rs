use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Optional tape measurements in centimeters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMeasurements {
    #[serde(default)]
    pub chest: Option<f64>,
    #[serde(default)]
    pub waist: Option<f64>,
    #[serde(default)]
    pub hips: Option<f64>,
    #[serde(default)]
    pub arms: Option<f64>,
    #[serde(default)]
    pub thighs: Option<f64>,
}

/// One dated check-in of body metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    /// Kilograms.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Percent.
    #[serde(default)]
    pub body_fat: Option<f64>,
    #[serde(default)]
    pub measurements: Option<BodyMeasurements>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ProgressEntry {
    pub fn new(user_id: Uuid, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            date,
            weight: None,
            body_fat: None,
            measurements: None,
            notes: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_body_fat(mut self, body_fat: f64) -> Self {
        self.body_fat = Some(body_fat);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
