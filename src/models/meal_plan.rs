// src/models/meal_plan.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

/// Represents the 'meal_plans' table: at most one row per user.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: i64,
    pub user_id: i64,
    pub week_plan: Json<Vec<DayPlan>>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// One day of the week plan. Recipe ids are stored as given; they are not
/// validated against the recipes table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: String,
    pub recipes: Vec<i64>,
}

/// DTO for saving (upserting) the week plan.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMealPlanRequest {
    pub week_plan: Vec<DayPlan>,
}
