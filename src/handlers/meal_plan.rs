// src/handlers/meal_plan.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::meal_plan::{MealPlan, SaveMealPlanRequest},
    utils::jwt::Claims,
};

async fn fetch_plan(pool: &SqlitePool, user_id: i64) -> Result<Option<MealPlan>, AppError> {
    let plan = sqlx::query_as::<_, MealPlan>("SELECT * FROM meal_plans WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(plan)
}

/// Create or replace the current user's meal plan. The week plan is replaced
/// wholesale; there is no per-day merge and referenced recipe ids are not
/// checked.
pub async fn save_meal_plan(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SaveMealPlanRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let now = chrono::Utc::now();

    let plan = match fetch_plan(&pool, user_id).await? {
        Some(mut plan) => {
            plan.week_plan.0 = payload.week_plan;
            plan.updated_at = Some(now);

            sqlx::query("UPDATE meal_plans SET week_plan = ?, updated_at = ? WHERE user_id = ?")
                .bind(&plan.week_plan)
                .bind(plan.updated_at)
                .bind(user_id)
                .execute(&pool)
                .await?;

            plan
        }
        None => {
            sqlx::query(
                "INSERT INTO meal_plans (user_id, week_plan, created_at, updated_at) VALUES (?, ?, ?, ?)",
            )
            .bind(user_id)
            .bind(sqlx::types::Json(&payload.week_plan))
            .bind(now)
            .bind(now)
            .execute(&pool)
            .await?;

            fetch_plan(&pool, user_id)
                .await?
                .ok_or_else(|| AppError::InternalServerError("Meal plan insert lost".to_string()))?
        }
    };

    Ok(Json(json!({
        "message": "Meal plan saved successfully",
        "mealPlan": plan,
    })))
}

/// Get the current user's meal plan.
pub async fn get_meal_plan(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let plan = fetch_plan(&pool, claims.user_id()?)
        .await?
        .ok_or_else(|| AppError::NotFound("Meal plan not found".to_string()))?;

    Ok(Json(json!({ "mealPlan": plan })))
}

/// Delete the current user's meal plan.
pub async fn delete_meal_plan(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM meal_plans WHERE user_id = ?")
        .bind(claims.user_id()?)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Meal plan not found".to_string()));
    }

    Ok(Json(json!({ "message": "Meal plan deleted successfully" })))
}
