// src/models/recipe.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use validator::Validate;

/// Represents the 'recipes' table in the database.
///
/// Ratings and comments are embedded value objects without independent
/// identity: list semantics only (append, find-by-user), no deletion by id.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i64,

    /// The owning user. Sole authority for update/delete/video; ratings and
    /// comments are open to any authenticated user.
    pub user_id: i64,

    pub title: String,
    pub ingredients: Json<Vec<String>>,
    pub preparation_steps: Json<Vec<String>>,
    pub cooking_time: String,
    pub servings: i64,

    pub photo: Option<String>,
    pub video_tutorial: Option<String>,

    /// Opaque tags, only consulted by search.
    pub meal_type: Option<String>,
    pub dietary_preference: Option<String>,

    /// At most one entry per user, enforced by lookup-then-update.
    pub ratings: Json<Vec<Rating>>,

    /// Append-only.
    pub comments: Json<Vec<Comment>>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub user_id: i64,
    pub rating: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub user_id: i64,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a recipe.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "At least one ingredient is required"))]
    pub ingredients: Vec<String>,
    #[validate(length(min = 1, message = "At least one preparation step is required"))]
    pub preparation_steps: Vec<String>,
    #[validate(length(min = 1, message = "Cooking time is required"))]
    pub cooking_time: String,
    #[validate(range(min = 1, message = "Servings must be at least 1"))]
    pub servings: i64,
    pub photo: Option<String>,
    pub video_tutorial: Option<String>,
    pub meal_type: Option<String>,
    pub dietary_preference: Option<String>,
}

/// DTO for partial recipe updates. `None` means "leave unchanged"; a provided
/// value is applied as-is, so clearing a field to empty is expressible.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub preparation_steps: Option<Vec<String>>,
    pub cooking_time: Option<String>,
    #[validate(range(min = 1))]
    pub servings: Option<i64>,
    pub photo: Option<String>,
    pub video_tutorial: Option<String>,
    pub meal_type: Option<String>,
    pub dietary_preference: Option<String>,
}

/// DTO for rating a recipe.
#[derive(Debug, Deserialize)]
pub struct AddRatingRequest {
    pub rating: i64,
}

/// DTO for commenting on a recipe.
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    #[serde(default)]
    pub content: String,
}

/// DTO for setting the video tutorial URL.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddVideoRequest {
    #[serde(default)]
    pub video_tutorial: String,
}

/// Query parameters for recipe search. Every filter is optional; present
/// filters combine conjunctively.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Comma-separated terms, matched as case-insensitive substrings against
    /// the recipe's ingredient list.
    pub ingredient: Option<String>,
    pub meal_type: Option<String>,
    pub dietary_preference: Option<String>,
}
