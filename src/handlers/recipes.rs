// src/handlers/recipes.rs

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::recipe::{
        AddCommentRequest, AddRatingRequest, AddVideoRequest, Comment, CreateRecipeRequest,
        Rating, Recipe, SearchParams, UpdateRecipeRequest,
    },
    utils::jwt::Claims,
};

async fn fetch_recipe(pool: &SqlitePool, id: i64) -> Result<Recipe, AppError> {
    sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".to_string()))
}

/// Create a new recipe owned by the current user.
pub async fn create_recipe(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateRecipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let now = chrono::Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO recipes
            (user_id, title, ingredients, preparation_steps, cooking_time, servings,
             photo, video_tutorial, meal_type, dietary_preference, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(claims.user_id()?)
    .bind(&payload.title)
    .bind(sqlx::types::Json(&payload.ingredients))
    .bind(sqlx::types::Json(&payload.preparation_steps))
    .bind(&payload.cooking_time)
    .bind(payload.servings)
    .bind(&payload.photo)
    .bind(&payload.video_tutorial)
    .bind(&payload.meal_type)
    .bind(&payload.dietary_preference)
    .bind(now)
    .bind(now)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create recipe: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let recipe = fetch_recipe(&pool, result.last_insert_rowid()).await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// List all recipes.
pub async fn list_recipes(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let recipes = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes ORDER BY id")
        .fetch_all(&pool)
        .await?;

    Ok(Json(recipes))
}

/// Get a single recipe by ID.
pub async fn get_recipe(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = fetch_recipe(&pool, id).await?;
    Ok(Json(recipe))
}

/// List recipes owned by the current user. An empty result is a 404, matching
/// the public API contract.
pub async fn user_recipes(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let recipes =
        sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE user_id = ? ORDER BY id")
            .bind(claims.user_id()?)
            .fetch_all(&pool)
            .await?;

    if recipes.is_empty() {
        return Err(AppError::NotFound(
            "No recipes found for this user".to_string(),
        ));
    }

    Ok(Json(recipes))
}

/// Partially update a recipe. Owner only.
///
/// `None` fields are left unchanged; provided fields are applied as-is.
pub async fn update_recipe(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRecipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let mut recipe = fetch_recipe(&pool, id).await?;

    if recipe.user_id != claims.user_id()? {
        return Err(AppError::Forbidden(
            "Not authorized to update this recipe".to_string(),
        ));
    }

    if let Some(title) = payload.title {
        recipe.title = title;
    }
    if let Some(ingredients) = payload.ingredients {
        recipe.ingredients.0 = ingredients;
    }
    if let Some(steps) = payload.preparation_steps {
        recipe.preparation_steps.0 = steps;
    }
    if let Some(cooking_time) = payload.cooking_time {
        recipe.cooking_time = cooking_time;
    }
    if let Some(servings) = payload.servings {
        recipe.servings = servings;
    }
    if let Some(photo) = payload.photo {
        recipe.photo = Some(photo);
    }
    if let Some(video) = payload.video_tutorial {
        recipe.video_tutorial = Some(video);
    }
    if let Some(meal_type) = payload.meal_type {
        recipe.meal_type = Some(meal_type);
    }
    if let Some(dietary) = payload.dietary_preference {
        recipe.dietary_preference = Some(dietary);
    }
    recipe.updated_at = Some(chrono::Utc::now());

    sqlx::query(
        r#"
        UPDATE recipes SET
            title = ?, ingredients = ?, preparation_steps = ?, cooking_time = ?,
            servings = ?, photo = ?, video_tutorial = ?, meal_type = ?,
            dietary_preference = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&recipe.title)
    .bind(&recipe.ingredients)
    .bind(&recipe.preparation_steps)
    .bind(&recipe.cooking_time)
    .bind(recipe.servings)
    .bind(&recipe.photo)
    .bind(&recipe.video_tutorial)
    .bind(&recipe.meal_type)
    .bind(&recipe.dietary_preference)
    .bind(recipe.updated_at)
    .bind(recipe.id)
    .execute(&pool)
    .await?;

    Ok(Json(recipe))
}

/// Delete a recipe. Owner only.
pub async fn delete_recipe(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = fetch_recipe(&pool, id).await?;

    if recipe.user_id != claims.user_id()? {
        return Err(AppError::Forbidden(
            "Not authorized to delete this recipe".to_string(),
        ));
    }

    sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    Ok(Json(json!({ "message": "Recipe removed successfully" })))
}

/// Rate a recipe, 1 to 5. Upsert-by-user: a repeat rating overwrites the
/// previous value in place. Owners may rate their own recipes.
pub async fn add_rating(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<AddRatingRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::BadRequest(
            "Invalid rating. Must be between 1 and 5.".to_string(),
        ));
    }

    let mut recipe = fetch_recipe(&pool, id).await?;
    let user_id = claims.user_id()?;

    match recipe.ratings.iter_mut().find(|r| r.user_id == user_id) {
        Some(existing) => existing.rating = payload.rating,
        None => recipe.ratings.push(Rating {
            user_id,
            rating: payload.rating,
            created_at: chrono::Utc::now(),
        }),
    }

    sqlx::query("UPDATE recipes SET ratings = ?, updated_at = ? WHERE id = ?")
        .bind(&recipe.ratings)
        .bind(chrono::Utc::now())
        .bind(recipe.id)
        .execute(&pool)
        .await?;

    Ok(Json(json!({
        "message": "Rating added successfully",
        "recipe": recipe,
    })))
}

/// Append a comment. No editing, no dedup.
pub async fn add_comment(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<AddCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.content.is_empty() {
        return Err(AppError::BadRequest(
            "Comment content is required".to_string(),
        ));
    }

    let mut recipe = fetch_recipe(&pool, id).await?;

    let comment = Comment {
        user_id: claims.user_id()?,
        content: payload.content,
        created_at: chrono::Utc::now(),
    };
    recipe.comments.push(comment.clone());

    sqlx::query("UPDATE recipes SET comments = ?, updated_at = ? WHERE id = ?")
        .bind(&recipe.comments)
        .bind(chrono::Utc::now())
        .bind(recipe.id)
        .execute(&pool)
        .await?;

    Ok(Json(json!({
        "message": "Comment added successfully",
        "comment": comment,
    })))
}

/// Mean of all rating values to two decimal places. A recipe with no ratings
/// gets a distinct marker response rather than a zero average.
pub async fn average_rating(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = fetch_recipe(&pool, id).await?;

    let count = recipe.ratings.len();
    if count == 0 {
        return Ok(Json(json!({ "message": "No ratings yet" })));
    }

    let total: i64 = recipe.ratings.iter().map(|r| r.rating).sum();
    let average = total as f64 / count as f64;

    Ok(Json(json!({
        "averageRating": format!("{:.2}", average),
        "ratingsCount": count,
    })))
}

/// Set or replace the video tutorial URL. Owner only, unlike ratings and
/// comments.
pub async fn add_video(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<AddVideoRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.video_tutorial.is_empty() {
        return Err(AppError::BadRequest(
            "Video tutorial URL is required".to_string(),
        ));
    }

    let mut recipe = fetch_recipe(&pool, id).await?;

    if recipe.user_id != claims.user_id()? {
        return Err(AppError::Forbidden(
            "You can only add a video to your own recipe".to_string(),
        ));
    }

    recipe.video_tutorial = Some(payload.video_tutorial);
    recipe.updated_at = Some(chrono::Utc::now());

    sqlx::query("UPDATE recipes SET video_tutorial = ?, updated_at = ? WHERE id = ?")
        .bind(&recipe.video_tutorial)
        .bind(recipe.updated_at)
        .bind(recipe.id)
        .execute(&pool)
        .await?;

    Ok(Json(json!({
        "message": "Video tutorial added successfully",
        "recipe": recipe,
    })))
}

/// Returns true when any stored ingredient contains any of the comma-split
/// query terms, case-insensitively.
fn matches_ingredients(ingredients: &[String], query: &str) -> bool {
    let terms: Vec<String> = query
        .split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    if terms.is_empty() {
        return true;
    }

    ingredients
        .iter()
        .any(|ing| terms.iter().any(|t| ing.to_lowercase().contains(t.as_str())))
}

/// Search recipes. Filters are independently optional and conjunctive:
/// ingredient is a substring match, mealType and dietaryPreference are exact
/// tags. Filtering happens in the application since the ingredient list is an
/// embedded JSON array.
pub async fn search_recipes(
    State(pool): State<SqlitePool>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let recipes = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes ORDER BY id")
        .fetch_all(&pool)
        .await?;

    let recipes: Vec<Recipe> = recipes
        .into_iter()
        .filter(|r| {
            params
                .ingredient
                .as_deref()
                .map(|q| matches_ingredients(&r.ingredients, q))
                .unwrap_or(true)
                && params
                    .meal_type
                    .as_deref()
                    .map(|mt| r.meal_type.as_deref() == Some(mt))
                    .unwrap_or(true)
                && params
                    .dietary_preference
                    .as_deref()
                    .map(|dp| r.dietary_preference.as_deref() == Some(dp))
                    .unwrap_or(true)
        })
        .collect();

    Ok(Json(json!({ "recipes": recipes })))
}
