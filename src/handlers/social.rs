// src/handlers/social.rs
//
// Follower/favorite set maintenance. Both sides of the follow graph live on
// independent user rows and are rewritten read-modify-write without a
// transaction, so the two writes of a follow/unfollow are not atomic.

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{
        recipe::Recipe,
        user::{FavoriteRequest, FollowRequest, User},
    },
    utils::jwt::Claims,
};

async fn fetch_user(pool: &SqlitePool, id: i64) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

async fn save_following(pool: &SqlitePool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET following = ?, updated_at = ? WHERE id = ?")
        .bind(&user.following)
        .bind(chrono::Utc::now())
        .bind(user.id)
        .execute(pool)
        .await?;
    Ok(())
}

async fn save_followers(pool: &SqlitePool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET followers = ?, updated_at = ? WHERE id = ?")
        .bind(&user.followers)
        .bind(chrono::Utc::now())
        .bind(user.id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Follow another user.
///
/// Strict duplicate check: following someone twice is a 400 Conflict. The
/// mirror write to the target's follower list happens second; if it fails the
/// graph is left asymmetric and the error says so instead of rolling back.
pub async fn follow_user(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<FollowRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut target = fetch_user(&pool, payload.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut current = fetch_user(&pool, claims.user_id()?)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if current.following.contains(&target.id) {
        return Err(AppError::Conflict(
            "You are already following this user".to_string(),
        ));
    }

    current.following.push(target.id);
    target.followers.push(current.id);

    save_following(&pool, &current).await?;

    if let Err(e) = save_followers(&pool, &target).await {
        tracing::error!(
            "Follow partially applied: user {} follows {} but the follower list was not updated: {:?}",
            current.id,
            target.id,
            e
        );
        return Err(AppError::InternalServerError(format!(
            "Follow partially applied; follower graph may be inconsistent: {e}"
        )));
    }

    Ok(Json(json!({ "message": "You are now following this user" })))
}

/// Unfollow a user. Removal is idempotent: unfollowing someone not currently
/// followed succeeds without error, unlike follow's strict conflict check.
pub async fn unfollow_user(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<FollowRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut target = fetch_user(&pool, payload.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut current = fetch_user(&pool, claims.user_id()?)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    current.following.retain(|id| *id != target.id);
    target.followers.retain(|id| *id != current.id);

    save_following(&pool, &current).await?;

    if let Err(e) = save_followers(&pool, &target).await {
        tracing::error!(
            "Unfollow partially applied: user {} no longer follows {} but the follower list was not updated: {:?}",
            current.id,
            target.id,
            e
        );
        return Err(AppError::InternalServerError(format!(
            "Unfollow partially applied; follower graph may be inconsistent: {e}"
        )));
    }

    Ok(Json(json!({ "message": "You have unfollowed this user" })))
}

/// Add a recipe to the current user's favorites.
pub async fn add_favorite(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<FavoriteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = ?")
        .bind(payload.recipe_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".to_string()))?;

    let mut user = fetch_user(&pool, claims.user_id()?)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if user.favorites.contains(&recipe.id) {
        return Err(AppError::Conflict("Recipe already in favorites".to_string()));
    }

    user.favorites.push(recipe.id);

    sqlx::query("UPDATE users SET favorites = ?, updated_at = ? WHERE id = ?")
        .bind(&user.favorites)
        .bind(chrono::Utc::now())
        .bind(user.id)
        .execute(&pool)
        .await?;

    Ok(Json(json!({ "message": "Recipe added to favorites" })))
}
