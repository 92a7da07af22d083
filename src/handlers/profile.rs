// src/handlers/profile.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{UpdateProfileRequest, User},
    utils::jwt::Claims,
};

/// Get the current user's profile.
///
/// The middleware resolves the user only when it still exists, so a stale
/// token for a deleted account lands here without a resolved user and gets
/// 404 rather than 401.
pub async fn get_profile(
    Extension(user): Extension<Option<User>>,
) -> Result<impl IntoResponse, AppError> {
    let user = user.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Partially update the current user's profile.
///
/// Absent fields are left unchanged; provided fields are applied as-is,
/// including empty strings.
pub async fn update_profile(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let mut user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(claims.user_id()?)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(name) = payload.name {
        user.name = name;
    }
    if let Some(bio) = payload.bio {
        user.bio = Some(bio);
    }
    if let Some(picture) = payload.profile_picture {
        user.profile_picture = Some(picture);
    }
    user.updated_at = Some(chrono::Utc::now());

    sqlx::query(
        "UPDATE users SET name = ?, bio = ?, profile_picture = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&user.name)
    .bind(&user.bio)
    .bind(&user.profile_picture)
    .bind(user.updated_at)
    .bind(user.id)
    .execute(&pool)
    .await?;

    Ok(Json(json!({
        "message": "Profile updated successfully",
        "user": user,
    })))
}
