// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, RegisterRequest, User},
    utils::{
        hash::{hash_password, verify_password},
        jwt::{auth_cookie, expired_cookie, sign_jwt},
    },
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it, sets the session
/// cookie, and returns 201 with the public user fields. The hash is never
/// part of any response.
pub async fn register(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    jar: CookieJar,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = ?")
        .bind(&payload.email)
        .fetch_optional(&pool)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let hashed_password = hash_password(&payload.password)?;
    let now = chrono::Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO users (name, email, password, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&hashed_password)
    .bind(now)
    .bind(now)
    .execute(&pool)
    .await
    .map_err(|e| {
        // Race with a concurrent registration: the unique index is the backstop.
        if e.to_string().contains("UNIQUE constraint") {
            AppError::Conflict("Email already registered".to_string())
        } else {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::from(e)
        }
    })?;

    let user_id = result.last_insert_rowid();
    let token = sign_jwt(user_id, &config.jwt_secret, config.jwt_expiration)?;
    let jar = jar.add(auth_cookie(token, &config));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(json!({
            "success": true,
            "user": {
                "id": user_id,
                "name": payload.name,
                "email": payload.email,
            }
        })),
    ))
}

/// Authenticates a user and sets the session cookie.
///
/// Unknown email and wrong password produce the same generic 401 so callers
/// cannot probe which addresses are registered.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&payload.email)
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Login DB error: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

    let is_valid = verify_password(&payload.password, &user.password)?;

    if !is_valid {
        return Err(AppError::AuthError("Invalid email or password".to_string()));
    }

    let token = sign_jwt(user.id, &config.jwt_secret, config.jwt_expiration)?;
    let jar = jar.add(auth_cookie(token, &config));

    Ok((
        jar,
        Json(json!({
            "user": {
                "id": user.id,
                "name": user.name,
                "email": user.email,
            }
        })),
    ))
}

/// Clears the session by overwriting the cookie with an expired empty value.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(expired_cookie());
    (jar, Json(json!({ "message": "Logged out successfully" })))
}
