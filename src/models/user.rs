// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use validator::Validate;

/// Represents the 'users' table in the database.
///
/// The relationship sets (favorites, followers, following) are JSON columns
/// mutated read-modify-write by the handlers; the storage layer enforces
/// nothing about them.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,

    pub name: String,

    /// Unique email address.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub bio: Option<String>,

    /// URL of the profile picture.
    pub profile_picture: Option<String>,

    /// Recipe ids favorited by this user.
    pub favorites: Json<Vec<i64>>,

    /// User ids following this user. Maintained by the follow/unfollow
    /// handlers together with `following`; the two sides are independent
    /// edge lists with no enforced symmetry.
    pub followers: Json<Vec<i64>>,

    /// User ids this user follows.
    pub following: Json<Vec<i64>>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for registration. Fields default to empty so an absent field fails
/// validation with 400 rather than a deserialization rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,
}

/// DTO for login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// DTO for partial profile updates. Absent fields are left unchanged;
/// provided fields are applied even when empty.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
}

/// DTO for follow/unfollow: the other user's id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    pub user_id: i64,
}

/// DTO for adding a favorite.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub recipe_id: i64,
}
