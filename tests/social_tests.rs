// tests/social_tests.rs

use recipeshare::{config::Config, routes, state::AppState};
use sqlx::sqlite::SqlitePoolOptions;

async fn spawn_app() -> String {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "social_test_secret".to_string(),
        jwt_expiration: 600,
        port: 0,
        environment: "development".to_string(),
        rust_log: "error".to_string(),
    };

    let state = AppState { pool, config };
    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Registers a fresh user; returns their cookie-holding client and user id.
async fn signed_in_user(address: &str, name: &str) -> (reqwest::Client, i64) {
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap();

    let email = format!("{}_{}@example.com", name, &uuid::Uuid::new_v4().to_string()[..8]);
    let body: serde_json::Value = client
        .post(format!("{}/api/users/register", address))
        .json(&serde_json::json!({
            "name": name,
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Register failed")
        .json()
        .await
        .unwrap();

    (client, body["user"]["id"].as_i64().unwrap())
}

#[tokio::test]
async fn follow_updates_both_sides() {
    let address = spawn_app().await;
    let (alice, alice_id) = signed_in_user(&address, "alice").await;
    let (bob, bob_id) = signed_in_user(&address, "bob").await;

    let response = alice
        .post(format!("{}/api/users/follow", address))
        .json(&serde_json::json!({ "userId": bob_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let alice_profile: serde_json::Value = alice
        .get(format!("{}/api/users/profile", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(alice_profile["following"], serde_json::json!([bob_id]));

    let bob_profile: serde_json::Value = bob
        .get(format!("{}/api/users/profile", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(bob_profile["followers"], serde_json::json!([alice_id]));
}

#[tokio::test]
async fn double_follow_conflicts_but_unfollow_is_idempotent() {
    let address = spawn_app().await;
    let (alice, _) = signed_in_user(&address, "alice").await;
    let (_bob, bob_id) = signed_in_user(&address, "bob").await;

    // Unfollowing someone never followed succeeds.
    let unfollow = alice
        .post(format!("{}/api/users/unfollow", address))
        .json(&serde_json::json!({ "userId": bob_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(unfollow.status().as_u16(), 200);

    let first = alice
        .post(format!("{}/api/users/follow", address))
        .json(&serde_json::json!({ "userId": bob_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status().as_u16(), 200);

    // Following twice is a strict conflict.
    let second = alice
        .post(format!("{}/api/users/follow", address))
        .json(&serde_json::json!({ "userId": bob_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 400);

    // Unfollow clears both sides and a repeat is again a no-op success.
    for _ in 0..2 {
        let unfollow = alice
            .post(format!("{}/api/users/unfollow", address))
            .json(&serde_json::json!({ "userId": bob_id }))
            .send()
            .await
            .unwrap();
        assert_eq!(unfollow.status().as_u16(), 200);
    }

    let profile: serde_json::Value = alice
        .get(format!("{}/api/users/profile", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(profile["following"], serde_json::json!([]));
}

#[tokio::test]
async fn follow_missing_user_is_404() {
    let address = spawn_app().await;
    let (alice, _) = signed_in_user(&address, "alice").await;

    let response = alice
        .post(format!("{}/api/users/follow", address))
        .json(&serde_json::json!({ "userId": 9999 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn favorites_reject_duplicates_and_missing_recipes() {
    let address = spawn_app().await;
    let (alice, _) = signed_in_user(&address, "alice").await;

    // Favoriting a recipe that does not exist.
    let missing = alice
        .put(format!("{}/api/users/favorites", address))
        .json(&serde_json::json!({ "recipeId": 9999 }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);

    let recipe: serde_json::Value = alice
        .post(format!("{}/api/recipes", address))
        .json(&serde_json::json!({
            "title": "Omelette",
            "ingredients": ["Eggs"],
            "preparationSteps": ["Cook"],
            "cookingTime": "5 minutes",
            "servings": 1
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let recipe_id = recipe["id"].as_i64().unwrap();

    let first = alice
        .put(format!("{}/api/users/favorites", address))
        .json(&serde_json::json!({ "recipeId": recipe_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status().as_u16(), 200);

    let duplicate = alice
        .put(format!("{}/api/users/favorites", address))
        .json(&serde_json::json!({ "recipeId": recipe_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status().as_u16(), 400);

    let profile: serde_json::Value = alice
        .get(format!("{}/api/users/profile", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(profile["favorites"], serde_json::json!([recipe_id]));
}
