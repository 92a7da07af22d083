// src/routes.rs

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, meal_plan, profile, recipes, social},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (users, recipes, meal plan).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    let origins = ["http://localhost:5173".parse().unwrap()];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let user_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        // Protected user routes
        .merge(
            Router::new()
                .route(
                    "/profile",
                    get(profile::get_profile).put(profile::update_profile),
                )
                .route("/follow", post(social::follow_user))
                .route("/unfollow", post(social::unfollow_user))
                .route("/favorites", put(social::add_favorite))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let recipe_routes = Router::new()
        .route("/", get(recipes::list_recipes))
        .route("/search", get(recipes::search_recipes))
        .route("/{id}", get(recipes::get_recipe))
        .route("/{id}/average-rating", get(recipes::average_rating))
        // Protected recipe routes
        .merge(
            Router::new()
                .route("/", post(recipes::create_recipe))
                .route("/user-recipes", get(recipes::user_recipes))
                .route(
                    "/{id}",
                    put(recipes::update_recipe).delete(recipes::delete_recipe),
                )
                .route("/{id}/rating", post(recipes::add_rating))
                .route("/{id}/comment", post(recipes::add_comment))
                .route("/{id}/video", post(recipes::add_video))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let meal_plan_routes = Router::new()
        .route(
            "/",
            post(meal_plan::save_meal_plan)
                .get(meal_plan::get_meal_plan)
                .delete(meal_plan::delete_meal_plan),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/recipes", recipe_routes)
        .nest("/api/meal-plan", meal_plan_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
