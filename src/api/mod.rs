// Copyright (c) 2025 - Cowboy AI, Inc.
//! HTTP API
//!
//! A thin axum layer over the command and query services.
//!
//! | Route | Methods |
//! |---|---|
//! | `/health` | GET |
//! | `/api/recipes` | GET, POST |
//! | `/api/recipes/:recipe_id` | GET, PUT, DELETE |
//! | `/api/recipes/:recipe_id/ingredients` | GET, POST |
//! | `/api/recipes/:recipe_id/ingredients/:name` | GET, PUT, DELETE |
//! | `/api/recipes/:recipe_id/steps` | GET, POST |
//! | `/api/recipes/:recipe_id/steps/:number` | PUT, DELETE |
//! | `/api/recipes/:recipe_id/tools` | GET, POST |
//! | `/api/recipes/:recipe_id/tools/:name` | DELETE |
//! | `/api/admin/read-models/rebuild` | POST |
//!
//! Write routes need the gateway identity headers described in
//! [`principal`].

pub mod error;
pub mod handlers;
pub mod models;
pub mod principal;

pub use error::{ApiError, ApiResult};

use axum::{
    http::{header::CONTENT_TYPE, HeaderName, Method},
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::service::{RecipeCommandService, RecipeQueryService};
use handlers::{admin, health, ingredients, recipes, steps, tools};
use principal::{USER_ID_HEADER, USER_ROLES_HEADER};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub commands: Arc<RecipeCommandService>,
    pub queries: RecipeQueryService,
}

impl AppState {
    pub fn new(commands: Arc<RecipeCommandService>, queries: RecipeQueryService) -> Self {
        Self { commands, queries }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static(USER_ID_HEADER),
            HeaderName::from_static(USER_ROLES_HEADER),
        ])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route(
            "/api/recipes/:recipe_id",
            get(recipes::get_recipe)
                .put(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route(
            "/api/recipes/:recipe_id/ingredients",
            get(ingredients::list_ingredients).post(ingredients::add_ingredient),
        )
        .route(
            "/api/recipes/:recipe_id/ingredients/:name",
            get(ingredients::get_ingredient)
                .put(ingredients::update_ingredient)
                .delete(ingredients::remove_ingredient),
        )
        .route(
            "/api/recipes/:recipe_id/steps",
            get(steps::list_steps).post(steps::add_step),
        )
        .route(
            "/api/recipes/:recipe_id/steps/:number",
            put(steps::update_step).delete(steps::remove_step),
        )
        .route(
            "/api/recipes/:recipe_id/tools",
            get(tools::list_tools).post(tools::add_tool),
        )
        .route("/api/recipes/:recipe_id/tools/:name", delete(tools::remove_tool))
        .route(
            "/api/admin/read-models/rebuild",
            post(admin::rebuild_read_models),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
