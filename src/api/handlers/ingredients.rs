// Copyright (c) 2025 - Cowboy AI, Inc.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{issue, location};
use crate::aggregate::RemoveIngredientCommand;
use crate::api::error::ApiResult;
use crate::api::models::{IngredientRequest, NamedChildCreated};
use crate::api::AppState;
use crate::authorization::Principal;
use crate::domain::RecipeId;
use crate::projection::IngredientReadModel;

/// `GET /api/recipes/:recipe_id/ingredients`
pub async fn list_ingredients(
    State(state): State<AppState>,
    recipe_id: Result<Path<RecipeId>, PathRejection>,
) -> ApiResult<Json<Vec<IngredientReadModel>>> {
    let Path(recipe_id) = recipe_id?;
    Ok(Json(state.queries.get_ingredients(recipe_id).await?))
}

/// `GET /api/recipes/:recipe_id/ingredients/:name`
pub async fn get_ingredient(
    State(state): State<AppState>,
    path: Result<Path<(RecipeId, String)>, PathRejection>,
) -> ApiResult<Json<IngredientReadModel>> {
    let Path((recipe_id, name)) = path?;
    Ok(Json(state.queries.get_ingredient(recipe_id, &name).await?))
}

/// `POST /api/recipes/:recipe_id/ingredients`
pub async fn add_ingredient(
    State(state): State<AppState>,
    principal: Principal,
    recipe_id: Result<Path<RecipeId>, PathRejection>,
    body: Result<Json<IngredientRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(recipe_id) = recipe_id?;
    let Json(body) = body?;
    let (timestamp, correlation_id) = issue();

    let name = state
        .commands
        .add_ingredient(&principal, body.into_add(recipe_id, timestamp, correlation_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        location(recipe_id, &["ingredients", &name]),
        Json(NamedChildCreated { recipe_id, name }),
    ))
}

/// `PUT /api/recipes/:recipe_id/ingredients/:name`
pub async fn update_ingredient(
    State(state): State<AppState>,
    principal: Principal,
    path: Result<Path<(RecipeId, String)>, PathRejection>,
    body: Result<Json<IngredientRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Path((recipe_id, ingredient_name)) = path?;
    let Json(body) = body?;
    let (timestamp, correlation_id) = issue();

    state
        .commands
        .update_ingredient(
            &principal,
            body.into_update(recipe_id, ingredient_name, timestamp, correlation_id),
        )
        .await?;

    Ok(StatusCode::OK)
}

/// `DELETE /api/recipes/:recipe_id/ingredients/:name`
pub async fn remove_ingredient(
    State(state): State<AppState>,
    principal: Principal,
    path: Result<Path<(RecipeId, String)>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path((recipe_id, ingredient_name)) = path?;
    let (timestamp, correlation_id) = issue();

    state
        .commands
        .remove_ingredient(
            &principal,
            RemoveIngredientCommand {
                recipe_id,
                ingredient_name,
                timestamp,
                correlation_id,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
