// Copyright (c) 2025 - Cowboy AI, Inc.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{issue, location};
use crate::aggregate::DeleteRecipeCommand;
use crate::api::error::ApiResult;
use crate::api::models::{RecipeCreated, RecipeRequest};
use crate::api::AppState;
use crate::authorization::Principal;
use crate::domain::RecipeId;
use crate::projection::RecipeReadModel;
use crate::service::RecipeFilter;

/// `GET /api/recipes?owner=&search=`
pub async fn list_recipes(
    State(state): State<AppState>,
    filter: Result<Query<RecipeFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<RecipeReadModel>>> {
    let Query(filter) = filter?;
    Ok(Json(state.queries.list_recipes(&filter).await))
}

/// `GET /api/recipes/:recipe_id`
pub async fn get_recipe(
    State(state): State<AppState>,
    recipe_id: Result<Path<RecipeId>, PathRejection>,
) -> ApiResult<Json<RecipeReadModel>> {
    let Path(recipe_id) = recipe_id?;
    Ok(Json(state.queries.get_recipe(recipe_id).await?))
}

/// `POST /api/recipes`
pub async fn create_recipe(
    State(state): State<AppState>,
    principal: Principal,
    body: Result<Json<RecipeRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let (timestamp, correlation_id) = issue();

    let id = state
        .commands
        .create_recipe(&principal, body.into_create(timestamp, correlation_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        location(id, &[]),
        Json(RecipeCreated { id }),
    ))
}

/// `PUT /api/recipes/:recipe_id`
pub async fn update_recipe(
    State(state): State<AppState>,
    principal: Principal,
    recipe_id: Result<Path<RecipeId>, PathRejection>,
    body: Result<Json<RecipeRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Path(recipe_id) = recipe_id?;
    let Json(body) = body?;
    let (timestamp, correlation_id) = issue();

    state
        .commands
        .update_recipe(
            &principal,
            body.into_update(recipe_id, timestamp, correlation_id),
        )
        .await?;

    Ok(StatusCode::OK)
}

/// `DELETE /api/recipes/:recipe_id`
pub async fn delete_recipe(
    State(state): State<AppState>,
    principal: Principal,
    recipe_id: Result<Path<RecipeId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(recipe_id) = recipe_id?;
    let (timestamp, correlation_id) = issue();

    state
        .commands
        .delete_recipe(
            &principal,
            DeleteRecipeCommand {
                recipe_id,
                timestamp,
                correlation_id,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
