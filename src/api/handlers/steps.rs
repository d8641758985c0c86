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
use crate::aggregate::RemoveStepCommand;
use crate::api::error::ApiResult;
use crate::api::models::{StepCreated, StepRequest};
use crate::api::AppState;
use crate::authorization::Principal;
use crate::domain::RecipeId;
use crate::projection::StepReadModel;

/// `GET /api/recipes/:recipe_id/steps`
pub async fn list_steps(
    State(state): State<AppState>,
    recipe_id: Result<Path<RecipeId>, PathRejection>,
) -> ApiResult<Json<Vec<StepReadModel>>> {
    let Path(recipe_id) = recipe_id?;
    Ok(Json(state.queries.get_steps(recipe_id).await?))
}

/// `POST /api/recipes/:recipe_id/steps`
pub async fn add_step(
    State(state): State<AppState>,
    principal: Principal,
    recipe_id: Result<Path<RecipeId>, PathRejection>,
    body: Result<Json<StepRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(recipe_id) = recipe_id?;
    let Json(body) = body?;
    let (timestamp, correlation_id) = issue();

    let number = state
        .commands
        .add_step(&principal, body.into_add(recipe_id, timestamp, correlation_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        location(recipe_id, &["steps", &number.to_string()]),
        Json(StepCreated { recipe_id, number }),
    ))
}

/// `PUT /api/recipes/:recipe_id/steps/:number`
pub async fn update_step(
    State(state): State<AppState>,
    principal: Principal,
    path: Result<Path<(RecipeId, usize)>, PathRejection>,
    body: Result<Json<StepRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Path((recipe_id, number)) = path?;
    let Json(body) = body?;
    let (timestamp, correlation_id) = issue();

    state
        .commands
        .update_step(
            &principal,
            body.into_update(recipe_id, number, timestamp, correlation_id),
        )
        .await?;

    Ok(StatusCode::OK)
}

/// `DELETE /api/recipes/:recipe_id/steps/:number`
pub async fn remove_step(
    State(state): State<AppState>,
    principal: Principal,
    path: Result<Path<(RecipeId, usize)>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path((recipe_id, number)) = path?;
    let (timestamp, correlation_id) = issue();

    state
        .commands
        .remove_step(
            &principal,
            RemoveStepCommand {
                recipe_id,
                number,
                timestamp,
                correlation_id,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
