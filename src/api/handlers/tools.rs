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
use crate::aggregate::RemoveToolCommand;
use crate::api::error::ApiResult;
use crate::api::models::{NamedChildCreated, ToolRequest};
use crate::api::AppState;
use crate::authorization::Principal;
use crate::domain::RecipeId;
use crate::projection::ToolReadModel;

/// `GET /api/recipes/:recipe_id/tools`
pub async fn list_tools(
    State(state): State<AppState>,
    recipe_id: Result<Path<RecipeId>, PathRejection>,
) -> ApiResult<Json<Vec<ToolReadModel>>> {
    let Path(recipe_id) = recipe_id?;
    Ok(Json(state.queries.get_tools(recipe_id).await?))
}

/// `POST /api/recipes/:recipe_id/tools`
pub async fn add_tool(
    State(state): State<AppState>,
    principal: Principal,
    recipe_id: Result<Path<RecipeId>, PathRejection>,
    body: Result<Json<ToolRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(recipe_id) = recipe_id?;
    let Json(body) = body?;
    let (timestamp, correlation_id) = issue();

    let name = state
        .commands
        .add_tool(&principal, body.into_add(recipe_id, timestamp, correlation_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        location(recipe_id, &["tools", &name]),
        Json(NamedChildCreated { recipe_id, name }),
    ))
}

/// `DELETE /api/recipes/:recipe_id/tools/:name`
pub async fn remove_tool(
    State(state): State<AppState>,
    principal: Principal,
    path: Result<Path<(RecipeId, String)>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path((recipe_id, tool_name)) = path?;
    let (timestamp, correlation_id) = issue();

    state
        .commands
        .remove_tool(
            &principal,
            RemoveToolCommand {
                recipe_id,
                tool_name,
                timestamp,
                correlation_id,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
