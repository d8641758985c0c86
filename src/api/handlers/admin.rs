// Copyright (c) 2025 - Cowboy AI, Inc.

use axum::{extract::State, Json};

use crate::api::error::ApiResult;
use crate::api::models::RebuildResponse;
use crate::api::AppState;
use crate::authorization::Principal;

/// `POST /api/admin/read-models/rebuild`
pub async fn rebuild_read_models(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<RebuildResponse>> {
    let projected = state.commands.rebuild_read_models(&principal).await?;
    Ok(Json(RebuildResponse { projected }))
}
