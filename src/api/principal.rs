// Copyright (c) 2025 - Cowboy AI, Inc.
//! Caller identity from gateway headers
//!
//! The upstream gateway authenticates the caller and forwards:
//!
//! - `x-user-id`: the caller's UUID (required)
//! - `x-user-roles`: comma-separated roles, e.g. `admin,user` (optional,
//!   defaults to `user`)

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::error::ApiError;
use crate::authorization::{Principal, Role};
use crate::domain::UserId;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLES_HEADER: &str = "x-user-roles";

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| ApiError::Unauthenticated(format!("missing {USER_ID_HEADER} header")))?
            .to_str()
            .ok()
            .and_then(|raw| raw.trim().parse::<UserId>().ok())
            .ok_or_else(|| ApiError::Unauthenticated(format!("invalid {USER_ID_HEADER} header")))?;

        let roles = match parts.headers.get(USER_ROLES_HEADER) {
            None => vec![Role::User],
            Some(value) => value
                .to_str()
                .map_err(|_| ApiError::Unauthenticated(format!("invalid {USER_ROLES_HEADER} header")))?
                .split(',')
                .filter(|role| !role.trim().is_empty())
                .map(str::parse)
                .collect::<Result<Vec<Role>, _>>()
                .map_err(|e| ApiError::Unauthenticated(e.to_string()))?,
        };

        Ok(Principal::new(id, roles))
    }
}
