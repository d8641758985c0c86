// Copyright (c) 2025 - Cowboy AI, Inc.
//! Route handlers
//!
//! Handlers translate HTTP into commands and queries and nothing else. The
//! clock is read here, once per request, and passed down in the command.

pub mod admin;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod steps;
pub mod tools;

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::RecipeId;

/// Timestamp and correlation id for a new command
fn issue() -> (DateTime<Utc>, Uuid) {
    (Utc::now(), Uuid::now_v7())
}

/// `Location` header for a resource below a recipe
fn location(recipe_id: RecipeId, tail: &[&str]) -> HeaderMap {
    let mut path = format!("/api/recipes/{}", recipe_id);
    for segment in tail {
        path.push('/');
        path.push_str(&urlencoding::encode(segment));
    }

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&path) {
        headers.insert(header::LOCATION, value);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_encodes_segments() {
        let id = RecipeId::new();
        let headers = location(id, &["ingredients", "Brown sugar"]);

        assert_eq!(
            headers[header::LOCATION],
            format!("/api/recipes/{}/ingredients/Brown%20sugar", id).as_str()
        );
    }
}
