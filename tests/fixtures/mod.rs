// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cookbook
//!
//! Deterministic users, timestamps and a fully wired in-memory application.
//! Recipes are stored straight into the write store, the same way a
//! pre-existing database row would look to the API.
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use cookbook::aggregate::{DefaultRecipeFactory, Recipe};
use cookbook::api::principal::{USER_ID_HEADER, USER_ROLES_HEADER};
use cookbook::domain::{ImageUrl, Ingredient, PrepTime, RecipeId, RecipeName, UserId};
use cookbook::events::EventContext;
use cookbook::{
    router, AppState, InMemoryRecipeProjection, InMemoryRecipeRepository, OwnerOrAdminEvaluator,
    ProjectionPublisher, RecipeCommandService, RecipeQueryService, RecipeReadStore,
    RecipeRepository,
};

/// The authenticated caller used by most tests
pub const OWNER_ID: &str = "bb21ce33-ea66-4c56-aefc-5f8588f95766";

/// Someone who owns nothing
pub const STRANGER_ID: &str = "01934f4a-5000-7000-8000-000000005000";

/// An administrator
pub const ADMIN_ID: &str = "01934f4a-a000-7000-8000-00000000a000";

pub const CORRELATION_ID_1: &str = "01934f4a-c001-7000-8000-00000000c001";

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

/// Parse a fixed UUID from a constant string
pub fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).expect("Invalid UUID in test fixture")
}

pub fn user(s: &str) -> UserId {
    UserId::from_uuid(parse_uuid(s))
}

pub fn owner() -> UserId {
    user(OWNER_ID)
}

pub fn stranger() -> UserId {
    user(STRANGER_ID)
}

pub fn admin() -> UserId {
    user(ADMIN_ID)
}

/// Parse the fixed timestamp
pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

pub fn context(actor: UserId) -> EventContext {
    EventContext::new(actor, fixed_timestamp(), parse_uuid(CORRELATION_ID_1))
}

/// A recipe owned by `owner` with one ingredient per name
pub fn recipe_with_ingredients(owner: UserId, ingredients: &[&str]) -> Recipe {
    let ctx = context(owner);
    let mut recipe = Recipe::create(
        RecipeId::new(),
        owner,
        RecipeName::new("Recipe").expect("valid name"),
        ImageUrl::new("Url").expect("valid url"),
        PrepTime::from_minutes(39).expect("valid prep time"),
        &ctx,
    );
    for name in ingredients {
        recipe
            .add_ingredient(Ingredient::new(name, 30.0, 30.0).expect("valid ingredient"), &ctx)
            .expect("unique ingredient");
    }
    recipe
}

/// In-memory application with handles on both stores
pub struct TestApp {
    pub router: Router,
    pub repository: Arc<InMemoryRecipeRepository>,
    pub read_store: Arc<InMemoryRecipeProjection>,
    pub commands: Arc<RecipeCommandService>,
}

impl TestApp {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryRecipeRepository::new());
        let read_store = Arc::new(InMemoryRecipeProjection::new());
        let commands = Arc::new(RecipeCommandService::new(
            repository.clone(),
            Arc::new(OwnerOrAdminEvaluator),
            Arc::new(ProjectionPublisher::new(read_store.clone())),
            Arc::new(DefaultRecipeFactory),
            read_store.clone(),
        ));
        let queries = RecipeQueryService::new(read_store.clone());

        Self {
            router: router(AppState::new(commands.clone(), queries)),
            repository,
            read_store,
            commands,
        }
    }

    /// Store a recipe in the write store and sync the read models
    pub async fn store(&self, mut recipe: Recipe) -> RecipeId {
        recipe.take_events();
        self.repository.add(&recipe).await.expect("recipe stored");
        let all = self.repository.list().await.expect("list recipes");
        self.read_store.rebuild(&all).await.expect("rebuild read models");
        recipe.id()
    }

    /// Store a recipe in the write store only, leaving read models stale
    pub async fn repository_only(&self, mut recipe: Recipe) -> RecipeId {
        recipe.take_events();
        self.repository.add(&recipe).await.expect("recipe stored");
        recipe.id()
    }

    /// Send a request as `caller` (or anonymously)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        caller: Option<UserId>,
        body: Option<Value>,
    ) -> TestResponse {
        self.send_with_roles(method, uri, caller, None, body).await
    }

    pub async fn send_with_roles(
        &self,
        method: Method,
        uri: &str,
        caller: Option<UserId>,
        roles: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(caller) = caller {
            request = request.header(USER_ID_HEADER, caller.to_string());
        }
        if let Some(roles) = roles {
            request = request.header(USER_ROLES_HEADER, roles);
        }

        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }
}

/// JSON body for the ingredient routes
pub fn ingredient_body(name: &str, grams: f64, calories_per_hundred_grams: f64) -> Value {
    serde_json::json!({
        "name": name,
        "grams": grams,
        "caloriesPerHundredGrams": calories_per_hundred_grams,
    })
}
